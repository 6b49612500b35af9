/// A rule-altering modifier that can be toggled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheat {
    /// Terminal collisions restart the run instead of ending it.
    NoLosing,
    /// Stat points are reported as unbounded and purchases cost nothing.
    InfiniteStatPoints,
    /// Each food awards 2 score instead of 1.
    DoubleScore,
}

impl Cheat {
    pub fn name(&self) -> &'static str {
        match self {
            Cheat::NoLosing => "no_losing",
            Cheat::InfiniteStatPoints => "infinite_stat_points",
            Cheat::DoubleScore => "double_score",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheatFlags {
    pub no_losing: bool,
    pub infinite_stat_points: bool,
    pub double_score: bool,
}

impl CheatFlags {
    pub fn is_enabled(&self, cheat: Cheat) -> bool {
        match cheat {
            Cheat::NoLosing => self.no_losing,
            Cheat::InfiniteStatPoints => self.infinite_stat_points,
            Cheat::DoubleScore => self.double_score,
        }
    }

    /// Flip one flag and return its new state.
    pub fn toggle(&mut self, cheat: Cheat) -> bool {
        let flag = match cheat {
            Cheat::NoLosing => &mut self.no_losing,
            Cheat::InfiniteStatPoints => &mut self.infinite_stat_points,
            Cheat::DoubleScore => &mut self.double_score,
        };
        *flag = !*flag;
        *flag
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn any_enabled(&self) -> bool {
        self.no_losing || self.infinite_stat_points || self.double_score
    }
}
