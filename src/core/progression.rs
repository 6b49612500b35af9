use serde::{Deserialize, Serialize};

/// Permanent upgrades purchasable with stat points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    Speed,
    Size,
    Xp,
}

impl UpgradeKind {
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::Size => "size",
            UpgradeKind::Xp => "xp",
        }
    }
}

/// The progression and economy state of a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub score: u32,
    pub xp: u32,
    pub level: u32,
    pub xp_required: u32,
    pub stat_points: u32,
    pub speed_cost: u32,
    pub size_cost: u32,
    pub xp_cost: u32,
}

impl Progression {
    pub fn new(initial_xp_required: u32, initial_upgrade_cost: u32) -> Self {
        Self {
            score: 0,
            xp: 0,
            level: 1,
            xp_required: initial_xp_required,
            stat_points: 0,
            speed_cost: initial_upgrade_cost,
            size_cost: initial_upgrade_cost,
            xp_cost: initial_upgrade_cost,
        }
    }

    /// Score and xp for one food. Double-score affects the score gain
    /// only, never the xp gain.
    pub fn award_food(&mut self, xp_multiplier: u32, double_score: bool) -> u32 {
        let gained = if double_score { 2 } else { 1 };
        self.score += gained;
        self.xp += xp_multiplier;
        gained
    }

    /// Consume xp across as many thresholds as it covers. Returns the
    /// number of levels gained.
    pub fn apply_level_ups(&mut self, growth_factor: f32, points_per_level: u32) -> u32 {
        let mut gained = 0;
        while self.xp >= self.xp_required {
            self.xp -= self.xp_required;
            self.level += 1;
            self.stat_points += points_per_level;
            self.xp_required = (self.xp_required as f32 * growth_factor).floor() as u32;
            gained += 1;
        }
        gained
    }

    pub fn cost(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Speed => self.speed_cost,
            UpgradeKind::Size => self.size_cost,
            UpgradeKind::Xp => self.xp_cost,
        }
    }

    /// Escalate an upgrade's cost after a successful purchase.
    pub fn raise_cost(&mut self, kind: UpgradeKind, increment: u32) {
        match kind {
            UpgradeKind::Speed => self.speed_cost += increment,
            UpgradeKind::Size => self.size_cost += increment,
            UpgradeKind::Xp => self.xp_cost += increment,
        }
    }

    /// Lower the level-up threshold, never below 1.
    pub fn reduce_xp_required(&mut self, decrement: u32) {
        self.xp_required = self.xp_required.saturating_sub(decrement).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fresh_progression() {
        let p = Progression::new(10, 5);
        assert_eq!(p.score, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_required, 10);
        assert_eq!(p.speed_cost, 5);
        assert_eq!(p.size_cost, 5);
        assert_eq!(p.xp_cost, 5);
    }

    #[test]
    fn test_food_award() {
        let mut p = Progression::new(10, 5);
        assert_eq!(p.award_food(1, false), 1);
        assert_eq!(p.score, 1);
        assert_eq!(p.xp, 1);
    }

    #[test]
    fn test_double_score_leaves_xp_alone() {
        let mut p = Progression::new(10, 5);
        assert_eq!(p.award_food(1, true), 2);
        assert_eq!(p.score, 2);
        assert_eq!(p.xp, 1);
    }

    #[test]
    fn test_single_level_up() {
        // xp 8 + 5 against threshold 10: level 2, xp 3, threshold 15
        let mut p = Progression::new(10, 5);
        p.xp = 8;
        p.xp += 5;
        let gained = p.apply_level_ups(1.5, 0);
        assert_eq!(gained, 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 3);
        assert_eq!(p.xp_required, 15);
    }

    #[test]
    fn test_multiple_level_ups_in_one_gain() {
        let mut p = Progression::new(10, 5);
        p.xp = 30; // covers 10 then 15
        let gained = p.apply_level_ups(1.5, 5);
        assert_eq!(gained, 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 5);
        assert_eq!(p.xp_required, 22); // floor(15 * 1.5)
        assert_eq!(p.stat_points, 10);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut p = Progression::new(10, 5);
        p.xp = 9;
        assert_eq!(p.apply_level_ups(1.5, 5), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 9);
    }

    #[test]
    fn test_cost_escalation_is_per_upgrade() {
        let mut p = Progression::new(10, 5);
        p.raise_cost(UpgradeKind::Speed, 5);
        p.raise_cost(UpgradeKind::Speed, 5);
        assert_eq!(p.speed_cost, 15);
        assert_eq!(p.size_cost, 5);
        assert_eq!(p.xp_cost, 5);
    }

    #[test]
    fn test_xp_required_floor() {
        let mut p = Progression::new(2, 5);
        p.reduce_xp_required(1);
        assert_eq!(p.xp_required, 1);
        p.reduce_xp_required(1);
        assert_eq!(p.xp_required, 1);
    }
}
