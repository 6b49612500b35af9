use rand::rngs::ThreadRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::cheats::{Cheat, CheatFlags};
use crate::core::events::{EventLogger, GameEvent, GameEventHandler};
use crate::core::grid::{Cell, Direction, Snake};
use crate::core::progression::{Progression, UpgradeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Constructed but not started; waiting for the first reset.
    Ready,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

impl CollisionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "wall",
            CollisionKind::SelfCollision => "self_collision",
        }
    }
}

/// Full-redraw instruction for the drawing boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
}

/// Values for the display boundary. `stat_points` is None while the
/// infinite-stat-points cheat reports the pool as unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudStats {
    pub score: u32,
    pub xp: u32,
    pub xp_required: u32,
    pub level: u32,
    pub stat_points: Option<u32>,
}

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub moved: bool,
    pub ate_food: bool,
    pub levels_gained: u32,
    pub collision: Option<CollisionKind>,
    pub game_over: bool,
    /// A no-losing rescue replaced the terminal collision with a fresh run.
    pub restarted: bool,
}

impl TickOutcome {
    fn skipped() -> Self {
        Self {
            moved: false,
            ate_food: false,
            levels_gained: 0,
            collision: None,
            game_over: false,
            restarted: false,
        }
    }
}

/// The simulation core. Exclusively owns all mutable game state; driven
/// by an external scheduler calling `tick()` once per period.
pub struct GameEngine {
    config: GameConfig,
    rng: ThreadRng,
    phase: GamePhase,
    snake: Snake,
    food: Cell,
    direction: Direction,
    pending_direction: Direction,
    progression: Progression,
    cheats: CheatFlags,
    tick_ms: u64,
    events: EventLogger,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = rand::thread_rng();
        let snake = Snake::new(config.center());
        let food = Self::sample_food(&mut rng, &config, &snake);

        Self {
            progression: Progression::new(config.initial_xp_required, config.initial_upgrade_cost),
            tick_ms: config.base_tick_ms,
            config,
            rng,
            phase: GamePhase::Ready,
            snake,
            food,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            cheats: CheatFlags::default(),
            events: EventLogger::default(),
        }
    }

    /// Start a fresh run: single-cell snake at the grid center, new food,
    /// zeroed progression, base speed, all cheats off.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.config.center());
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.food = Self::sample_food(&mut self.rng, &self.config, &self.snake);
        self.progression =
            Progression::new(self.config.initial_xp_required, self.config.initial_upgrade_cost);
        self.cheats.clear_all();
        self.tick_ms = self.config.base_tick_ms;
        self.phase = GamePhase::Running;

        self.events.handle_event(&GameEvent::run_started(
            self.config.grid_width,
            self.config.grid_height,
        ));
        info!(
            "Run started on {}x{} grid",
            self.config.grid_width, self.config.grid_height
        );
    }

    /// Accept a direction input. Rejected while not running, and rejected
    /// when it reverses the direction currently being applied.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        if self.direction.is_opposite(direction) {
            return;
        }
        self.pending_direction = direction;
    }

    /// One simulation step. No-op unless running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::skipped();
        }

        self.direction = self.pending_direction;
        let new_head = self.snake.head().step(self.direction);

        let ate_food = new_head == self.food;
        let mut levels_gained = 0;

        if ate_food {
            self.snake.advance(new_head, true);
            self.food = Self::sample_food(&mut self.rng, &self.config, &self.snake);

            let old_level = self.progression.level;
            self.progression
                .award_food(self.config.xp_multiplier, self.cheats.double_score);
            levels_gained = self.progression.apply_level_ups(
                self.config.xp_growth_factor,
                self.config.stat_points_per_level,
            );

            self.events.handle_event(&GameEvent::food_eaten(
                new_head,
                self.progression.score,
                self.progression.xp,
            ));
            if levels_gained > 0 {
                self.events.handle_event(&GameEvent::level_up(
                    old_level,
                    self.progression.level,
                    self.progression.xp_required,
                ));
                info!(
                    "Level up: {} -> {} (next threshold {})",
                    old_level, self.progression.level, self.progression.xp_required
                );
            }
        } else {
            self.snake.advance(new_head, false);
        }

        let collision = self.check_collision(new_head);
        if let Some(kind) = collision {
            if self.cheats.no_losing {
                debug!("Collision ({}) suppressed by no_losing, restarting", kind.name());
                self.reset();
                return TickOutcome {
                    moved: true,
                    ate_food,
                    levels_gained,
                    collision,
                    game_over: false,
                    restarted: true,
                };
            }

            self.phase = GamePhase::GameOver;
            self.events.handle_event(&GameEvent::game_over(
                kind.name(),
                self.progression.score,
                self.progression.level,
            ));
            info!(
                "Game over ({}) at score {}, level {}",
                kind.name(),
                self.progression.score,
                self.progression.level
            );
            return TickOutcome {
                moved: true,
                ate_food,
                levels_gained,
                collision,
                game_over: true,
                restarted: false,
            };
        }

        TickOutcome {
            moved: true,
            ate_food,
            levels_gained,
            collision: None,
            game_over: false,
            restarted: false,
        }
    }

    /// Spend stat points on a permanent upgrade. Silently rejected when
    /// unaffordable. Accepted in any phase, matching the always-live
    /// upgrade controls.
    pub fn purchase(&mut self, kind: UpgradeKind) {
        let cost = self.progression.cost(kind);
        let unlimited = self.cheats.infinite_stat_points;

        if !unlimited && self.progression.stat_points < cost {
            return;
        }
        if !unlimited {
            self.progression.stat_points -= cost;
        }

        match kind {
            UpgradeKind::Speed => {
                self.tick_ms = self
                    .tick_ms
                    .saturating_sub(self.config.speed_step_ms)
                    .max(self.config.min_tick_ms);
            }
            UpgradeKind::Size => {
                self.snake.duplicate_tail();
            }
            UpgradeKind::Xp => {
                self.progression
                    .reduce_xp_required(self.config.xp_purchase_decrement);
            }
        }
        self.progression.raise_cost(kind, self.config.cost_increment);

        self.events.handle_event(&GameEvent::upgrade_purchased(
            kind.name(),
            cost,
            self.hud().stat_points,
        ));
        debug!("Purchased {} upgrade for {} stat points", kind.name(), cost);
    }

    /// Flip one cheat flag and return its new state.
    pub fn toggle_cheat(&mut self, cheat: Cheat) -> bool {
        let enabled = self.cheats.toggle(cheat);
        self.events
            .handle_event(&GameEvent::cheat_toggled(cheat.name(), enabled));
        debug!("Cheat {} {}", cheat.name(), if enabled { "on" } else { "off" });
        enabled
    }

    /// Clear every cheat flag. The finite stat-point value recorded
    /// underneath the infinite-points override becomes visible again.
    pub fn disable_all_cheats(&mut self) {
        self.cheats.clear_all();
        self.events.handle_event(&GameEvent::cheats_cleared());
        debug!("All cheats disabled");
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            self.events.handle_event(&GameEvent::paused());
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.events.handle_event(&GameEvent::resumed());
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn cheats(&self) -> CheatFlags {
        self.cheats
    }

    pub fn grid_size(&self) -> (i32, i32) {
        (self.config.grid_width, self.config.grid_height)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            snake: self.snake.cells().copied().collect(),
            food: self.food,
        }
    }

    pub fn hud(&self) -> HudStats {
        HudStats {
            score: self.progression.score,
            xp: self.progression.xp,
            xp_required: self.progression.xp_required,
            level: self.progression.level,
            stat_points: if self.cheats.infinite_stat_points {
                None
            } else {
                Some(self.progression.stat_points)
            },
        }
    }

    pub fn events(&self) -> &EventLogger {
        &self.events
    }

    fn check_collision(&self, head: Cell) -> Option<CollisionKind> {
        if !self.config.in_bounds(head) {
            return Some(CollisionKind::Wall);
        }
        if self.snake.collides_with_body(head) {
            return Some(CollisionKind::SelfCollision);
        }
        None
    }

    /// Uniform rejection sampling over the grid until a free cell is hit.
    fn sample_food(rng: &mut ThreadRng, config: &GameConfig, snake: &Snake) -> Cell {
        loop {
            let cell = Cell::new(
                rng.gen_range(0..config.grid_width),
                rng.gen_range(0..config.grid_height),
            );
            if !snake.contains(cell) {
                return cell;
            }
        }
    }
}
