pub mod cheats;
pub mod engine;
pub mod events;
pub mod grid;
pub mod progression;

pub use cheats::{Cheat, CheatFlags};
pub use engine::{GameEngine, GamePhase, HudStats, RenderSnapshot, TickOutcome};
pub use events::{GameEvent, GameEventHandler};
pub use grid::{Cell, Direction, Snake};
pub use progression::{Progression, UpgradeKind};
