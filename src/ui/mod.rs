pub mod boundary;
pub mod interface;
pub mod terminal;

pub use boundary::{AudioCue, DrawSurface, StatsDisplay};
pub use interface::GameInterface;
pub use terminal::TerminalSurface;
