use crate::core::engine::{HudStats, RenderSnapshot};
use crate::core::grid::Cell;

/// The drawing surface the simulation renders onto. One full redraw per
/// tick; no partial-redraw contract.
pub trait DrawSurface {
    fn clear(&mut self);
    fn fill_cell(&mut self, cell: Cell);
    fn draw_food_sprite(&mut self, cell: Cell);
}

/// Plain text sinks for the progression values.
pub trait StatsDisplay {
    fn show_score(&mut self, score: u32);
    fn show_xp(&mut self, xp: u32, xp_required: u32);
    fn show_level(&mut self, level: u32);
    /// None means the pool is currently unbounded.
    fn show_stat_points(&mut self, stat_points: Option<u32>);
}

/// Fire-and-forget audio trigger.
pub trait AudioCue {
    fn play_food_cue(&mut self);
}

/// Push one full redraw of the snapshot: clear, snake cells, food sprite.
pub fn draw_snapshot<S: DrawSurface>(surface: &mut S, snapshot: &RenderSnapshot) {
    surface.clear();
    for &cell in &snapshot.snake {
        surface.fill_cell(cell);
    }
    surface.draw_food_sprite(snapshot.food);
}

/// Refresh every display sink from the HUD values.
pub fn update_stats<D: StatsDisplay>(display: &mut D, hud: &HudStats) {
    display.show_score(hud.score);
    display.show_xp(hud.xp, hud.xp_required);
    display.show_level(hud.level);
    display.show_stat_points(hud.stat_points);
}
