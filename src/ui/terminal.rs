use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

use crate::core::grid::Cell;
use crate::ui::boundary::{AudioCue, DrawSurface, StatsDisplay};
use crate::utils::GameResult;

/// Crossterm-backed implementation of the drawing, display and audio
/// boundaries. Each grid cell occupies two terminal columns so the
/// playfield stays roughly square.
pub struct TerminalSurface {
    stdout: Stdout,
    grid_width: i32,
    grid_height: i32,
    bell_on_food: bool,
}

impl TerminalSurface {
    pub fn new(grid_width: i32, grid_height: i32, bell_on_food: bool) -> Self {
        Self {
            stdout: io::stdout(),
            grid_width,
            grid_height,
            bell_on_food,
        }
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> GameResult<()> {
        enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, Hide)?;
        Ok(())
    }

    /// Leave the alternate screen and restore the cooked terminal.
    pub fn restore(&mut self) -> GameResult<()> {
        execute!(self.stdout, Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }

    pub fn present(&mut self) -> GameResult<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn cell_origin(&self, cell: Cell) -> (u16, u16) {
        // One-column/one-row offset for the border
        (1 + (cell.x as u16) * 2, 1 + cell.y as u16)
    }

    fn hud_row(&self, line: u16) -> u16 {
        self.grid_height as u16 + 2 + line
    }

    fn draw_border(&mut self) {
        let inner = (self.grid_width as usize) * 2;
        let top = format!("╔{}╗", "═".repeat(inner));
        let bottom = format!("╚{}╝", "═".repeat(inner));

        queue!(self.stdout, MoveTo(0, 0), Print(&top)).ok();
        for y in 0..self.grid_height as u16 {
            queue!(
                self.stdout,
                MoveTo(0, 1 + y),
                Print("║"),
                MoveTo(1 + inner as u16, 1 + y),
                Print("║")
            )
            .ok();
        }
        queue!(
            self.stdout,
            MoveTo(0, 1 + self.grid_height as u16),
            Print(&bottom)
        )
        .ok();
    }

    /// Centered status line over the playfield (pause / game over).
    pub fn show_banner(&mut self, text: &str) {
        let col = ((self.grid_width as u16 * 2).saturating_sub(text.len() as u16)) / 2;
        let row = self.grid_height as u16 / 2;
        queue!(
            self.stdout,
            MoveTo(1 + col, 1 + row),
            SetForegroundColor(Color::Yellow),
            Print(text),
            ResetColor
        )
        .ok();
    }

    pub fn show_controls(&mut self) {
        let lines = [
            "arrows/wasd move   p pause   space start   q quit",
            "1 speed  2 size  3 xp   f1/f2/f3 cheats   f4 clear cheats",
        ];
        for (i, line) in lines.iter().enumerate() {
            let row = self.hud_row(5 + i as u16);
            queue!(
                self.stdout,
                MoveTo(0, row),
                SetForegroundColor(Color::DarkGrey),
                Print(line),
                ResetColor
            )
            .ok();
        }
    }

    pub fn show_cheats_active(&mut self, active: bool) {
        let text = if active { "CHEATS ACTIVE" } else { "             " };
        let row = self.hud_row(4);
        queue!(
            self.stdout,
            MoveTo(0, row),
            SetForegroundColor(Color::Magenta),
            Print(text),
            ResetColor
        )
        .ok();
    }
}

impl DrawSurface for TerminalSurface {
    fn clear(&mut self) {
        queue!(self.stdout, Clear(ClearType::All)).ok();
        self.draw_border();
    }

    fn fill_cell(&mut self, cell: Cell) {
        let (col, row) = self.cell_origin(cell);
        queue!(
            self.stdout,
            MoveTo(col, row),
            SetForegroundColor(Color::Green),
            Print("██"),
            ResetColor
        )
        .ok();
    }

    fn draw_food_sprite(&mut self, cell: Cell) {
        let (col, row) = self.cell_origin(cell);
        queue!(
            self.stdout,
            MoveTo(col, row),
            SetForegroundColor(Color::Red),
            Print("()"),
            ResetColor
        )
        .ok();
    }
}

impl StatsDisplay for TerminalSurface {
    fn show_score(&mut self, score: u32) {
        let row = self.hud_row(0);
        queue!(
            self.stdout,
            MoveTo(0, row),
            Print(format!("Score: {}        ", score))
        )
        .ok();
    }

    fn show_xp(&mut self, xp: u32, xp_required: u32) {
        let row = self.hud_row(1);
        queue!(
            self.stdout,
            MoveTo(0, row),
            Print(format!("XP: {} / {}        ", xp, xp_required))
        )
        .ok();
    }

    fn show_level(&mut self, level: u32) {
        let row = self.hud_row(2);
        queue!(
            self.stdout,
            MoveTo(0, row),
            Print(format!("Level: {}        ", level))
        )
        .ok();
    }

    fn show_stat_points(&mut self, stat_points: Option<u32>) {
        let row = self.hud_row(3);
        let text = match stat_points {
            Some(points) => format!("Stat Points: {}        ", points),
            None => "Stat Points: ∞        ".to_string(),
        };
        queue!(self.stdout, MoveTo(0, row), Print(text)).ok();
    }
}

impl AudioCue for TerminalSurface {
    fn play_food_cue(&mut self) {
        if self.bell_on_food {
            // Terminal bell, fire-and-forget
            queue!(self.stdout, Print("\x07")).ok();
        }
    }
}
