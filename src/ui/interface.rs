use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::Config;
use crate::core::cheats::Cheat;
use crate::core::engine::{GameEngine, GamePhase};
use crate::core::grid::Direction;
use crate::core::progression::UpgradeKind;
use crate::ui::boundary::{draw_snapshot, update_stats, AudioCue};
use crate::ui::terminal::TerminalSurface;
use crate::utils::GameResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Quit,
    Handled,
    Ignored,
}

/// Map one key press onto an engine command. This is the whole input
/// boundary: the engine knows nothing about keys.
fn apply_key(engine: &mut GameEngine, code: KeyCode) -> KeyOutcome {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,

        KeyCode::Up | KeyCode::Char('w') => engine.set_direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => engine.set_direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => engine.set_direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => engine.set_direction(Direction::Right),

        KeyCode::Char(' ') | KeyCode::Enter => {
            if matches!(engine.phase(), GamePhase::Ready | GamePhase::GameOver) {
                engine.reset();
            }
        }
        KeyCode::Char('p') => engine.toggle_pause(),

        KeyCode::Char('1') => engine.purchase(UpgradeKind::Speed),
        KeyCode::Char('2') => engine.purchase(UpgradeKind::Size),
        KeyCode::Char('3') => engine.purchase(UpgradeKind::Xp),

        KeyCode::F(1) => {
            engine.toggle_cheat(Cheat::NoLosing);
        }
        KeyCode::F(2) => {
            engine.toggle_cheat(Cheat::InfiniteStatPoints);
        }
        KeyCode::F(3) => {
            engine.toggle_cheat(Cheat::DoubleScore);
        }
        KeyCode::F(4) => engine.disable_all_cheats(),

        _ => return KeyOutcome::Ignored,
    }
    KeyOutcome::Handled
}

/// How long the input poll may block. While running this is the time
/// left until the next due tick; in any idle phase a full interval, so
/// the loop sleeps between key events instead of spinning.
fn poll_timeout(phase: GamePhase, interval: Duration, since_tick: Duration) -> Duration {
    match phase {
        GamePhase::Running => interval.checked_sub(since_tick).unwrap_or(Duration::ZERO),
        _ => interval,
    }
}

/// Owns the engine and the terminal boundaries, and plays the external
/// scheduler role: poll input between ticks, dispatch `tick()` at the
/// engine's current period.
pub struct GameInterface {
    engine: GameEngine,
    surface: TerminalSurface,
    show_controls: bool,
}

impl GameInterface {
    pub fn new(config: Config) -> Self {
        let surface = TerminalSurface::new(
            config.game.grid_width,
            config.game.grid_height,
            config.ui.bell_on_food,
        );
        Self {
            engine: GameEngine::new(config.game),
            surface,
            show_controls: config.ui.show_controls,
        }
    }

    pub fn run(&mut self) -> GameResult<()> {
        self.surface.init()?;
        let result = self.run_loop();
        self.surface.restore()?;
        info!(
            "Session ended after {} recorded events",
            self.engine.events().get_event_count()
        );
        result
    }

    fn run_loop(&mut self) -> GameResult<()> {
        let mut last_tick = Instant::now();
        self.redraw()?;

        loop {
            let timeout = poll_timeout(
                self.engine.phase(),
                self.engine.tick_interval(),
                last_tick.elapsed(),
            );

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let was_running = self.engine.phase() == GamePhase::Running;
                        match apply_key(&mut self.engine, key.code) {
                            KeyOutcome::Quit => break,
                            KeyOutcome::Handled => {
                                // Entering Running (start, restart, resume)
                                // re-arms the tick clock so the first step
                                // comes a full period later.
                                if !was_running && self.engine.phase() == GamePhase::Running {
                                    last_tick = Instant::now();
                                }
                                self.redraw()?;
                            }
                            KeyOutcome::Ignored => {}
                        }
                    }
                }
            }

            if self.engine.phase() == GamePhase::Running
                && last_tick.elapsed() >= self.engine.tick_interval()
            {
                let outcome = self.engine.tick();
                last_tick = Instant::now();

                if outcome.ate_food {
                    self.surface.play_food_cue();
                }
                self.redraw()?;
            }
        }

        Ok(())
    }

    /// Full redraw: snapshot, HUD, cheat marker, phase banner.
    fn redraw(&mut self) -> GameResult<()> {
        let snapshot = self.engine.snapshot();
        draw_snapshot(&mut self.surface, &snapshot);
        update_stats(&mut self.surface, &self.engine.hud());
        self.surface
            .show_cheats_active(self.engine.cheats().any_enabled());
        if self.show_controls {
            self.surface.show_controls();
        }

        match self.engine.phase() {
            GamePhase::Ready => self.surface.show_banner(" press space to start "),
            GamePhase::Paused => self.surface.show_banner(" PAUSED "),
            GamePhase::GameOver => self.surface.show_banner(" GAME OVER - space restarts "),
            GamePhase::Running => {}
        }

        self.surface.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn engine() -> GameEngine {
        let mut engine = GameEngine::new(GameConfig::small());
        engine.reset();
        engine
    }

    #[test]
    fn test_quit_keys() {
        let mut engine = engine();
        assert_eq!(apply_key(&mut engine, KeyCode::Char('q')), KeyOutcome::Quit);
        assert_eq!(apply_key(&mut engine, KeyCode::Esc), KeyOutcome::Quit);
    }

    #[test]
    fn test_direction_keys() {
        let mut engine = engine();
        assert_eq!(apply_key(&mut engine, KeyCode::Up), KeyOutcome::Handled);
        engine.tick();
        assert_eq!(apply_key(&mut engine, KeyCode::Char('a')), KeyOutcome::Handled);
        engine.tick();
        // Now moving left; the next snapshot head should be left of the previous
        let before = engine.snapshot().snake[0];
        engine.tick();
        let after = engine.snapshot().snake[0];
        assert_eq!(after.x, before.x - 1);
    }

    #[test]
    fn test_space_starts_only_when_not_running() {
        let mut engine = GameEngine::new(GameConfig::small());
        assert_eq!(engine.phase(), GamePhase::Ready);

        apply_key(&mut engine, KeyCode::Char(' '));
        assert_eq!(engine.phase(), GamePhase::Running);

        // Mid-run, space is not a restart
        let hud = engine.hud();
        apply_key(&mut engine, KeyCode::Char(' '));
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.hud(), hud);
    }

    #[test]
    fn test_pause_key_toggles() {
        let mut engine = engine();
        apply_key(&mut engine, KeyCode::Char('p'));
        assert_eq!(engine.phase(), GamePhase::Paused);
        apply_key(&mut engine, KeyCode::Char('p'));
        assert_eq!(engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_cheat_keys() {
        let mut engine = engine();
        apply_key(&mut engine, KeyCode::F(1));
        apply_key(&mut engine, KeyCode::F(3));
        assert!(engine.cheats().no_losing);
        assert!(engine.cheats().double_score);

        apply_key(&mut engine, KeyCode::F(4));
        assert!(!engine.cheats().any_enabled());
    }

    #[test]
    fn test_poll_timeout_sleeps_in_idle_phases() {
        let interval = Duration::from_millis(200);
        // Long overdue; idle phases must still block for a full interval
        // rather than degenerate into a zero-timeout spin.
        let overdue = Duration::from_secs(5);
        assert_eq!(poll_timeout(GamePhase::Ready, interval, overdue), interval);
        assert_eq!(poll_timeout(GamePhase::Paused, interval, overdue), interval);
        assert_eq!(poll_timeout(GamePhase::GameOver, interval, overdue), interval);
    }

    #[test]
    fn test_poll_timeout_counts_down_while_running() {
        let interval = Duration::from_millis(200);
        assert_eq!(
            poll_timeout(GamePhase::Running, interval, Duration::from_millis(50)),
            Duration::from_millis(150)
        );
        // An overdue tick polls without blocking
        assert_eq!(
            poll_timeout(GamePhase::Running, interval, Duration::from_millis(350)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut engine = engine();
        assert_eq!(apply_key(&mut engine, KeyCode::Char('z')), KeyOutcome::Ignored);
    }
}
