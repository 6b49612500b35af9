use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::grid::Cell;
use crate::utils::{GameError, GameResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Simulation parameters: grid geometry, tick timing, and the
/// progression economy constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub base_tick_ms: u64,
    pub min_tick_ms: u64,
    pub speed_step_ms: u64,
    pub xp_multiplier: u32,
    pub initial_xp_required: u32,
    pub xp_growth_factor: f32,
    pub xp_purchase_decrement: u32,
    pub initial_upgrade_cost: u32,
    pub cost_increment: u32,
    pub stat_points_per_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub show_controls: bool,
    pub bell_on_food: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 28,
            grid_height: 18,
            base_tick_ms: 200,
            min_tick_ms: 50,
            speed_step_ms: 10,
            xp_multiplier: 1,
            initial_xp_required: 10,
            xp_growth_factor: 1.5,
            xp_purchase_decrement: 1,
            initial_upgrade_cost: 5,
            cost_increment: 5,
            stat_points_per_level: 5,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_controls: true,
            bell_on_food: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// A small grid for tests.
    pub fn small() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            ..Default::default()
        }
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.grid_width / 2, self.grid_height / 2)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.grid_width && cell.y >= 0 && cell.y < self.grid_height
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create a default config file on first run
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GameError::configuration(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| GameError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.game.grid_width < 8 || self.game.grid_height < 8 {
            return Err(GameError::configuration("Grid must be at least 8x8"));
        }
        if self.game.min_tick_ms == 0 {
            return Err(GameError::configuration(
                "Minimum tick period must be greater than 0",
            ));
        }
        if self.game.base_tick_ms < self.game.min_tick_ms {
            return Err(GameError::configuration(
                "Base tick period must not be below the minimum",
            ));
        }
        if self.game.xp_growth_factor <= 1.0 {
            return Err(GameError::configuration(
                "XP growth factor must be greater than 1.0",
            ));
        }
        if self.game.initial_xp_required == 0 {
            return Err(GameError::configuration(
                "Initial XP requirement must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
    }
}

// Configuration overridable by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub debug: bool,
}
