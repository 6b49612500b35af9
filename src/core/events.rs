use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::grid::Cell;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventType {
    RunStarted,
    FoodEaten,
    LevelUp,
    UpgradePurchased,
    CheatToggled,
    CheatsCleared,
    Paused,
    Resumed,
    GameOver,
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    // Convenience constructors for common events

    pub fn run_started(grid_width: i32, grid_height: i32) -> Self {
        let data = serde_json::json!({
            "grid_width": grid_width,
            "grid_height": grid_height
        });
        Self::new(GameEventType::RunStarted, data)
    }

    pub fn food_eaten(cell: Cell, score: u32, xp: u32) -> Self {
        let data = serde_json::json!({
            "cell": cell,
            "score": score,
            "xp": xp
        });
        Self::new(GameEventType::FoodEaten, data)
    }

    pub fn level_up(old_level: u32, new_level: u32, xp_required: u32) -> Self {
        let data = serde_json::json!({
            "old_level": old_level,
            "new_level": new_level,
            "xp_required": xp_required
        });
        Self::new(GameEventType::LevelUp, data)
    }

    pub fn upgrade_purchased(upgrade: &str, cost: u32, stat_points_left: Option<u32>) -> Self {
        let data = serde_json::json!({
            "upgrade": upgrade,
            "cost": cost,
            "stat_points_left": stat_points_left
        });
        Self::new(GameEventType::UpgradePurchased, data)
    }

    pub fn cheat_toggled(cheat: &str, enabled: bool) -> Self {
        let data = serde_json::json!({
            "cheat": cheat,
            "enabled": enabled
        });
        Self::new(GameEventType::CheatToggled, data)
    }

    pub fn cheats_cleared() -> Self {
        Self::new(GameEventType::CheatsCleared, serde_json::Value::Null)
    }

    pub fn paused() -> Self {
        Self::new(GameEventType::Paused, serde_json::Value::Null)
    }

    pub fn resumed() -> Self {
        Self::new(GameEventType::Resumed, serde_json::Value::Null)
    }

    pub fn game_over(cause: &str, score: u32, level: u32) -> Self {
        let data = serde_json::json!({
            "cause": cause,
            "score": score,
            "level": level
        });
        Self::new(GameEventType::GameOver, data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Bounded in-memory event history.
pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn get_events_by_type(&self, event_type: &GameEventType) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| {
                std::mem::discriminant(&event.event_type) == std::mem::discriminant(event_type)
            })
            .collect()
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_eaten_event() {
        let event = GameEvent::food_eaten(Cell::new(3, 4), 7, 12);

        assert!(matches!(event.event_type, GameEventType::FoodEaten));
        assert_eq!(event.data["cell"]["x"], 3);
        assert_eq!(event.data["cell"]["y"], 4);
        assert_eq!(event.data["score"], 7);
    }

    #[test]
    fn test_cheat_toggled_event() {
        let event = GameEvent::cheat_toggled("no_losing", true);

        assert!(matches!(event.event_type, GameEventType::CheatToggled));
        assert_eq!(event.data["cheat"], "no_losing");
        assert_eq!(event.data["enabled"], true);
    }

    #[test]
    fn test_event_logger_caps_history() {
        let mut logger = EventLogger::new(3);

        logger.handle_event(&GameEvent::level_up(1, 2, 15));
        logger.handle_event(&GameEvent::level_up(2, 3, 22));
        logger.handle_event(&GameEvent::level_up(3, 4, 33));
        assert_eq!(logger.get_event_count(), 3);

        // One more drops the oldest
        logger.handle_event(&GameEvent::level_up(4, 5, 49));
        assert_eq!(logger.get_event_count(), 3);
        assert_eq!(logger.get_events()[0].data["old_level"], 2);
    }

    #[test]
    fn test_event_filtering() {
        let mut logger = EventLogger::default();

        logger.handle_event(&GameEvent::run_started(20, 15));
        logger.handle_event(&GameEvent::paused());
        logger.handle_event(&GameEvent::resumed());
        logger.handle_event(&GameEvent::paused());

        let paused = logger.get_events_by_type(&GameEventType::Paused);
        assert_eq!(paused.len(), 2);

        let started = logger.get_events_by_type(&GameEventType::RunStarted);
        assert_eq!(started.len(), 1);
    }
}
