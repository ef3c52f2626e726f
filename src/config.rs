//! Per-session settings.
//!
//! Everything here has a sensible default, so a config file only needs the
//! keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::PlayerClass;
use crate::constants::*;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Seed for the session RNG; the same seed and input replay exactly
    pub seed: u64,
    /// Multiplier on enemy damage
    pub difficulty_factor: f32,
    pub initial_enemy_count: usize,
    pub initial_cat_count: usize,
    pub inventory_slots: usize,
    pub player_class: PlayerClass,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            seed: 0,
            difficulty_factor: DEFAULT_DIFFICULTY_FACTOR,
            initial_enemy_count: INITIAL_ENEMY_COUNT,
            initial_cat_count: INITIAL_CAT_COUNT,
            inventory_slots: DEFAULT_INVENTORY_SLOTS,
            player_class: PlayerClass::Technician,
        }
    }
}

impl SimConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(self.canvas_width > CHARACTER_SIZE && self.canvas_height > CHARACTER_SIZE) {
            return Err(GameError::CanvasNotReady {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !self.difficulty_factor.is_finite() || self.difficulty_factor < 0.0 {
            return Err(GameError::Config(format!(
                "difficulty_factor must be a non-negative number, got {}",
                self.difficulty_factor
            )));
        }
        if self.inventory_slots == 0 {
            return Err(GameError::Config(
                "inventory_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
