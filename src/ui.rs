//! Presentation boundary.
//!
//! The core never draws anything. It calls back through [`PlayerUi`] for the
//! few prompts it raises itself and exposes [`StatusBarData`] for bars.

/// Callbacks the simulation raises on the presentation layer
pub trait PlayerUi {
    /// Player tried to attack without enough energy
    fn show_energy_message(&mut self);
    /// Draw attention to the energy readout
    fn flash_energy_value(&mut self);
    fn show_item_description(&mut self, description: &str);
    fn hide_item_description(&mut self);
}

/// Discards every callback
#[derive(Debug, Default)]
pub struct NullUi;

impl PlayerUi for NullUi {
    fn show_energy_message(&mut self) {}
    fn flash_energy_value(&mut self) {}
    fn show_item_description(&mut self, _description: &str) {}
    fn hide_item_description(&mut self) {}
}

/// Writes callbacks to the log; used by the headless runner
#[derive(Debug, Default)]
pub struct LogUi;

impl PlayerUi for LogUi {
    fn show_energy_message(&mut self) {
        log::info!("Not enough energy to attack");
    }

    fn flash_energy_value(&mut self) {
        log::debug!("Energy readout flashed");
    }

    fn show_item_description(&mut self, description: &str) {
        log::info!("Item: {}", description.replace('\n', " | "));
    }

    fn hide_item_description(&mut self) {
        log::debug!("Item description hidden");
    }
}

/// Data needed to render the status bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBarData {
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub experience: u32,
    /// Fill of the experience bar toward the next level, 0.0..1.0
    pub experience_progress: f32,
    pub level: u32,
    pub strength: i32,
    pub dexterity: i32,
    pub intellect: i32,
}

impl StatusBarData {
    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}
