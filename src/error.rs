//! Error type shared by the simulation core.

use hecs::Entity;

/// Failures a session can report. Recoverable shortfalls (no spawn point,
/// not enough energy, full inventory) are outcomes, not errors.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid JSON for `SimConfig`
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The level has no usable area
    #[error("Canvas not ready: {width}x{height}")]
    CanvasNotReady { width: f32, height: f32 },

    /// A system expected a component the entity does not carry
    #[error("Entity {entity:?} is missing component {component}")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
}

impl GameError {
    pub fn missing<T>(entity: Entity) -> Self {
        GameError::MissingComponent {
            entity,
            component: std::any::type_name::<T>(),
        }
    }
}

/// Result type used throughout the simulation core.
pub type GameResult<T> = Result<T, GameError>;
