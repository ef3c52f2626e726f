//! Level geometry: the canvas, static obstacles and initial spawn points.
//!
//! A level is built once by a [`LevelSource`] and then only read by the
//! simulation. Obstacles block the player; enemies ignore them.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::*;
use crate::error::{GameError, GameResult};

/// Axis-aligned rectangle in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Static layout consumed by the simulation
#[derive(Debug, Clone)]
pub struct Level {
    pub width: f32,
    pub height: f32,
    pub obstacles: Vec<Rect>,
    pub enemy_spawns: Vec<Vec2>,
    pub cat_spawns: Vec<Vec2>,
}

impl Level {
    /// An empty room of the given size
    pub fn open(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
            enemy_spawns: Vec::new(),
            cat_spawns: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, rect: Rect) -> Self {
        self.obstacles.push(rect);
        self
    }

    pub fn validate(&self) -> GameResult<()> {
        if !(self.width > CHARACTER_SIZE && self.height > CHARACTER_SIZE) {
            return Err(GameError::CanvasNotReady {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Whether a character box at `rect` stays fully on the canvas
    pub fn in_bounds(&self, rect: &Rect) -> bool {
        rect.min.x >= 0.0
            && rect.min.y >= 0.0
            && rect.max.x <= self.width
            && rect.max.y <= self.height
    }

    pub fn blocked_by_obstacle(&self, rect: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.intersects(rect))
    }
}

/// Produces levels for a session. Layout generation lives behind this seam.
pub trait LevelSource {
    fn generate(&self, width: f32, height: f32, rng: &mut StdRng) -> GameResult<Level>;

    /// Name for logging
    fn source_name(&self) -> &'static str;
}

/// Scatters square pillars over the canvas, keeping the checkpoint corner clear
pub struct ScatteredPillars {
    pub pillar_count: usize,
    pub pillar_size: f32,
}

impl Default for ScatteredPillars {
    fn default() -> Self {
        Self {
            pillar_count: 4,
            pillar_size: 60.0,
        }
    }
}

impl LevelSource for ScatteredPillars {
    fn generate(&self, width: f32, height: f32, rng: &mut StdRng) -> GameResult<Level> {
        let mut level = Level::open(width, height);
        level.validate()?;

        let checkpoint = Rect::new(
            PLAYER_CHECKPOINT.0,
            PLAYER_CHECKPOINT.1,
            CHARACTER_SIZE * 2.0,
            CHARACTER_SIZE * 2.0,
        );
        let max_x = (width - self.pillar_size).max(0.0);
        let max_y = (height - self.pillar_size).max(0.0);

        let mut attempts = 0;
        while level.obstacles.len() < self.pillar_count && attempts < SPAWN_SEARCH_ATTEMPTS {
            attempts += 1;
            let pillar = Rect::new(
                rng.gen_range(0.0..=max_x),
                rng.gen_range(0.0..=max_y),
                self.pillar_size,
                self.pillar_size,
            );
            if pillar.intersects(&checkpoint) || level.blocked_by_obstacle(&pillar) {
                continue;
            }
            level.obstacles.push(pillar);
        }

        log::debug!(
            "{} placed {} pillars in {} attempts",
            self.source_name(),
            level.obstacles.len(),
            attempts
        );
        Ok(level)
    }

    fn source_name(&self) -> &'static str {
        "scattered-pillars"
    }
}
