//! Core game state - owns the simulation data.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::error::GameResult;
use crate::events::EventQueue;
use crate::level::{Level, LevelSource};
use crate::time_system::{GameClock, TimerScheduler};

use super::initialization;

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world
    pub world: World,

    /// Static geometry and spawn points
    pub level: Level,

    /// Player entity handle
    pub player_entity: Entity,

    /// Game clock (simulation time)
    pub game_clock: GameClock,

    /// Every periodic timer, keyed by entity
    pub timers: TimerScheduler,

    /// Session RNG; all random draws go through it
    pub rng: StdRng,

    /// Multiplier on enemy damage
    pub difficulty: f32,
}

impl GameState {
    /// Generate a level, spawn the player and the initial population, and
    /// arm the player's timers.
    pub fn new(
        config: &SimConfig,
        level_source: &dyn LevelSource,
        events: &mut EventQueue,
    ) -> GameResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let level = level_source.generate(config.canvas_width, config.canvas_height, &mut rng)?;
        level.validate()?;

        let game_clock = GameClock::new();
        let mut timers = TimerScheduler::new();
        let (world, player_entity) = initialization::init_world(
            config,
            &level,
            &mut timers,
            game_clock.time,
            &mut rng,
            events,
        );

        Ok(Self {
            world,
            level,
            player_entity,
            game_clock,
            timers,
            rng,
            difficulty: config.difficulty_factor,
        })
    }

    /// Current simulation time
    pub fn now(&self) -> f32 {
        self.game_clock.time
    }
}
