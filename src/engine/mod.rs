//! Game session - owns all game state and provides a clean API to the shell.
//!
//! The session handles:
//! - Game state (world, level, clock, timers, RNG)
//! - Input processing
//! - Simulation advancement
//! - Event buffering for the presentation layer
//!
//! The shell only forwards input snapshots and frame deltas, renders what it
//! drains from the event queue, and implements [`PlayerUi`].

mod game_state;
pub mod initialization;
mod simulation;

pub use game_state::GameState;
pub use simulation::*;

use glam::Vec2;

use crate::components::{
    Cat, Enemy, Energy, Experience, Health, Inventory, InventoryEntry, ItemKind, Position, Stats,
};
use crate::config::SimConfig;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::input::InputState;
use crate::level::LevelSource;
use crate::systems::{inventory, xp_progress};
use crate::ui::{PlayerUi, StatusBarData};

/// One play session: a world, its clock and the presentation hooks
pub struct Session {
    /// Core game state
    pub state: GameState,

    /// Events since the last drain
    pub events: EventQueue,

    config: SimConfig,
    ui: Box<dyn PlayerUi>,
    panel: InventoryPanel,
}

impl Session {
    /// Start a session. Fails only on bad configuration or an unusable level.
    pub fn new(
        config: SimConfig,
        level_source: &dyn LevelSource,
        ui: Box<dyn PlayerUi>,
    ) -> GameResult<Self> {
        let mut events = EventQueue::new();
        let state = GameState::new(&config, level_source, &mut events)?;
        log::info!(
            "Session started (seed {}, level from {})",
            config.seed,
            level_source.source_name()
        );
        Ok(Self {
            state,
            events,
            config,
            ui,
            panel: InventoryPanel::default(),
        })
    }

    /// Advance the simulation by `dt` seconds with this frame's input
    pub fn tick(&mut self, dt: f32, input: &InputState) {
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("Ignoring frame with dt = {}", dt);
            return;
        }
        run_frame(
            &mut self.state,
            input,
            dt,
            &mut self.panel,
            self.ui.as_mut(),
            &mut self.events,
        );
    }

    pub fn now(&self) -> f32 {
        self.state.now()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn inventory_open(&self) -> bool {
        self.panel.open
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Values for the HP/energy/experience bars
    pub fn status(&self) -> GameResult<StatusBarData> {
        let player = self.state.player_entity;
        let mut query = self
            .state
            .world
            .query_one::<(&Health, &Energy, &Experience, &Stats)>(player)
            .map_err(|_| GameError::missing::<Health>(player))?;
        let (health, energy, exp, stats) = query
            .get()
            .ok_or_else(|| GameError::missing::<Stats>(player))?;
        Ok(StatusBarData {
            health: health.current(),
            max_health: health.max(),
            energy: energy.current(),
            experience: exp.current,
            experience_progress: xp_progress(exp),
            level: exp.level,
            strength: stats.strength,
            dexterity: stats.dexterity,
            intellect: stats.intellect,
        })
    }

    pub fn player_position(&self) -> GameResult<Vec2> {
        let player = self.state.player_entity;
        self.state
            .world
            .get::<&Position>(player)
            .map(|p| p.as_vec())
            .map_err(|_| GameError::missing::<Position>(player))
    }

    pub fn inventory(&self) -> GameResult<Vec<InventoryEntry>> {
        inventory_snapshot(&self.state)
    }

    /// Put items into the player's inventory from outside the simulation
    pub fn add_item(&mut self, kind: ItemKind, count: u32) -> GameResult<bool> {
        inventory::give_item(
            &mut self.state.world,
            self.state.player_entity,
            kind,
            count,
            &mut self.events,
        )
    }

    /// Drop one unit of `kind`. Returns false if none was held.
    pub fn remove_item(&mut self, kind: ItemKind) -> GameResult<bool> {
        let player = self.state.player_entity;
        let mut inv = self
            .state
            .world
            .get::<&mut Inventory>(player)
            .map_err(|_| GameError::missing::<Inventory>(player))?;
        let removed = inv.remove_item(kind);
        if removed {
            self.events.push(GameEvent::ItemRemoved { kind });
        }
        Ok(removed)
    }

    pub fn enemy_count(&self) -> usize {
        self.state.world.query::<&Enemy>().iter().count()
    }

    pub fn cat_count(&self) -> usize {
        self.state.world.query::<&Cat>().iter().count()
    }
}
