//! Game event system for decoupled communication with the presentation layer.
//!
//! Systems push an event whenever they mutate something a viewer would show
//! (bars, sprites, inventory). The shell drains the queue once per frame.

use glam::Vec2;
use hecs::Entity;

use crate::components::{BonusKind, EnemyKind, ItemKind};

/// Game events that systems emit
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An entity's HP changed
    HealthChanged {
        entity: Entity,
        current: i32,
        max: i32,
    },
    /// The player's energy changed
    EnergyChanged { current: i32 },
    /// The player's experience changed
    ExperienceChanged { current: u32, level: u32 },
    /// Player leveled up
    LevelUp { new_level: u32 },
    /// An entity moved
    Moved { entity: Entity, position: Vec2 },
    /// An entity attacked another entity
    AttackHit {
        attacker: Entity,
        target: Entity,
        damage: i32,
    },
    /// An enemy switched behavior phase
    AiStateChanged {
        entity: Entity,
        old_state: &'static str,
        new_state: &'static str,
    },
    /// An enemy was defeated and removed
    EnemyDied {
        entity: Entity,
        kind: EnemyKind,
        position: Vec2,
    },
    EnemySpawned {
        entity: Entity,
        kind: EnemyKind,
        position: Vec2,
    },
    CatSpawned { entity: Entity, position: Vec2 },
    /// A cat took food and started running
    CatFed { entity: Entity },
    /// A fleeing cat left the canvas
    CatGone { entity: Entity },
    /// The player died and was put back at the checkpoint
    PlayerReset { position: Vec2 },
    ItemReceived { kind: ItemKind, count: u32 },
    /// Loot was rolled but every slot is taken
    InventoryFull { kind: ItemKind },
    ItemUsed { kind: ItemKind },
    /// One unit was dropped from the inventory outside of use or wear
    ItemRemoved { kind: ItemKind },
    /// A stack ran out of uses and left the inventory
    ItemDepleted { kind: ItemKind },
    InventoryToggled { open: bool },
    BonusApplied {
        kind: BonusKind,
        magnitude: i32,
        expires_at: f32,
    },
    BonusExpired { kind: BonusKind },
}

/// Simple event queue - events are pushed during update, drained at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Peek at pending events without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
