//! Game systems organized by domain.
//!
//! This module contains all game logic systems, split into focused submodules:
//! - `ai`: Enemy chase/wander/wait state machine
//! - `cats`: Cat feeding and fleeing
//! - `combat`: Damage, attacks, death resolution and the player reset
//! - `effects`: Timed bonuses and passive regeneration
//! - `experience`: XP, leveling, and the death penalty
//! - `inventory`: Granting items, loot rolls and wear
//! - `item_defs`: The static item catalogue
//! - `items`: Using items
//! - `movement`: Player collision resolution and enemy canvas clamping

pub mod ai;
pub mod cats;
pub mod combat;
pub mod effects;
pub mod experience;
pub mod inventory;
pub mod item_defs;
pub mod items;
pub mod movement;

// Re-export commonly used items
pub use combat::{check_player_death, player_attack, remove_dead_entities, AttackOutcome};
pub use experience::xp_progress;
pub use items::{use_item, ItemUseResult};
pub use movement::{move_player, MoveResult};
