//! Inventory systems: granting items, loot rolls and wear.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Inventory, ItemKind};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::systems::item_defs;

/// What one unit of wear did to a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    /// The unit in hand still has uses left
    Worn,
    /// The unit ran out; the next one in the stack took its place
    UnitSpent,
    /// The last unit ran out and the slot was freed
    Depleted,
    /// Nothing of that kind was held
    Missing,
}

/// Spend one use of `kind`. When the unit in hand runs out, one unit
/// leaves the stack and the next starts with fresh durability.
pub fn wear(inventory: &mut Inventory, kind: ItemKind) -> Wear {
    let Some(entry) = inventory.entry_mut(kind) else {
        return Wear::Missing;
    };
    entry.durability = entry.durability.saturating_sub(1);
    if entry.durability > 0 {
        return Wear::Worn;
    }

    inventory.remove_item(kind);
    match inventory.entry_mut(kind) {
        Some(next) => {
            next.durability = item_defs::get_def(kind).durability;
            Wear::UnitSpent
        }
        None => Wear::Depleted,
    }
}

/// Highest-damage pen held, if any
pub fn best_pen(inventory: &Inventory) -> Option<(ItemKind, i32)> {
    inventory
        .get_all_items()
        .iter()
        .filter_map(|e| item_defs::pen_damage(e.kind).map(|d| (e.kind, d)))
        .max_by_key(|&(_, damage)| damage)
}

/// Wear an item on an entity's inventory and report depletion
pub fn wear_item(
    world: &mut World,
    entity: Entity,
    kind: ItemKind,
    events: &mut EventQueue,
) -> GameResult<Wear> {
    let mut inventory = world
        .get::<&mut Inventory>(entity)
        .map_err(|_| GameError::missing::<Inventory>(entity))?;
    let result = wear(&mut inventory, kind);
    if result == Wear::Depleted {
        log::debug!("{:?} used up", kind);
        events.push(GameEvent::ItemDepleted { kind });
    }
    Ok(result)
}

/// Add `count` of `kind` to an entity's inventory. Returns false (and the
/// items are lost) when no slot is free.
pub fn give_item(
    world: &mut World,
    entity: Entity,
    kind: ItemKind,
    count: u32,
    events: &mut EventQueue,
) -> GameResult<bool> {
    let mut inventory = world
        .get::<&mut Inventory>(entity)
        .map_err(|_| GameError::missing::<Inventory>(entity))?;

    let durability = item_defs::get_def(kind).durability;
    if inventory.add_item(kind, count, durability) {
        log::debug!("Received {} x{}", item_defs::get_def(kind).name, count);
        events.push(GameEvent::ItemReceived { kind, count });
        Ok(true)
    } else {
        log::warn!(
            "Inventory full ({} slots); {} lost",
            inventory.max_slots(),
            item_defs::get_def(kind).name
        );
        events.push(GameEvent::InventoryFull { kind });
        Ok(false)
    }
}

/// Roll a `chance` percent drop. A hit grants a uniformly chosen kind,
/// 1-2 of it. Returns what was rolled, whether or not it fit.
pub fn roll_loot(
    world: &mut World,
    entity: Entity,
    chance: u8,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> GameResult<Option<(ItemKind, u32)>> {
    if rng.gen_range(0..100u8) >= chance {
        return Ok(None);
    }
    let Some(&kind) = ItemKind::ALL.choose(rng) else {
        return Ok(None);
    };
    let count = rng.gen_range(LOOT_COUNT_MIN..=LOOT_COUNT_MAX);
    give_item(world, entity, kind, count, events)?;
    Ok(Some((kind, count)))
}
