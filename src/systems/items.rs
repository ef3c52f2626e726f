//! Item use.

use hecs::{Entity, World};

use crate::components::{BonusKind, Energy, Health, Inventory, ItemKind, Stats};
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::systems::item_defs::{self, ItemCategory};
use crate::systems::{effects, experience, inventory};
use crate::time_system::TimerScheduler;

/// Result of attempting to use an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUseResult {
    /// Effects applied and one use consumed
    Used,
    /// The player holds none of that kind
    NotInInventory,
    /// Pens are held, not used
    NotUsable,
}

/// Use one unit of `kind` from the player's inventory: instant deltas,
/// experience, then timed bonuses, then one point of durability.
pub fn use_item(
    world: &mut World,
    player: Entity,
    kind: ItemKind,
    now: f32,
    timers: &mut TimerScheduler,
    events: &mut EventQueue,
) -> GameResult<ItemUseResult> {
    let held = world
        .get::<&Inventory>(player)
        .map_err(|_| GameError::missing::<Inventory>(player))?
        .contains(kind);
    if !held {
        return Ok(ItemUseResult::NotInInventory);
    }
    if !item_defs::is_usable(kind) {
        log::warn!("{} cannot be used", item_defs::get_def(kind).name);
        return Ok(ItemUseResult::NotUsable);
    }

    let def = item_defs::get_def(kind);
    log::debug!("Using {}", def.name);

    {
        let (health, energy, stats) = world
            .query_one_mut::<(&mut Health, &mut Energy, &mut Stats)>(player)
            .map_err(|_| GameError::missing::<Stats>(player))?;

        if def.health_bonus != 0 {
            health.heal(def.health_bonus);
            events.push(GameEvent::HealthChanged {
                entity: player,
                current: health.current(),
                max: health.max(),
            });
        }
        if def.energy_bonus != 0 {
            energy.add(def.energy_bonus);
            events.push(GameEvent::EnergyChanged {
                current: energy.current(),
            });
        }
        stats.intellect = (stats.intellect + def.intellect_bonus).max(0);
        stats.dexterity = (stats.dexterity + def.dexterity_bonus).max(0);
    }

    if def.exp_bonus > 0 {
        experience::grant_player_xp(world, player, def.exp_bonus, events)?;
    }

    let timed = [
        (BonusKind::EnergyRegen, def.energy_regen_bonus),
        (BonusKind::HealthRegen, def.health_regen_bonus),
        (
            BonusKind::Damage,
            if def.category == ItemCategory::Food {
                def.damage_bonus
            } else {
                0
            },
        ),
    ];
    for (bonus_kind, magnitude) in timed {
        if magnitude != 0 && def.duration > 0.0 {
            effects::apply_timed_bonus(
                world,
                player,
                bonus_kind,
                magnitude,
                def.duration,
                now,
                timers,
                events,
            )?;
        }
    }

    events.push(GameEvent::ItemUsed { kind });
    inventory::wear_item(world, player, kind, events)?;
    Ok(ItemUseResult::Used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Experience, PlayerClass, TimedBonuses};
    use crate::constants::*;
    use crate::spawning;
    use crate::time_system::TimerKind;
    use glam::Vec2;

    fn setup() -> (World, Entity, TimerScheduler, EventQueue) {
        let mut world = World::new();
        let player = spawning::spawn_player(&mut world, PlayerClass::Technician, Vec2::ZERO, 4);
        (world, player, TimerScheduler::new(), EventQueue::new())
    }

    fn give(world: &mut World, player: Entity, kind: ItemKind, count: u32) {
        let durability = item_defs::get_def(kind).durability;
        world
            .get::<&mut Inventory>(player)
            .unwrap()
            .add_item(kind, count, durability);
    }

    #[test]
    fn test_missing_item() {
        let (mut world, player, mut timers, mut events) = setup();
        let result = use_item(&mut world, player, ItemKind::Water, 0.0, &mut timers, &mut events);
        assert_eq!(result.unwrap(), ItemUseResult::NotInInventory);
    }

    #[test]
    fn test_pen_is_not_usable() {
        let (mut world, player, mut timers, mut events) = setup();
        give(&mut world, player, ItemKind::SimplePen, 1);
        let result = use_item(&mut world, player, ItemKind::SimplePen, 0.0, &mut timers, &mut events);
        assert_eq!(result.unwrap(), ItemUseResult::NotUsable);
        assert!(world.get::<&Inventory>(player).unwrap().contains(ItemKind::SimplePen));
    }

    #[test]
    fn test_water_heals_and_is_consumed() {
        let (mut world, player, mut timers, mut events) = setup();
        world.get::<&mut Health>(player).unwrap().set(40);
        give(&mut world, player, ItemKind::Water, 1);

        let result = use_item(&mut world, player, ItemKind::Water, 0.0, &mut timers, &mut events);
        assert_eq!(result.unwrap(), ItemUseResult::Used);
        assert_eq!(world.get::<&Health>(player).unwrap().current(), 60);
        assert!(!world.get::<&Inventory>(player).unwrap().contains(ItemKind::Water));
    }

    #[test]
    fn test_energy_drink_caps_energy_and_arms_damage_bonus() {
        let (mut world, player, mut timers, mut events) = setup();
        give(&mut world, player, ItemKind::EnergyDrink, 1);
        use_item(&mut world, player, ItemKind::EnergyDrink, 2.0, &mut timers, &mut events).unwrap();

        assert_eq!(world.get::<&Energy>(player).unwrap().current(), MAX_ENERGY);
        let bonuses = *world.get::<&TimedBonuses>(player).unwrap();
        assert_eq!(bonuses.damage.magnitude, 2);
        assert_eq!(bonuses.damage.expires_at, 17.0);
        assert!(timers.is_scheduled(player, TimerKind::Bonus(BonusKind::Damage)));
    }

    #[test]
    fn test_noodles_install_negative_regen() {
        let (mut world, player, mut timers, mut events) = setup();
        world.get::<&mut Health>(player).unwrap().set(10);
        give(&mut world, player, ItemKind::InstantNoodles, 1);
        use_item(&mut world, player, ItemKind::InstantNoodles, 0.0, &mut timers, &mut events).unwrap();

        assert_eq!(world.get::<&Health>(player).unwrap().current(), 60);
        let bonuses = *world.get::<&TimedBonuses>(player).unwrap();
        assert_eq!(bonuses.health_regen.magnitude, -1);
        assert_eq!(bonuses.health_regen.expires_at, 15.0);
    }

    #[test]
    fn test_phone_has_three_uses_and_costs_intellect() {
        let (mut world, player, mut timers, mut events) = setup();
        give(&mut world, player, ItemKind::Phone, 1);
        for _ in 0..3 {
            let r = use_item(&mut world, player, ItemKind::Phone, 0.0, &mut timers, &mut events);
            assert_eq!(r.unwrap(), ItemUseResult::Used);
        }
        assert!(!world.get::<&Inventory>(player).unwrap().contains(ItemKind::Phone));

        // 150 XP: one level (+1 int) and three uses (-3 int)
        let exp = *world.get::<&Experience>(player).unwrap();
        assert_eq!(exp.level, 2);
        assert_eq!(exp.current, 50);
        assert_eq!(
            world.get::<&Stats>(player).unwrap().intellect,
            TECHNICIAN_INTELLECT + 1 - 3
        );
    }

    #[test]
    fn test_notebook_levels_up_once() {
        let (mut world, player, mut timers, mut events) = setup();
        give(&mut world, player, ItemKind::ExcellentStudentNotebook, 1);
        use_item(
            &mut world,
            player,
            ItemKind::ExcellentStudentNotebook,
            0.0,
            &mut timers,
            &mut events,
        )
        .unwrap();
        let exp = *world.get::<&Experience>(player).unwrap();
        assert_eq!(exp, Experience { current: 0, level: 2 });
        // +3 from the notebook, +1 from the level
        assert_eq!(
            world.get::<&Stats>(player).unwrap().intellect,
            TECHNICIAN_INTELLECT + 4
        );
    }
}
