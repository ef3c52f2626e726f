//! World initialization - creates the game world and spawns initial entities.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::config::SimConfig;
use crate::constants::*;
use crate::events::EventQueue;
use crate::level::Level;
use crate::spawning::{self, SpawnConfig};
use crate::time_system::TimerScheduler;

/// Build a fresh world: the player at the checkpoint, then enemies and cats
/// from the level's spawn points and random safe placement.
pub fn init_world(
    config: &SimConfig,
    level: &Level,
    timers: &mut TimerScheduler,
    now: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> (World, Entity) {
    let mut world = World::new();

    let checkpoint = Vec2::new(PLAYER_CHECKPOINT.0, PLAYER_CHECKPOINT.1);
    let player = spawning::spawn_player(
        &mut world,
        config.player_class,
        checkpoint,
        config.inventory_slots,
    );
    spawning::arm_player_timers(timers, player, now);

    let population = SpawnConfig {
        enemy_count: config.initial_enemy_count,
        cat_count: config.initial_cat_count,
    };
    population.populate(&mut world, level, timers, now, rng, events);

    log::info!(
        "World ready: {} on a {}x{} canvas with {} obstacles",
        config.player_class.name(),
        level.width,
        level.height,
        level.obstacles.len()
    );
    (world, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Cat, Enemy, Player};
    use crate::time_system::TimerKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_init_world_population_and_timers() {
        let config = SimConfig::default();
        let level = Level::open(config.canvas_width, config.canvas_height);
        let mut timers = TimerScheduler::new();
        let mut events = EventQueue::new();
        let mut rng = StdRng::seed_from_u64(11);

        let (world, player) = init_world(&config, &level, &mut timers, 0.0, &mut rng, &mut events);

        assert!(world.get::<&Player>(player).is_ok());
        assert_eq!(world.query::<&Enemy>().iter().count(), INITIAL_ENEMY_COUNT);
        assert_eq!(world.query::<&Cat>().iter().count(), INITIAL_CAT_COUNT);
        assert!(timers.is_scheduled(player, TimerKind::HealthRegen));
        assert!(timers.is_scheduled(player, TimerKind::EnergyRegen));
        assert_eq!(timers.len(), 2 + INITIAL_ENEMY_COUNT);
    }
}
