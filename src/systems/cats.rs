//! Campus cats: feeding and the scripted run off-canvas.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{Cat, CatBehavior, Position};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::level::Level;
use crate::spawning;
use crate::systems::{experience, inventory};
use crate::time_system::{TimerKind, TimerOutcome, TimerScheduler};

/// Nearest idle cat within feeding reach of the player
pub fn cat_in_reach(world: &World, player_pos: &Position) -> Option<Entity> {
    world
        .query::<(&Cat, &CatBehavior, &Position)>()
        .iter()
        .filter(|(_, (_, behavior, _))| **behavior == CatBehavior::Idle)
        .map(|(id, (_, _, pos))| (id, player_pos.distance_to(pos)))
        .filter(|&(_, dist)| dist <= CAT_FEED_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Feed the nearest cat in reach. Rewards the player, then sends the cat
/// running toward the farther horizontal edge. Returns the fed cat.
#[allow(clippy::too_many_arguments)]
pub fn feed_cat(
    world: &mut World,
    player: Entity,
    level: &Level,
    timers: &mut TimerScheduler,
    now: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> GameResult<Option<Entity>> {
    let player_pos = *world
        .get::<&Position>(player)
        .map_err(|_| GameError::missing::<Position>(player))?;

    let Some(cat) = cat_in_reach(world, &player_pos) else {
        return Ok(None);
    };

    {
        let (pos, behavior) = world
            .query_one_mut::<(&Position, &mut CatBehavior)>(cat)
            .map_err(|_| GameError::missing::<CatBehavior>(cat))?;
        let toward_right = pos.center().x < level.width / 2.0;
        *behavior = CatBehavior::Fleeing { toward_right };
    }
    timers.schedule(
        cat,
        TimerKind::CatFlee,
        now + CAT_FLEE_STEP_INTERVAL,
        CAT_FLEE_STEP_INTERVAL,
    );
    log::debug!("Fed cat {:?}", cat);
    events.push(GameEvent::CatFed { entity: cat });

    experience::grant_player_xp(world, player, CAT_BONUS_EXP, events)?;
    inventory::roll_loot(world, player, CAT_DROP_CHANCE, rng, events)?;
    Ok(Some(cat))
}

/// One step of a fleeing cat. Despawns it once it is entirely off-canvas.
pub fn flee_step(
    world: &mut World,
    level: &Level,
    timers: &mut TimerScheduler,
    cat: Entity,
    events: &mut EventQueue,
) -> GameResult<TimerOutcome> {
    let (pos, behavior) = world
        .query_one_mut::<(&mut Position, &CatBehavior)>(cat)
        .map_err(|_| GameError::missing::<CatBehavior>(cat))?;

    let CatBehavior::Fleeing { toward_right } = *behavior else {
        return Ok(TimerOutcome::Disarm);
    };
    pos.x += if toward_right {
        CAT_FLEE_SPEED
    } else {
        -CAT_FLEE_SPEED
    };
    let position = pos.as_vec();

    if position.x >= level.width || position.x + CHARACTER_SIZE <= 0.0 {
        spawning::despawn(world, timers, cat);
        events.push(GameEvent::CatGone { entity: cat });
        return Ok(TimerOutcome::Disarm);
    }
    events.push(GameEvent::Moved {
        entity: cat,
        position,
    });
    Ok(TimerOutcome::Rearm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Experience, PlayerClass};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(player_at: Vec2) -> (World, Entity, TimerScheduler, EventQueue, StdRng, Level) {
        let mut world = World::new();
        let player = spawning::spawn_player(&mut world, PlayerClass::Technician, player_at, 4);
        (
            world,
            player,
            TimerScheduler::new(),
            EventQueue::new(),
            StdRng::seed_from_u64(3),
            Level::open(1280.0, 720.0),
        )
    }

    #[test]
    fn test_no_cat_in_reach() {
        let (mut world, player, mut timers, mut events, mut rng, level) = setup(Vec2::new(100.0, 100.0));
        spawning::spawn_cat_at(&mut world, Vec2::new(200.0, 100.0), &mut events);
        let fed = feed_cat(&mut world, player, &level, &mut timers, 0.0, &mut rng, &mut events).unwrap();
        assert_eq!(fed, None);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_feeding_rewards_and_starts_flight() {
        let (mut world, player, mut timers, mut events, mut rng, level) = setup(Vec2::new(900.0, 300.0));
        let cat = spawning::spawn_cat_at(&mut world, Vec2::new(960.0, 300.0), &mut events);

        let fed = feed_cat(&mut world, player, &level, &mut timers, 1.0, &mut rng, &mut events).unwrap();
        assert_eq!(fed, Some(cat));
        assert_eq!(world.get::<&Experience>(player).unwrap().current, CAT_BONUS_EXP);
        // Right half of the canvas: the left edge is farther
        assert_eq!(
            *world.get::<&CatBehavior>(cat).unwrap(),
            CatBehavior::Fleeing { toward_right: false }
        );
        assert!(timers.is_scheduled(cat, TimerKind::CatFlee));

        // A fleeing cat cannot be fed twice
        let again = feed_cat(&mut world, player, &level, &mut timers, 1.1, &mut rng, &mut events).unwrap();
        assert_eq!(again, None);
    }

    #[test]
    fn test_cat_runs_off_and_is_removed() {
        let (mut world, _player, mut timers, mut events, _rng, level) = setup(Vec2::ZERO);
        let cat = world.spawn((
            Cat,
            CatBehavior::Fleeing { toward_right: true },
            Position::new(1150.0, 300.0),
        ));
        timers.schedule(cat, TimerKind::CatFlee, 0.06, 0.06);

        let first = flee_step(&mut world, &level, &mut timers, cat, &mut events).unwrap();
        assert_eq!(first, TimerOutcome::Rearm);
        assert_eq!(world.get::<&Position>(cat).unwrap().x, 1190.0);

        let mut steps = 1;
        while world.contains(cat) {
            flee_step(&mut world, &level, &mut timers, cat, &mut events).unwrap();
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(timers.count_for_entity(cat), 0);
        assert!(events.iter().any(|e| *e == GameEvent::CatGone { entity: cat }));
    }
}
