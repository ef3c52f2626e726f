//! Experience and leveling system.

use hecs::{Entity, World};

use crate::components::{Energy, Experience, Health, Stats};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};

/// Calculate XP progress toward next level (0.0 to 1.0)
pub fn xp_progress(exp: &Experience) -> f32 {
    exp.current as f32 / XP_PER_LEVEL as f32
}

/// Add XP, rolling over every full 100 points into a level.
/// Returns how many levels were gained.
pub fn grant_xp(exp: &mut Experience, amount: u32) -> u32 {
    exp.current += amount;
    let mut gained = 0;
    while exp.current >= XP_PER_LEVEL {
        exp.current -= XP_PER_LEVEL;
        exp.level += 1;
        gained += 1;
    }
    gained
}

/// Stat growth for `levels` level-ups
pub fn grow_stats(stats: &mut Stats, levels: u32) {
    let levels = levels as i32;
    stats.strength += levels;
    stats.dexterity += levels;
    stats.intellect += levels;
}

/// Death forfeits some experience and, past level 0, a point from each
/// stat that is still above 1
pub fn apply_death_penalty(exp: &mut Experience, stats: &mut Stats) {
    exp.current = exp.current.saturating_sub(DEATH_XP_PENALTY);
    if exp.level != 0 {
        for stat in [
            &mut stats.strength,
            &mut stats.dexterity,
            &mut stats.intellect,
        ] {
            if *stat > 1 {
                *stat -= 1;
            }
        }
    }
}

/// Grant XP to the player, applying level-up rewards (stats +1 each,
/// full energy and HP). Returns the number of levels gained.
pub fn grant_player_xp(
    world: &mut World,
    player: Entity,
    amount: u32,
    events: &mut EventQueue,
) -> GameResult<u32> {
    let (exp, stats, health, energy) = world
        .query_one_mut::<(&mut Experience, &mut Stats, &mut Health, &mut Energy)>(player)
        .map_err(|_| GameError::missing::<Experience>(player))?;

    let gained = grant_xp(exp, amount);
    events.push(GameEvent::ExperienceChanged {
        current: exp.current,
        level: exp.level,
    });

    if gained > 0 {
        grow_stats(stats, gained);
        energy.set(MAX_ENERGY);
        health.restore_full();
        log::info!("Level up! Now level {} ({:?})", exp.level, stats);
        events.push(GameEvent::LevelUp {
            new_level: exp.level,
        });
        events.push(GameEvent::EnergyChanged {
            current: energy.current(),
        });
        events.push(GameEvent::HealthChanged {
            entity: player,
            current: health.current(),
            max: health.max(),
        });
    }
    Ok(gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerClass;
    use crate::spawning;
    use glam::Vec2;

    #[test]
    fn test_xp_progress() {
        let exp = Experience {
            current: 50,
            level: 1,
        };
        assert_eq!(xp_progress(&exp), 0.5);
    }

    #[test]
    fn test_grant_xp_no_level_up() {
        let mut exp = Experience::new();
        assert_eq!(grant_xp(&mut exp, 20), 0);
        assert_eq!(exp.current, 20);
        assert_eq!(exp.level, 1);
    }

    #[test]
    fn test_grant_xp_overflow_carries() {
        let mut exp = Experience {
            current: 90,
            level: 1,
        };
        assert_eq!(grant_xp(&mut exp, 20), 1);
        assert_eq!(exp.current, 10);
        assert_eq!(exp.level, 2);
    }

    #[test]
    fn test_grant_xp_one_level_per_hundred() {
        let mut exp = Experience {
            current: 50,
            level: 3,
        };
        assert_eq!(grant_xp(&mut exp, 260), 3);
        assert_eq!(exp.current, 10);
        assert_eq!(exp.level, 6);
    }

    #[test]
    fn test_death_penalty_floors() {
        let mut exp = Experience {
            current: 10,
            level: 2,
        };
        let mut stats = Stats::new(3, 1, 5);
        apply_death_penalty(&mut exp, &mut stats);
        assert_eq!(exp.current, 0);
        assert_eq!(stats, Stats::new(2, 1, 4));
    }

    #[test]
    fn test_death_penalty_spares_stats_at_level_zero() {
        let mut exp = Experience {
            current: 60,
            level: 0,
        };
        let mut stats = Stats::new(3, 3, 3);
        apply_death_penalty(&mut exp, &mut stats);
        assert_eq!(exp.current, 35);
        assert_eq!(stats, Stats::new(3, 3, 3));
    }

    #[test]
    fn test_player_level_up_restores_and_grows() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let player = spawning::spawn_player(&mut world, PlayerClass::Technician, Vec2::ZERO, 4);
        world.get::<&mut Health>(player).unwrap().set(30);
        world.get::<&mut Energy>(player).unwrap().set(5);
        world.get::<&mut Experience>(player).unwrap().current = 60;

        let gained = grant_player_xp(&mut world, player, 50, &mut events).unwrap();
        assert_eq!(gained, 1);

        let exp = *world.get::<&Experience>(player).unwrap();
        assert_eq!(exp, Experience { current: 10, level: 2 });
        assert_eq!(
            *world.get::<&Stats>(player).unwrap(),
            Stats::new(
                TECHNICIAN_STRENGTH + 1,
                TECHNICIAN_DEXTERITY + 1,
                TECHNICIAN_INTELLECT + 1
            )
        );
        let health = *world.get::<&Health>(player).unwrap();
        assert_eq!(health.current(), health.max());
        assert_eq!(world.get::<&Energy>(player).unwrap().current(), MAX_ENERGY);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelUp { new_level: 2 })));
    }
}
