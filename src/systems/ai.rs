//! Enemy AI state machine.
//!
//! Each enemy is evaluated once per frame, independently of the others.
//! Chasing wins whenever the player is visible and not too close; otherwise
//! the enemy holds for its grace period and then cycles wander/wait.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::{AiState, EnemyAi, Player, Position, Speed};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::level::Level;
use crate::systems::movement::{clamp_enemy_step, step_length};

/// Uniform heading: each component drawn from [-1, 1], then normalized
pub fn random_direction(rng: &mut impl Rng) -> Vec2 {
    let v = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
    let dir = v.normalize_or_zero();
    if dir == Vec2::ZERO {
        Vec2::X
    } else {
        dir
    }
}

/// Fresh wander phase with a new heading and a 1-5 second duration
pub fn begin_wander(now: f32, rng: &mut impl Rng) -> AiState {
    AiState::Wandering {
        direction: random_direction(rng),
        started_at: now,
        duration: rng.gen_range(ENEMY_WANDER_MIN_SECS..=ENEMY_WANDER_MAX_SECS) as f32,
    }
}

/// Fresh wait phase lasting 2-5 seconds
pub fn begin_wait(now: f32, rng: &mut impl Rng) -> AiState {
    AiState::Waiting {
        started_at: now,
        duration: rng.gen_range(ENEMY_WAIT_MIN_SECS..=ENEMY_WAIT_MAX_SECS) as f32,
    }
}

/// AI component for a newly spawned enemy
pub fn new_enemy_ai(now: f32, rng: &mut impl Rng) -> EnemyAi {
    let grace = rng.gen_range(ENEMY_GRACE_MIN..=ENEMY_GRACE_MAX);
    EnemyAi::new(begin_wander(now, rng), grace)
}

/// Advance one enemy's state machine. Returns the desired displacement for
/// this frame (before the canvas clamp).
pub fn update_state_machine(
    ai: &mut EnemyAi,
    enemy_pos: Vec2,
    player_pos: Vec2,
    step: f32,
    now: f32,
    rng: &mut impl Rng,
) -> Vec2 {
    let distance = enemy_pos.distance(player_pos);

    if (SAFE_DISTANCE..=VISIBILITY_RANGE).contains(&distance) {
        ai.state = AiState::Chasing;
        ai.last_seen_player = Some(now);
        return (player_pos - enemy_pos).normalize_or_zero() * step;
    }

    if let Some(seen) = ai.last_seen_player {
        if now - seen <= ai.grace_period {
            return Vec2::ZERO;
        }
    }

    match ai.state {
        AiState::Chasing => {
            ai.state = begin_wander(now, rng);
            Vec2::ZERO
        }
        AiState::Wandering {
            direction,
            started_at,
            duration,
        } => {
            if now - started_at >= duration {
                ai.state = begin_wait(now, rng);
                Vec2::ZERO
            } else {
                direction * step
            }
        }
        AiState::Waiting {
            started_at,
            duration,
        } => {
            if now - started_at >= duration {
                ai.state = begin_wander(now, rng);
            }
            Vec2::ZERO
        }
    }
}

/// Run every enemy's AI for one frame and move it
pub fn update_enemies(
    world: &mut World,
    player: Entity,
    level: &Level,
    now: f32,
    dt: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> GameResult<()> {
    puffin::profile_function!();

    let player_pos = world
        .query_one_mut::<(&Player, &Position)>(player)
        .map(|(_, p)| p.as_vec())
        .map_err(|_| GameError::missing::<Position>(player))?;

    for (entity, (pos, ai, speed)) in world.query_mut::<(&mut Position, &mut EnemyAi, &Speed)>() {
        let old_state = ai.name();
        let from = pos.as_vec();
        let delta = update_state_machine(ai, from, player_pos, step_length(speed.0, dt), now, rng);

        if ai.name() != old_state {
            events.push(GameEvent::AiStateChanged {
                entity,
                old_state,
                new_state: ai.name(),
            });
        }

        if delta == Vec2::ZERO {
            continue;
        }

        let moved = clamp_enemy_step(level, from, delta);
        if moved.bounced {
            if let AiState::Wandering { direction, .. } = &mut ai.state {
                *direction = random_direction(rng);
            }
        }
        if moved.position != from {
            *pos = Position::from_vec(moved.position);
            events.push(GameEvent::Moved {
                entity,
                position: moved.position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{EnemyKind, PlayerClass};
    use crate::spawning;
    use crate::time_system::TimerScheduler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn wandering(direction: Vec2, started_at: f32, duration: f32) -> EnemyAi {
        EnemyAi::new(
            AiState::Wandering {
                direction,
                started_at,
                duration,
            },
            2.0,
        )
    }

    #[test]
    fn test_random_direction_is_unit() {
        let mut rng = rng();
        for _ in 0..100 {
            let d = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_new_enemy_starts_wandering() {
        let mut rng = rng();
        let ai = new_enemy_ai(0.0, &mut rng);
        assert!(matches!(ai.state, AiState::Wandering { duration, .. } if (1.0..=5.0).contains(&duration)));
        assert!((ENEMY_GRACE_MIN..=ENEMY_GRACE_MAX).contains(&ai.grace_period));
        assert!(ai.last_seen_player.is_none());
    }

    #[test]
    fn test_chases_visible_player() {
        let mut rng = rng();
        let mut ai = wandering(Vec2::X, 0.0, 5.0);
        let delta = update_state_machine(
            &mut ai,
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 300.0),
            1.0,
            1.0,
            &mut rng,
        );
        assert_eq!(ai.state, AiState::Chasing);
        assert_eq!(ai.last_seen_player, Some(1.0));
        assert!((delta - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_too_close_halts_and_holds() {
        let mut rng = rng();
        let mut ai = wandering(Vec2::X, 0.0, 5.0);
        update_state_machine(&mut ai, Vec2::ZERO, Vec2::new(200.0, 0.0), 1.0, 1.0, &mut rng);
        assert_eq!(ai.state, AiState::Chasing);

        // Player steps inside the safe distance: no closing movement
        let delta = update_state_machine(&mut ai, Vec2::ZERO, Vec2::new(50.0, 0.0), 1.0, 1.5, &mut rng);
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(ai.state, AiState::Chasing);
    }

    #[test]
    fn test_grace_period_before_wandering() {
        let mut rng = rng();
        let mut ai = wandering(Vec2::X, 0.0, 5.0);
        ai.grace_period = 2.0;
        update_state_machine(&mut ai, Vec2::ZERO, Vec2::new(200.0, 0.0), 1.0, 10.0, &mut rng);

        let far = Vec2::new(1000.0, 0.0);
        let delta = update_state_machine(&mut ai, Vec2::ZERO, far, 1.0, 11.9, &mut rng);
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(ai.state, AiState::Chasing);

        update_state_machine(&mut ai, Vec2::ZERO, far, 1.0, 12.1, &mut rng);
        assert!(matches!(ai.state, AiState::Wandering { started_at, .. } if started_at == 12.1));
    }

    #[test]
    fn test_wander_then_wait_then_wander() {
        let mut rng = rng();
        let far = Vec2::new(2000.0, 2000.0);
        let mut ai = wandering(Vec2::Y, 0.0, 2.0);

        let delta = update_state_machine(&mut ai, Vec2::ZERO, far, 1.5, 1.0, &mut rng);
        assert_eq!(delta, Vec2::new(0.0, 1.5));

        let delta = update_state_machine(&mut ai, Vec2::ZERO, far, 1.5, 2.0, &mut rng);
        assert_eq!(delta, Vec2::ZERO);
        let wait = match ai.state {
            AiState::Waiting { duration, .. } => duration,
            other => panic!("expected Waiting, got {:?}", other),
        };
        assert!((2.0..=5.0).contains(&wait));

        let delta = update_state_machine(&mut ai, Vec2::ZERO, far, 1.5, 2.0 + wait - 0.1, &mut rng);
        assert_eq!(delta, Vec2::ZERO);
        assert!(matches!(ai.state, AiState::Waiting { .. }));

        update_state_machine(&mut ai, Vec2::ZERO, far, 1.5, 2.0 + wait, &mut rng);
        assert!(matches!(ai.state, AiState::Wandering { .. }));
    }

    #[test]
    fn test_update_enemies_bounce_keeps_state() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        let level = Level::open(1280.0, 720.0);
        let player = spawning::spawn_player(
            &mut world,
            PlayerClass::Technician,
            Vec2::new(1100.0, 600.0),
            4,
        );
        let mut timers = TimerScheduler::new();
        let enemy = spawning::spawn_enemy_at(
            &mut world,
            &mut timers,
            EnemyKind::ExhaustedStudent,
            Vec2::new(0.5, 100.0),
            0.0,
            &mut rng,
            &mut events,
        );
        world.get::<&mut EnemyAi>(enemy).unwrap().state = AiState::Wandering {
            direction: Vec2::new(-1.0, 0.0),
            started_at: 0.0,
            duration: 5.0,
        };

        update_enemies(&mut world, player, &level, 0.5, 1.0 / 60.0, &mut rng, &mut events).unwrap();

        let ai = *world.get::<&EnemyAi>(enemy).unwrap();
        match ai.state {
            AiState::Wandering { direction, started_at, .. } => {
                assert_eq!(started_at, 0.0);
                assert_ne!(direction, Vec2::new(-1.0, 0.0));
            }
            other => panic!("expected Wandering, got {:?}", other),
        }
        assert_eq!(world.get::<&Position>(enemy).unwrap().x, 0.5);
    }
}
