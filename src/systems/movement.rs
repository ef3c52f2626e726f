//! Movement and collision resolution.
//!
//! Player steps are resolved one axis at a time so a diagonal push into a
//! wall still slides along the free axis. Enemies only respect the canvas.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Enemy, Player, Position, Speed};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::level::{Level, Rect};

/// Result of a player move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// One axis was refused, the other applied
    Slid,
    Blocked,
    Idle,
}

/// Why a single-axis step was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBlock {
    Bounds,
    Enemy,
    Obstacle,
}

/// Distance covered this frame for a per-frame speed
pub fn step_length(speed: f32, dt: f32) -> f32 {
    speed * dt * REFERENCE_FRAME_RATE
}

/// Check one axis of a player step. `candidate` is the top-left after the
/// step, `step` is the movement along that axis only.
pub fn axis_blocked(
    level: &Level,
    enemy_centers: &[Vec2],
    candidate: Vec2,
    step: Vec2,
) -> Option<AxisBlock> {
    let rect = Rect::new(candidate.x, candidate.y, CHARACTER_SIZE, CHARACTER_SIZE);
    if !level.in_bounds(&rect) {
        return Some(AxisBlock::Bounds);
    }

    let center = candidate + Vec2::splat(CHARACTER_SIZE / 2.0);
    let toward_enemy = enemy_centers.iter().any(|&enemy| {
        let separation = enemy - center;
        separation.length() < SAFE_DISTANCE && separation.dot(step) > 0.0
    });
    if toward_enemy {
        return Some(AxisBlock::Enemy);
    }

    if level.blocked_by_obstacle(&rect) {
        return Some(AxisBlock::Obstacle);
    }
    None
}

/// Apply `delta` to `from`, X first then Y, reverting any refused axis
pub fn resolve_player_step(level: &Level, enemy_centers: &[Vec2], from: Vec2, delta: Vec2) -> Vec2 {
    let mut resolved = from;

    if delta.x != 0.0 {
        let candidate = Vec2::new(from.x + delta.x, from.y);
        if axis_blocked(level, enemy_centers, candidate, Vec2::new(delta.x, 0.0)).is_none() {
            resolved.x = candidate.x;
        }
    }
    if delta.y != 0.0 {
        let candidate = Vec2::new(resolved.x, from.y + delta.y);
        if axis_blocked(level, enemy_centers, candidate, Vec2::new(0.0, delta.y)).is_none() {
            resolved.y = candidate.y;
        }
    }
    resolved
}

/// Move the player along `direction` (per-axis -1/0/+1) for one frame
pub fn move_player(
    world: &mut World,
    player: Entity,
    level: &Level,
    direction: Vec2,
    dt: f32,
    events: &mut EventQueue,
) -> GameResult<MoveResult> {
    puffin::profile_function!();

    if direction == Vec2::ZERO {
        return Ok(MoveResult::Idle);
    }

    let enemy_centers: Vec<Vec2> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (_, pos))| pos.center())
        .collect();

    let (_, pos, speed) = world
        .query_one_mut::<(&Player, &mut Position, &Speed)>(player)
        .map_err(|_| GameError::missing::<Position>(player))?;

    let from = pos.as_vec();
    let delta = direction * step_length(speed.0, dt);
    let to = resolve_player_step(level, &enemy_centers, from, delta);

    if to == from {
        return Ok(MoveResult::Blocked);
    }
    *pos = Position::from_vec(to);
    events.push(GameEvent::Moved {
        entity: player,
        position: to,
    });

    let wanted_both = delta.x != 0.0 && delta.y != 0.0;
    let got_both = to.x != from.x && to.y != from.y;
    Ok(if wanted_both && !got_both {
        MoveResult::Slid
    } else {
        MoveResult::Moved
    })
}

/// Outcome of an enemy step against the canvas edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStep {
    pub position: Vec2,
    /// An axis hit the edge; the caller should pick a new heading
    pub bounced: bool,
}

/// Apply an enemy step, discarding any axis that would touch or cross the
/// canvas edge
pub fn clamp_enemy_step(level: &Level, from: Vec2, delta: Vec2) -> EnemyStep {
    let mut position = from + delta;
    let mut bounced = false;

    if position.x <= 0.0 || position.x + CHARACTER_SIZE >= level.width {
        position.x = from.x;
        bounced = true;
    }
    if position.y <= 0.0 || position.y + CHARACTER_SIZE >= level.height {
        position.y = from.y;
        bounced = true;
    }
    EnemyStep { position, bounced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerClass;
    use crate::spawning;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_step_length_at_reference_rate() {
        assert!((step_length(2.0, DT) - 2.0).abs() < 1e-5);
        assert!((step_length(2.0, 2.0 * DT) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_slides_along_wall() {
        // Wall immediately right of the player
        let level = Level::open(1280.0, 720.0).with_obstacle(Rect::new(300.0, 0.0, 50.0, 720.0));
        let from = Vec2::new(200.0, 200.0);
        let to = resolve_player_step(&level, &[], from, Vec2::new(5.0, 5.0));
        assert_eq!(to, Vec2::new(200.0, 205.0));
    }

    #[test]
    fn test_canvas_edge_blocks_axis() {
        let level = Level::open(1280.0, 720.0);
        let to = resolve_player_step(&level, &[], Vec2::new(1.0, 300.0), Vec2::new(-2.0, 2.0));
        assert_eq!(to, Vec2::new(1.0, 302.0));
    }

    #[test]
    fn test_moving_toward_close_enemy_is_blocked() {
        let level = Level::open(1280.0, 720.0);
        let from = Vec2::new(400.0, 300.0);
        // Enemy centre 90 units to the right of the player's centre
        let enemy = from + Vec2::splat(CHARACTER_SIZE / 2.0) + Vec2::new(90.0, 0.0);

        let toward = resolve_player_step(&level, &[enemy], from, Vec2::new(2.0, 0.0));
        assert_eq!(toward, from);

        let away = resolve_player_step(&level, &[enemy], from, Vec2::new(-2.0, 0.0));
        assert_eq!(away, Vec2::new(398.0, 300.0));

        let lateral = resolve_player_step(&level, &[enemy], from, Vec2::new(0.0, 2.0));
        assert_eq!(lateral, Vec2::new(400.0, 302.0));
    }

    #[test]
    fn test_move_player_reports_slide() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let level = Level::open(1280.0, 720.0).with_obstacle(Rect::new(301.0, 0.0, 50.0, 720.0));
        let player = spawning::spawn_player(
            &mut world,
            PlayerClass::Technician,
            Vec2::new(200.0, 200.0),
            4,
        );
        let result =
            move_player(&mut world, player, &level, Vec2::new(1.0, 1.0), DT, &mut events).unwrap();
        assert_eq!(result, MoveResult::Slid);
        let pos = *world.get::<&Position>(player).unwrap();
        assert_eq!(pos.x, 200.0);
        assert!(pos.y > 200.0);
    }

    #[test]
    fn test_enemy_step_bounces_on_edge() {
        let level = Level::open(1280.0, 720.0);
        let step = clamp_enemy_step(&level, Vec2::new(0.5, 300.0), Vec2::new(-1.0, 1.0));
        assert!(step.bounced);
        assert_eq!(step.position, Vec2::new(0.5, 301.0));

        let free = clamp_enemy_step(&level, Vec2::new(500.0, 300.0), Vec2::new(1.0, 1.0));
        assert!(!free.bounced);
        assert_eq!(free.position, Vec2::new(501.0, 301.0));
    }
}
