//! Combat system functions.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::components::{
    AttackCooldown, DamageFormula, DamageRecord, DropChance, Enemy, Energy, Experience,
    ExpReward, Health, Inventory, ItemKind, Player, Position, Stats, TimedBonuses,
};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::level::Level;
use crate::spawning;
use crate::systems::{effects, experience, inventory};
use crate::time_system::TimerScheduler;
use crate::ui::PlayerUi;

/// Result of a player attack attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit { target: Entity, damage: i32 },
    OnCooldown,
    NoTarget,
    /// Not enough energy; nothing changed and the UI was told
    InsufficientEnergy,
}

/// Energy a player attack of `damage` requires and costs
pub fn energy_cost(damage: i32) -> i32 {
    (damage as f32 / ATTACK_ENERGY_DIVISOR).floor() as i32
}

fn has_energy_for(energy: i32, damage: i32) -> bool {
    energy as f32 >= damage as f32 / ATTACK_ENERGY_DIVISOR
}

/// Player damage: the standard formula over effective strength, plus the
/// best pen held. Also returns that pen so the caller can wear it.
pub fn player_damage(
    stats: &Stats,
    bonuses: &TimedBonuses,
    inventory: &Inventory,
    now: f32,
) -> (i32, Option<ItemKind>) {
    let boosted = Stats {
        strength: effects::effective_strength(stats, bonuses, now),
        ..*stats
    };
    let base = DamageFormula::Standard.compute(&boosted);
    match inventory::best_pen(inventory) {
        Some((pen, bonus)) => (base + bonus, Some(pen)),
        None => (base, None),
    }
}

/// Enemy damage: the kind's formula scaled by difficulty, truncated
pub fn enemy_damage(formula: DamageFormula, stats: &Stats, difficulty: f32) -> i32 {
    (formula.compute(stats) as f32 * difficulty) as i32
}

/// Closest enemy whose centre is within `range` of `from`'s centre
pub fn nearest_enemy_in_range(world: &World, from: &Position, range: f32) -> Option<Entity> {
    world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(id, (_, pos))| (id, from.distance_to(pos)))
        .filter(|&(_, dist)| dist <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Attack the nearest enemy in reach
pub fn player_attack(
    world: &mut World,
    player: Entity,
    now: f32,
    ui: &mut dyn PlayerUi,
    events: &mut EventQueue,
) -> GameResult<AttackOutcome> {
    let (pos, damage, pen, energy) = {
        let mut query = world
            .query_one::<(
                &Player,
                &Position,
                &Stats,
                &TimedBonuses,
                &Inventory,
                &Energy,
                &AttackCooldown,
            )>(player)
            .map_err(|_| GameError::missing::<Stats>(player))?;
        let Some((_, pos, stats, bonuses, inventory, energy, cooldown)) = query.get() else {
            return Err(GameError::missing::<Player>(player));
        };
        if !cooldown.is_ready(now) {
            return Ok(AttackOutcome::OnCooldown);
        }
        let (damage, pen) = player_damage(stats, bonuses, inventory, now);
        (*pos, damage, pen, energy.current())
    };

    let Some(target) = nearest_enemy_in_range(world, &pos, MAX_PLAYER_ATTACK_DISTANCE) else {
        return Ok(AttackOutcome::NoTarget);
    };

    if !has_energy_for(energy, damage) {
        log::debug!("Attack refused: {} energy, {} damage", energy, damage);
        ui.show_energy_message();
        ui.flash_energy_value();
        return Ok(AttackOutcome::InsufficientEnergy);
    }

    {
        let mut health = world
            .get::<&mut Health>(target)
            .map_err(|_| GameError::missing::<Health>(target))?;
        health.damage(damage);
        events.push(GameEvent::HealthChanged {
            entity: target,
            current: health.current(),
            max: health.max(),
        });
    }

    {
        let (energy, cooldown) = world
            .query_one_mut::<(&mut Energy, &mut AttackCooldown)>(player)
            .map_err(|_| GameError::missing::<Energy>(player))?;
        energy.spend(energy_cost(damage));
        cooldown.last_attack = Some(now);
        events.push(GameEvent::EnergyChanged {
            current: energy.current(),
        });
    }

    if let Some(pen) = pen {
        inventory::wear_item(world, player, pen, events)?;
    }

    log::debug!("Player hit {:?} for {}", target, damage);
    events.push(GameEvent::AttackHit {
        attacker: player,
        target,
        damage,
    });
    Ok(AttackOutcome::Hit { target, damage })
}

/// One tick of an enemy's attack timer. Hits the player when in reach and
/// the cooldown allows. Returns whether an attack landed.
pub fn enemy_attack_tick(
    world: &mut World,
    enemy: Entity,
    player: Entity,
    now: f32,
    difficulty: f32,
    events: &mut EventQueue,
) -> GameResult<bool> {
    let player_pos = *world
        .get::<&Position>(player)
        .map_err(|_| GameError::missing::<Position>(player))?;

    let damage = {
        let (pos, stats, formula, cooldown) = world
            .query_one_mut::<(&Position, &Stats, &DamageFormula, &mut AttackCooldown)>(enemy)
            .map_err(|_| GameError::missing::<AttackCooldown>(enemy))?;
        if pos.distance_to(&player_pos) > MAX_ENEMY_ATTACK_DISTANCE || !cooldown.is_ready(now) {
            return Ok(false);
        }
        cooldown.last_attack = Some(now);
        enemy_damage(*formula, stats, difficulty)
    };

    let (health, record) = world
        .query_one_mut::<(&mut Health, &mut DamageRecord)>(player)
        .map_err(|_| GameError::missing::<Health>(player))?;
    health.damage(damage);
    record.last_received = Some(now);

    log::debug!("{:?} hit the player for {}", enemy, damage);
    events.push(GameEvent::HealthChanged {
        entity: player,
        current: health.current(),
        max: health.max(),
    });
    events.push(GameEvent::AttackHit {
        attacker: enemy,
        target: player,
        damage,
    });
    Ok(true)
}

/// Remove every enemy at 0 HP: cancel its timers, despawn it, grant its
/// experience and roll its loot. When the last enemy falls, a new wave of
/// 1-3 arrives. Returns how many died.
#[allow(clippy::too_many_arguments)]
pub fn remove_dead_entities(
    world: &mut World,
    player: Entity,
    level: &Level,
    timers: &mut TimerScheduler,
    now: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> GameResult<usize> {
    puffin::profile_function!();

    let dead: Vec<_> = world
        .query::<(&Enemy, &Health, &Position, &ExpReward, &DropChance)>()
        .iter()
        .filter(|(_, (_, health, ..))| health.is_dead())
        .map(|(id, (enemy, _, pos, reward, drop))| (id, enemy.kind, pos.as_vec(), reward.0, drop.0))
        .collect();

    for &(id, kind, position, reward, drop_chance) in &dead {
        spawning::despawn(world, timers, id);
        log::debug!("{:?} defeated", kind);
        events.push(GameEvent::EnemyDied {
            entity: id,
            kind,
            position,
        });
        experience::grant_player_xp(world, player, reward, events)?;
        inventory::roll_loot(world, player, drop_chance, rng, events)?;
    }

    if !dead.is_empty() && world.query::<&Enemy>().iter().next().is_none() {
        let count = rng.gen_range(RESPAWN_WAVE_MIN..=RESPAWN_WAVE_MAX);
        let spawned = spawning::spawn_enemy_wave(world, level, timers, count, now, rng, events);
        log::info!("All enemies defeated; {} more arrive", spawned);
    }
    Ok(dead.len())
}

/// Reset the player at the checkpoint if HP ran out. Returns whether a
/// reset happened.
pub fn check_player_death(
    world: &mut World,
    player: Entity,
    events: &mut EventQueue,
) -> GameResult<bool> {
    let (pos, health, energy, exp, stats) = world
        .query_one_mut::<(&mut Position, &mut Health, &mut Energy, &mut Experience, &mut Stats)>(
            player,
        )
        .map_err(|_| GameError::missing::<Health>(player))?;

    if !health.is_dead() {
        return Ok(false);
    }

    let checkpoint = Vec2::new(PLAYER_CHECKPOINT.0, PLAYER_CHECKPOINT.1);
    *pos = Position::from_vec(checkpoint);
    health.set(DEATH_RESET_HEALTH);
    energy.set(DEATH_RESET_ENERGY);
    experience::apply_death_penalty(exp, stats);

    log::info!("Player died; back at the checkpoint (level {})", exp.level);
    events.push(GameEvent::PlayerReset {
        position: checkpoint,
    });
    events.push(GameEvent::HealthChanged {
        entity: player,
        current: health.current(),
        max: health.max(),
    });
    events.push(GameEvent::EnergyChanged {
        current: energy.current(),
    });
    events.push(GameEvent::ExperienceChanged {
        current: exp.current,
        level: exp.level,
    });
    Ok(true)
}
