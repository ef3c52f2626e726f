//! Timed bonuses and passive regeneration.
//!
//! Everything here operates on the player's `Health`, `Energy`,
//! `DamageRecord` and `TimedBonuses` components. The periodic parts are
//! driven by the timer scheduler; this module only says what one tick does.

use hecs::{Entity, World};

use crate::components::{BonusKind, DamageRecord, Energy, Health, Stats, TimedBonus, TimedBonuses};
use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::time_system::{TimerKind, TimerOutcome, TimerScheduler};

// =============================================================================
// PURE FUNCTIONS (operate on component data)
// =============================================================================

/// Strength including any live damage bonus
pub fn effective_strength(stats: &Stats, bonuses: &TimedBonuses, now: f32) -> i32 {
    stats.strength + bonuses.damage.active(now)
}

/// HP gained by one passive heal tick, or None when healing is suppressed.
/// A dead player never heals; only the death reset brings HP back.
pub fn passive_heal_amount(
    health: &Health,
    record: &DamageRecord,
    bonuses: &TimedBonuses,
    now: f32,
) -> Option<i32> {
    let ceiling = health.max() as f32 / PASSIVE_HEAL_CEILING_DIVISOR;
    if health.is_dead() || !record.regen_allowed(now) || health.current() as f32 >= ceiling {
        return None;
    }
    Some(1 + bonuses.health_regen.active(now))
}

/// Energy gained by one passive energy tick, or None when suppressed
pub fn passive_energy_amount(
    energy: &Energy,
    record: &DamageRecord,
    bonuses: &TimedBonuses,
    now: f32,
) -> Option<i32> {
    if !record.regen_allowed(now) || energy.is_full() {
        return None;
    }
    Some(1 + bonuses.energy_regen.active(now))
}

// =============================================================================
// ENTITY-LEVEL SYSTEMS (operate on World)
// =============================================================================

/// Install or replace the bonus of `kind`. The previous magnitude and expiry
/// are overwritten and the 1-second tick restarts from `now`.
#[allow(clippy::too_many_arguments)]
pub fn apply_timed_bonus(
    world: &mut World,
    player: Entity,
    kind: BonusKind,
    magnitude: i32,
    duration: f32,
    now: f32,
    timers: &mut TimerScheduler,
    events: &mut EventQueue,
) -> GameResult<()> {
    let mut bonuses = world
        .get::<&mut TimedBonuses>(player)
        .map_err(|_| GameError::missing::<TimedBonuses>(player))?;

    let expires_at = now + duration;
    *bonuses.get_mut(kind) = TimedBonus {
        magnitude,
        expires_at,
    };

    timers.cancel(player, TimerKind::Bonus(kind));
    timers.schedule(
        player,
        TimerKind::Bonus(kind),
        now + BONUS_TICK_INTERVAL,
        BONUS_TICK_INTERVAL,
    );

    log::debug!("Bonus {:?} {:+} until t={:.2}", kind, magnitude, expires_at);
    events.push(GameEvent::BonusApplied {
        kind,
        magnitude,
        expires_at,
    });
    Ok(())
}

/// One 1-second tick of a timed bonus. Clears the bonus and disarms once
/// expired; otherwise regen kinds grant `1 + magnitude` to their resource.
/// The damage kind has no per-tick write: `effective_strength` reads it live.
pub fn tick_bonus(
    world: &mut World,
    player: Entity,
    kind: BonusKind,
    now: f32,
    events: &mut EventQueue,
) -> GameResult<TimerOutcome> {
    let (health, energy, bonuses) = world
        .query_one_mut::<(&mut Health, &mut Energy, &mut TimedBonuses)>(player)
        .map_err(|_| GameError::missing::<TimedBonuses>(player))?;

    let bonus = bonuses.get_mut(kind);
    if now >= bonus.expires_at {
        bonus.magnitude = 0;
        events.push(GameEvent::BonusExpired { kind });
        return Ok(TimerOutcome::Disarm);
    }

    let amount = 1 + bonus.magnitude;
    match kind {
        BonusKind::EnergyRegen => {
            if !energy.is_full() {
                energy.add(amount);
                events.push(GameEvent::EnergyChanged {
                    current: energy.current(),
                });
            }
        }
        BonusKind::HealthRegen => {
            if !health.is_dead() && health.current() < health.max() {
                health.heal(amount);
                events.push(GameEvent::HealthChanged {
                    entity: player,
                    current: health.current(),
                    max: health.max(),
                });
            }
        }
        BonusKind::Damage => {}
    }
    Ok(TimerOutcome::Rearm)
}

/// Passive HP regeneration tick (every 0.5s)
pub fn tick_health_regen(
    world: &mut World,
    player: Entity,
    now: f32,
    events: &mut EventQueue,
) -> GameResult<()> {
    let (health, record, bonuses) = world
        .query_one_mut::<(&mut Health, &DamageRecord, &TimedBonuses)>(player)
        .map_err(|_| GameError::missing::<Health>(player))?;

    if let Some(amount) = passive_heal_amount(health, record, bonuses, now) {
        let before = health.current();
        health.heal(amount);
        if health.current() != before {
            events.push(GameEvent::HealthChanged {
                entity: player,
                current: health.current(),
                max: health.max(),
            });
        }
    }
    Ok(())
}

/// Passive energy regeneration tick (every 0.25s)
pub fn tick_energy_regen(
    world: &mut World,
    player: Entity,
    now: f32,
    events: &mut EventQueue,
) -> GameResult<()> {
    let (energy, record, bonuses) = world
        .query_one_mut::<(&mut Energy, &DamageRecord, &TimedBonuses)>(player)
        .map_err(|_| GameError::missing::<Energy>(player))?;

    if let Some(amount) = passive_energy_amount(energy, record, bonuses, now) {
        let before = energy.current();
        energy.add(amount);
        if energy.current() != before {
            events.push(GameEvent::EnergyChanged {
                current: energy.current(),
            });
        }
    }
    Ok(())
}
