//! Game simulation - timer dispatch and the per-frame system order.

use crate::components::{InventoryEntry, Inventory, ItemKind};
use crate::error::{GameError, GameResult};
use crate::events::{EventQueue, GameEvent};
use crate::input::InputState;
use crate::systems::{self, ai, cats, combat, effects, item_defs};
use crate::time_system::{ScheduledTimer, TimerKind, TimerOutcome};
use crate::ui::PlayerUi;

use super::GameState;

/// Inventory panel state owned by the session
#[derive(Debug, Clone, Default)]
pub struct InventoryPanel {
    pub open: bool,
    /// Item whose description is currently shown
    pub described: Option<ItemKind>,
}

/// Log a failed frame step and carry on with the frame
fn log_step<T>(step: &str, result: GameResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{} failed: {}", step, e);
            None
        }
    }
}

// =============================================================================
// TIMERS
// =============================================================================

/// Run one fired timer against its entity
pub fn dispatch_timer(
    state: &mut GameState,
    timer: &ScheduledTimer,
    events: &mut EventQueue,
) -> GameResult<TimerOutcome> {
    let now = state.game_clock.time;
    let world = &mut state.world;

    match timer.kind {
        TimerKind::HealthRegen => {
            effects::tick_health_regen(world, timer.entity, now, events)?;
            Ok(TimerOutcome::Rearm)
        }
        TimerKind::EnergyRegen => {
            effects::tick_energy_regen(world, timer.entity, now, events)?;
            Ok(TimerOutcome::Rearm)
        }
        TimerKind::Bonus(kind) => effects::tick_bonus(world, timer.entity, kind, now, events),
        TimerKind::EnemyAttack => {
            let hit = combat::enemy_attack_tick(
                world,
                timer.entity,
                state.player_entity,
                now,
                state.difficulty,
                events,
            )?;
            // Resolve a lethal hit before any later timer in this frame can
            // heal the player back above zero
            if hit {
                combat::check_player_death(world, state.player_entity, events)?;
            }
            Ok(TimerOutcome::Rearm)
        }
        TimerKind::CatFlee => {
            cats::flee_step(world, &state.level, &mut state.timers, timer.entity, events)
        }
    }
}

/// Fire every timer due by `frame_end` in fire-time order, advancing the
/// clock to each fire time first. Returns how many fired.
pub fn run_due_timers(state: &mut GameState, frame_end: f32, events: &mut EventQueue) -> usize {
    puffin::profile_function!();

    let mut fired = 0;
    while let Some(timer) = state.timers.pop_due(frame_end) {
        if !state.world.contains(timer.entity) {
            log::debug!("Dropping {:?} timer for missing {:?}", timer.kind, timer.entity);
            continue;
        }
        if timer.fire_time > state.game_clock.time {
            state.game_clock.advance_to(timer.fire_time);
        }
        fired += 1;

        let outcome = dispatch_timer(state, &timer, events);
        if let Some(TimerOutcome::Rearm) = log_step("Timer", outcome) {
            state.timers.rearm(timer);
        }
    }
    fired
}

// =============================================================================
// FRAME STEPS
// =============================================================================

/// Attack, feed, inventory toggle, item use and item description, in that
/// order
pub fn handle_player_actions(
    state: &mut GameState,
    input: &InputState,
    panel: &mut InventoryPanel,
    ui: &mut dyn PlayerUi,
    events: &mut EventQueue,
) {
    let now = state.game_clock.time;
    let player = state.player_entity;

    if input.attack {
        if let Some(outcome) = log_step(
            "Player attack",
            systems::player_attack(&mut state.world, player, now, ui, events),
        ) {
            log::debug!("Attack: {:?}", outcome);
        }
    }

    if input.feed_cat {
        log_step(
            "Feed cat",
            cats::feed_cat(
                &mut state.world,
                player,
                &state.level,
                &mut state.timers,
                now,
                &mut state.rng,
                events,
            ),
        );
    }

    if input.toggle_inventory {
        panel.open = !panel.open;
        events.push(GameEvent::InventoryToggled { open: panel.open });
        if !panel.open && panel.described.take().is_some() {
            ui.hide_item_description();
        }
    }

    if let Some(kind) = input.use_item {
        if panel.open {
            log_step(
                "Use item",
                systems::use_item(&mut state.world, player, kind, now, &mut state.timers, events),
            );
        } else {
            log::debug!("Ignoring use of {:?}: inventory closed", kind);
        }
    }

    let wanted = input.describe_item.filter(|_| panel.open);
    if wanted != panel.described {
        match wanted {
            Some(kind) => ui.show_item_description(&item_defs::describe(kind)),
            None => ui.hide_item_description(),
        }
        panel.described = wanted;
    }
}

/// One full frame: due timers, then movement, actions, AI, death
/// resolution and the player death check
pub fn run_frame(
    state: &mut GameState,
    input: &InputState,
    dt: f32,
    panel: &mut InventoryPanel,
    ui: &mut dyn PlayerUi,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    let frame_end = state.game_clock.time + dt;
    run_due_timers(state, frame_end, events);
    state.game_clock.advance_to(frame_end);
    let now = frame_end;
    let player = state.player_entity;

    log_step(
        "Player movement",
        systems::move_player(
            &mut state.world,
            player,
            &state.level,
            input.movement_direction(),
            dt,
            events,
        ),
    );

    handle_player_actions(state, input, panel, ui, events);

    log_step(
        "Enemy AI",
        ai::update_enemies(
            &mut state.world,
            player,
            &state.level,
            now,
            dt,
            &mut state.rng,
            events,
        ),
    );

    log_step(
        "Death resolution",
        systems::remove_dead_entities(
            &mut state.world,
            player,
            &state.level,
            &mut state.timers,
            now,
            &mut state.rng,
            events,
        ),
    );

    log_step(
        "Player death check",
        systems::check_player_death(&mut state.world, player, events),
    );
}

/// Snapshot of the player's inventory in slot order
pub fn inventory_snapshot(state: &GameState) -> GameResult<Vec<InventoryEntry>> {
    let inventory = state
        .world
        .get::<&Inventory>(state.player_entity)
        .map_err(|_| GameError::missing::<Inventory>(state.player_entity))?;
    Ok(inventory.get_all_items().to_vec())
}
