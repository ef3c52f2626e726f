//! Data-driven entity spawning and lifecycle.
//!
//! Enemy kinds are rows in a table, so adding one needs no new spawning
//! code. This module is the only place entities enter or leave the world,
//! and it keeps each entity's timers in step with its lifetime.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};
use rand::Rng;

use crate::components::{
    AttackCooldown, Cat, CatBehavior, DamageFormula, DamageRecord, DropChance, Enemy, EnemyKind,
    Energy, Experience, ExpReward, Health, Inventory, Name, Player, PlayerClass, Position, Speed,
    SpriteFrame, Stats, TimedBonuses,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::level::{Level, Rect};
use crate::systems::ai;
use crate::time_system::{TimerKind, TimerScheduler};

/// Definition of an enemy type - all the data needed to spawn one
#[derive(Debug, Clone)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    /// Display name
    pub name: &'static str,
    pub health: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub intellect: i32,
    /// Units per reference frame
    pub speed: f32,
    /// Seconds between attacks
    pub attack_interval: f32,
    pub exp_reward: u32,
    /// Percent chance of an item drop
    pub drop_chance: u8,
    pub formula: DamageFormula,
}

impl EnemyDef {
    /// Spawn this enemy type at the given position. Timers are not armed;
    /// use [`spawn_enemy_at`] for a live enemy.
    pub fn spawn(&self, world: &mut World, position: Vec2, now: f32, rng: &mut impl Rng) -> Entity {
        let mut builder = EntityBuilder::new();
        builder
            .add(Enemy { kind: self.kind })
            .add(Name(self.name.to_string()))
            .add(Position::from_vec(position))
            .add(Health::new(self.health))
            .add(Stats::new(self.strength, self.dexterity, self.intellect))
            .add(Speed(self.speed))
            .add(AttackCooldown::new(self.attack_interval))
            .add(self.formula)
            .add(ExpReward(self.exp_reward))
            .add(DropChance(self.drop_chance))
            .add(ai::new_enemy_ai(now, rng))
            .add(SpriteFrame::default());
        world.spawn(builder.build())
    }
}

/// Predefined enemy types
pub mod enemies {
    use super::*;

    pub const EXHAUSTED_STUDENT: EnemyDef = EnemyDef {
        kind: EnemyKind::ExhaustedStudent,
        name: "Exhausted Student",
        health: EXHAUSTED_STUDENT_HEALTH,
        strength: EXHAUSTED_STUDENT_STRENGTH,
        dexterity: EXHAUSTED_STUDENT_DEXTERITY,
        intellect: EXHAUSTED_STUDENT_INTELLECT,
        speed: ENEMY_BASE_SPEED * EXHAUSTED_STUDENT_SPEED,
        attack_interval: EXHAUSTED_STUDENT_ATTACK_INTERVAL,
        exp_reward: EXHAUSTED_STUDENT_EXP,
        drop_chance: EXHAUSTED_STUDENT_DROP_CHANCE,
        formula: DamageFormula::Brute,
    };

    pub const EXCELLENT_STUDENT: EnemyDef = EnemyDef {
        kind: EnemyKind::ExcellentStudent,
        name: "Student on Scholarship",
        health: EXCELLENT_STUDENT_HEALTH,
        strength: EXCELLENT_STUDENT_STRENGTH,
        dexterity: EXCELLENT_STUDENT_DEXTERITY,
        intellect: EXCELLENT_STUDENT_INTELLECT,
        speed: ENEMY_BASE_SPEED * EXCELLENT_STUDENT_SPEED,
        attack_interval: EXCELLENT_STUDENT_ATTACK_INTERVAL,
        exp_reward: EXCELLENT_STUDENT_EXP,
        drop_chance: EXCELLENT_STUDENT_DROP_CHANCE,
        formula: DamageFormula::Scholar,
    };

    pub const ALL: [EnemyKind; 2] = [EnemyKind::ExhaustedStudent, EnemyKind::ExcellentStudent];
}

pub fn enemy_def(kind: EnemyKind) -> &'static EnemyDef {
    match kind {
        EnemyKind::ExhaustedStudent => &enemies::EXHAUSTED_STUDENT,
        EnemyKind::ExcellentStudent => &enemies::EXCELLENT_STUDENT,
    }
}

/// Uniform pick over known enemy kinds
pub fn random_enemy_kind(rng: &mut impl Rng) -> EnemyKind {
    enemies::ALL[rng.gen_range(0..enemies::ALL.len())]
}

// =============================================================================
// PLAYER
// =============================================================================

/// Spawn the player. Max HP is fixed by base health; the class sets the
/// starting HP, energy, stats, speed and attack cadence.
pub fn spawn_player(
    world: &mut World,
    class: PlayerClass,
    position: Vec2,
    inventory_slots: usize,
) -> Entity {
    let def = class.def();
    let max_hp = (BASE_HEALTH as f32 * MAX_HP_MULTIPLIER) as i32;

    let mut builder = EntityBuilder::new();
    builder
        .add(Player)
        .add(Name(class.name().to_string()))
        .add(class)
        .add(Position::from_vec(position))
        .add(Health::with_current(def.health, max_hp))
        .add(Energy::new(def.energy))
        .add(Stats::new(def.strength, def.dexterity, def.intellect))
        .add(Speed(def.speed))
        .add(Experience::new())
        .add(AttackCooldown::new(def.attack_interval))
        .add(DamageRecord::default())
        .add(TimedBonuses::default())
        .add(DamageFormula::Standard)
        .add(Inventory::new(inventory_slots))
        .add(SpriteFrame::default());
    world.spawn(builder.build())
}

/// Arm the player's passive regeneration timers
pub fn arm_player_timers(timers: &mut TimerScheduler, player: Entity, now: f32) {
    timers.schedule(
        player,
        TimerKind::HealthRegen,
        now + HEALTH_REGEN_INTERVAL,
        HEALTH_REGEN_INTERVAL,
    );
    timers.schedule(
        player,
        TimerKind::EnergyRegen,
        now + ENERGY_REGEN_INTERVAL,
        ENERGY_REGEN_INTERVAL,
    );
}

// =============================================================================
// SPAWN POINT SEARCH
// =============================================================================

fn random_point(level: &Level, rng: &mut impl Rng) -> Vec2 {
    // Keep the whole character box on the canvas
    let max_x = ((level.width - CHARACTER_SIZE) as i32).max(2);
    let max_y = ((level.height - CHARACTER_SIZE) as i32).max(2);
    Vec2::new(
        rng.gen_range(1..max_x) as f32,
        rng.gen_range(1..max_y) as f32,
    )
}

/// Sample up to `max_attempts` points, accepting the first that is more
/// than the safe distance (per axis) from every enemy and cat.
/// `None` means no valid point; callers skip the spawn.
pub fn find_safe_spawn_point(
    world: &World,
    level: &Level,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> Option<Vec2> {
    let occupied: Vec<Vec2> = world
        .query::<&Position>()
        .with::<&Enemy>()
        .iter()
        .chain(world.query::<&Position>().with::<&Cat>().iter())
        .map(|(_, p)| p.as_vec())
        .collect();

    for _ in 0..max_attempts {
        let candidate = random_point(level, rng);
        let clear = occupied.iter().all(|o| {
            let d = (candidate - *o).abs();
            !(d.x <= SAFE_DISTANCE && d.y <= SAFE_DISTANCE)
        });
        if clear {
            return Some(candidate);
        }
    }
    log::warn!("No safe spawn point after {} attempts", max_attempts);
    None
}

/// Looser search for bulk spawns: any point whose character box does not
/// overlap another entity's box
pub fn find_open_point(
    world: &World,
    level: &Level,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> Option<Vec2> {
    let boxes: Vec<Rect> = world
        .query::<&Position>()
        .iter()
        .map(|(_, p)| p.rect())
        .collect();

    for _ in 0..max_attempts {
        let candidate = random_point(level, rng);
        let rect = Rect::new(candidate.x, candidate.y, CHARACTER_SIZE, CHARACTER_SIZE);
        if !boxes.iter().any(|b| b.intersects(&rect)) {
            return Some(candidate);
        }
    }
    None
}

// =============================================================================
// ENEMIES AND CATS
// =============================================================================

/// Spawn an enemy and arm its attack timer
pub fn spawn_enemy_at(
    world: &mut World,
    timers: &mut TimerScheduler,
    kind: EnemyKind,
    position: Vec2,
    now: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> Entity {
    let def = enemy_def(kind);
    let entity = def.spawn(world, position, now, rng);
    timers.schedule(
        entity,
        TimerKind::EnemyAttack,
        now + def.attack_interval,
        def.attack_interval,
    );
    log::debug!("Spawned {} at ({:.0}, {:.0})", def.name, position.x, position.y);
    events.push(GameEvent::EnemySpawned {
        entity,
        kind,
        position,
    });
    entity
}

/// Spawn `count` random enemies at safe points, falling back to any open
/// point. Returns how many were placed.
pub fn spawn_enemy_wave(
    world: &mut World,
    level: &Level,
    timers: &mut TimerScheduler,
    count: usize,
    now: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> usize {
    let mut spawned = 0;
    for _ in 0..count {
        let point = find_safe_spawn_point(world, level, rng, SPAWN_SEARCH_ATTEMPTS)
            .or_else(|| find_open_point(world, level, rng, SPAWN_SEARCH_ATTEMPTS));
        let Some(point) = point else {
            log::warn!("Skipping enemy spawn: canvas is crowded");
            continue;
        };
        let kind = random_enemy_kind(rng);
        spawn_enemy_at(world, timers, kind, point, now, rng, events);
        spawned += 1;
    }
    spawned
}

pub fn spawn_cat_at(world: &mut World, position: Vec2, events: &mut EventQueue) -> Entity {
    let entity = world.spawn((
        Cat,
        CatBehavior::Idle,
        Name("Cat".to_string()),
        Position::from_vec(position),
        SpriteFrame::default(),
    ));
    events.push(GameEvent::CatSpawned { entity, position });
    entity
}

/// Spawn up to `count` cats at safe points
pub fn spawn_cats(
    world: &mut World,
    level: &Level,
    count: usize,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> usize {
    let mut spawned = 0;
    for _ in 0..count {
        match find_safe_spawn_point(world, level, rng, SPAWN_SEARCH_ATTEMPTS) {
            Some(point) => {
                spawn_cat_at(world, point, events);
                spawned += 1;
            }
            None => log::warn!("Skipping cat spawn: no safe point"),
        }
    }
    spawned
}

/// Remove an entity and every timer attached to it. Timers go first so no
/// tick can reach a half-removed entity.
pub fn despawn(world: &mut World, timers: &mut TimerScheduler, entity: Entity) -> bool {
    timers.cancel_for_entity(entity);
    world.despawn(entity).is_ok()
}

/// Population targets for a fresh level
#[derive(Debug, Clone, Copy)]
pub struct SpawnConfig {
    pub enemy_count: usize,
    pub cat_count: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enemy_count: INITIAL_ENEMY_COUNT,
            cat_count: INITIAL_CAT_COUNT,
        }
    }
}

impl SpawnConfig {
    /// Fill the level: its own spawn points first, then random placement.
    /// Returns (enemies, cats) spawned.
    pub fn populate(
        &self,
        world: &mut World,
        level: &Level,
        timers: &mut TimerScheduler,
        now: f32,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) -> (usize, usize) {
        let mut enemies = 0;
        for &point in level.enemy_spawns.iter().take(self.enemy_count) {
            let kind = random_enemy_kind(rng);
            spawn_enemy_at(world, timers, kind, point, now, rng, events);
            enemies += 1;
        }
        enemies += spawn_enemy_wave(
            world,
            level,
            timers,
            self.enemy_count - enemies,
            now,
            rng,
            events,
        );

        let mut cats = 0;
        for &point in level.cat_spawns.iter().take(self.cat_count) {
            spawn_cat_at(world, point, events);
            cats += 1;
        }
        cats += spawn_cats(world, level, self.cat_count - cats, rng, events);

        log::info!("Level populated with {} enemies and {} cats", enemies, cats);
        (enemies, cats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(9)
    }

    #[test]
    fn test_player_starts_with_class_stats() {
        let mut world = World::new();
        let player = spawn_player(&mut world, PlayerClass::Humanitarian, Vec2::ZERO, 4);
        let health = *world.get::<&Health>(player).unwrap();
        assert_eq!(health.current(), HUMANITARIAN_HEALTH);
        assert_eq!(health.max(), 150);
        assert_eq!(world.get::<&Energy>(player).unwrap().current(), HUMANITARIAN_ENERGY);
        assert_eq!(world.get::<&AttackCooldown>(player).unwrap().interval, 0.4);
        assert_eq!(world.get::<&Inventory>(player).unwrap().max_slots(), 4);
    }

    #[test]
    fn test_enemy_gets_attack_timer() {
        let mut world = World::new();
        let mut timers = TimerScheduler::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        let e = spawn_enemy_at(
            &mut world,
            &mut timers,
            EnemyKind::ExcellentStudent,
            Vec2::new(500.0, 300.0),
            2.0,
            &mut rng,
            &mut events,
        );
        assert_eq!(
            timers.peek_next(),
            Some((e, TimerKind::EnemyAttack, 2.0 + EXCELLENT_STUDENT_ATTACK_INTERVAL))
        );
        assert_eq!(world.get::<&Health>(e).unwrap().current(), EXCELLENT_STUDENT_HEALTH);
        assert_eq!(*world.get::<&DamageFormula>(e).unwrap(), DamageFormula::Scholar);
    }

    #[test]
    fn test_despawn_cancels_timers() {
        let mut world = World::new();
        let mut timers = TimerScheduler::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        let e = spawn_enemy_at(
            &mut world,
            &mut timers,
            EnemyKind::ExhaustedStudent,
            Vec2::new(500.0, 300.0),
            0.0,
            &mut rng,
            &mut events,
        );
        assert!(despawn(&mut world, &mut timers, e));
        assert_eq!(timers.count_for_entity(e), 0);
        assert!(!world.contains(e));
        assert!(!despawn(&mut world, &mut timers, e));
    }

    #[test]
    fn test_safe_point_keeps_distance() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        let level = Level::open(1280.0, 720.0);
        spawn_cat_at(&mut world, Vec2::new(600.0, 300.0), &mut events);

        for _ in 0..50 {
            let p = find_safe_spawn_point(&world, &level, &mut rng, SPAWN_SEARCH_ATTEMPTS).unwrap();
            let d = (p - Vec2::new(600.0, 300.0)).abs();
            assert!(d.x > SAFE_DISTANCE || d.y > SAFE_DISTANCE);
            assert!(p.x + CHARACTER_SIZE < level.width && p.y + CHARACTER_SIZE < level.height);
        }
    }

    #[test]
    fn test_exhausted_search_returns_none_and_spawns_nothing() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        // Canvas so small that a single cat covers every candidate point
        let level = Level::open(180.0, 180.0);
        spawn_cat_at(&mut world, Vec2::new(40.0, 40.0), &mut events);

        assert!(find_safe_spawn_point(&world, &level, &mut rng, SPAWN_SEARCH_ATTEMPTS).is_none());

        let before = world.len();
        assert_eq!(spawn_cats(&mut world, &level, 2, &mut rng, &mut events), 0);
        assert_eq!(world.len(), before);
    }

    #[test]
    fn test_populate_uses_level_spawns_first() {
        let mut world = World::new();
        let mut timers = TimerScheduler::new();
        let mut events = EventQueue::new();
        let mut rng = rng();
        let mut level = Level::open(1280.0, 720.0);
        level.enemy_spawns.push(Vec2::new(900.0, 500.0));

        let (enemies, cats) = SpawnConfig::default().populate(
            &mut world,
            &level,
            &mut timers,
            0.0,
            &mut rng,
            &mut events,
        );
        assert_eq!(enemies, INITIAL_ENEMY_COUNT);
        assert_eq!(cats, INITIAL_CAT_COUNT);
        assert!(world
            .query::<(&Enemy, &Position)>()
            .iter()
            .any(|(_, (_, p))| p.as_vec() == Vec2::new(900.0, 500.0)));
        assert_eq!(timers.len(), INITIAL_ENEMY_COUNT);
    }
}
