//! Core gameplay constants (player stats, XP, inventory, population).

/// Base health every character is built from; max HP derives from it
pub const BASE_HEALTH: i32 = 100;
/// Max HP = base health * this
pub const MAX_HP_MULTIPLIER: f32 = 1.5;
/// Passive healing only runs below max HP divided by this (two thirds)
pub const PASSIVE_HEAL_CEILING_DIVISOR: f32 = 1.5;
/// Energy is clamped to [0, MAX_ENERGY]
pub const MAX_ENERGY: i32 = 100;

/// Experience needed for each level-up
pub const XP_PER_LEVEL: u32 = 100;

/// HP restored when the player is reset after death
pub const DEATH_RESET_HEALTH: i32 = 100;
/// Energy restored when the player is reset after death
pub const DEATH_RESET_ENERGY: i32 = 50;
/// Experience forfeited on death
pub const DEATH_XP_PENALTY: u32 = 25;

/// Attack energy cost = damage / this
pub const ATTACK_ENERGY_DIVISOR: f32 = 1.5;
/// Multiplier applied to enemy damage
pub const DEFAULT_DIFFICULTY_FACTOR: f32 = 1.0;

/// Distinct item kinds the player can carry
pub const DEFAULT_INVENTORY_SLOTS: usize = 4;

/// Enemies present when a session starts
pub const INITIAL_ENEMY_COUNT: usize = 3;
/// Cats present when a session starts
pub const INITIAL_CAT_COUNT: usize = 3;
/// Respawn wave size range (inclusive) once every enemy is dead
pub const RESPAWN_WAVE_MIN: usize = 1;
pub const RESPAWN_WAVE_MAX: usize = 3;
/// Random samples tried before a spawn search gives up
pub const SPAWN_SEARCH_ATTEMPTS: u32 = 100;

// TECHNICIAN
/// Seconds between technician attacks
pub const TECHNICIAN_ATTACK_INTERVAL: f32 = 0.3;
pub const TECHNICIAN_HEALTH: i32 = 100;
pub const TECHNICIAN_ENERGY: i32 = 40;
pub const TECHNICIAN_STRENGTH: i32 = 3;
pub const TECHNICIAN_DEXTERITY: i32 = 2;
pub const TECHNICIAN_INTELLECT: i32 = 5;
/// Units per reference frame
pub const TECHNICIAN_SPEED: f32 = 2.0;

// HUMANITARIAN
/// Seconds between humanitarian attacks
pub const HUMANITARIAN_ATTACK_INTERVAL: f32 = 0.4;
pub const HUMANITARIAN_HEALTH: i32 = 85;
pub const HUMANITARIAN_ENERGY: i32 = 60;
pub const HUMANITARIAN_STRENGTH: i32 = 2;
pub const HUMANITARIAN_DEXTERITY: i32 = 3;
pub const HUMANITARIAN_INTELLECT: i32 = 5;
/// Units per reference frame
pub const HUMANITARIAN_SPEED: f32 = 2.5;
