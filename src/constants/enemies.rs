//! Enemy stats and AI timing constants.

/// Shortest hold after losing sight of the player (seconds)
pub const ENEMY_GRACE_MIN: f32 = 1.0;
/// Longest hold after losing sight of the player (seconds)
pub const ENEMY_GRACE_MAX: f32 = 3.0;
/// Wander phase length range in whole seconds (inclusive)
pub const ENEMY_WANDER_MIN_SECS: u32 = 1;
pub const ENEMY_WANDER_MAX_SECS: u32 = 5;
/// Wait phase length range in whole seconds (inclusive)
pub const ENEMY_WAIT_MIN_SECS: u32 = 2;
pub const ENEMY_WAIT_MAX_SECS: u32 = 5;
/// Base enemy speed before the per-kind multiplier
pub const ENEMY_BASE_SPEED: f32 = 1.0;

// EXHAUSTED STUDENT
pub const EXHAUSTED_STUDENT_HEALTH: i32 = 25;
pub const EXHAUSTED_STUDENT_STRENGTH: i32 = 2;
pub const EXHAUSTED_STUDENT_DEXTERITY: i32 = 0;
pub const EXHAUSTED_STUDENT_INTELLECT: i32 = 2;
/// Multiplier on the base enemy speed
pub const EXHAUSTED_STUDENT_SPEED: f32 = 0.75;
/// Seconds between attacks
pub const EXHAUSTED_STUDENT_ATTACK_INTERVAL: f32 = 0.75;
pub const EXHAUSTED_STUDENT_EXP: u32 = 20;
/// Percent chance of dropping an item
pub const EXHAUSTED_STUDENT_DROP_CHANCE: u8 = 5;

// EXCELLENT STUDENT
pub const EXCELLENT_STUDENT_HEALTH: i32 = 50;
pub const EXCELLENT_STUDENT_STRENGTH: i32 = 1;
pub const EXCELLENT_STUDENT_DEXTERITY: i32 = 2;
pub const EXCELLENT_STUDENT_INTELLECT: i32 = 5;
/// Multiplier on the base enemy speed
pub const EXCELLENT_STUDENT_SPEED: f32 = 0.9;
/// Seconds between attacks
pub const EXCELLENT_STUDENT_ATTACK_INTERVAL: f32 = 0.5;
pub const EXCELLENT_STUDENT_EXP: u32 = 50;
/// Percent chance of dropping an item
pub const EXCELLENT_STUDENT_DROP_CHANCE: u8 = 15;
