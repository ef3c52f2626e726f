//! Timer periods and cooldowns (seconds of simulation time).

/// Passive HP regeneration period
pub const HEALTH_REGEN_INTERVAL: f32 = 0.5;
/// Passive energy regeneration period
pub const ENERGY_REGEN_INTERVAL: f32 = 0.25;
/// Period of every timed bonus tick
pub const BONUS_TICK_INTERVAL: f32 = 1.0;
/// Damage-free time required before passive regeneration resumes
pub const REGEN_DAMAGE_COOLDOWN: f32 = 3.0;
/// Period of a fleeing cat's movement step
pub const CAT_FLEE_STEP_INTERVAL: f32 = 0.06;
/// Slack when comparing accumulated f32 timestamps against an interval
pub const TIME_EPSILON: f32 = 1e-4;
