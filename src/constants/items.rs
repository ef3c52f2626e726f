//! Loot and cat reward constants.

/// Smallest stack a loot roll can grant
pub const LOOT_COUNT_MIN: u32 = 1;
/// Largest stack a loot roll can grant
pub const LOOT_COUNT_MAX: u32 = 2;

/// Experience granted for feeding a cat
pub const CAT_BONUS_EXP: u32 = 10;
/// Percent chance that feeding a cat yields an item
pub const CAT_DROP_CHANCE: u8 = 50;
/// Horizontal distance a fleeing cat covers per flee step
pub const CAT_FLEE_SPEED: f32 = 40.0;
