//! Canvas, character footprint and distance thresholds.

/// Side length of every character's square bounding box
pub const CHARACTER_SIZE: f32 = 100.0;

/// Default canvas width when no level overrides it
pub const DEFAULT_CANVAS_WIDTH: f32 = 1280.0;
/// Default canvas height when no level overrides it
pub const DEFAULT_CANVAS_HEIGHT: f32 = 720.0;

/// Minimum player/enemy separation; also the spawn exclusion radius
pub const SAFE_DISTANCE: f32 = CHARACTER_SIZE;
/// Distance at which an enemy notices and chases the player
pub const VISIBILITY_RANGE: f32 = 400.0;

/// Player melee reach (centre to centre)
pub const MAX_PLAYER_ATTACK_DISTANCE: f32 = CHARACTER_SIZE * 1.15;
/// Enemy melee reach (centre to centre)
pub const MAX_ENEMY_ATTACK_DISTANCE: f32 = 100.0;
/// How close the player must be to feed a cat
pub const CAT_FEED_DISTANCE: f32 = CHARACTER_SIZE * 3.0 / 4.0;

/// Where the player is put back after dying
pub const PLAYER_CHECKPOINT: (f32, f32) = (0.0, 0.0);

/// Speeds are expressed in units per frame at this rate
pub const REFERENCE_FRAME_RATE: f32 = 60.0;
