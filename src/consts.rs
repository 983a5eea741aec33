//! Fixed simulation constants.
//!
//! Tunables that vary per car or per preset live in
//! `sim::physics_config::PhysicsConfig`; everything here is baked into the
//! simulation itself and shared by every run.

/// Simulation tick rate (ticks per second)
pub const TICK_RATE: f32 = 60.0;
/// Length of one simulation tick in seconds
pub const TICK_TIME: f32 = 1.0 / TICK_RATE;

/// Minimum |speed| below which steering has no effect
pub const TURN_SPEED_EPSILON: f32 = 0.1;

/// Per-tick geometric decay applied to angular velocity
pub const ANGULAR_DAMPING: f32 = 0.94;
/// Per-tick geometric decay applied to the drift angle
pub const DRIFT_DAMPING: f32 = 0.94;
/// Per-tick rolling drag applied to forward speed (when not e-braking)
pub const SPEED_DRAG: f32 = 0.98;
/// Extra velocity scale while turning without the e-brake
pub const TURN_DRAG: f32 = 0.94;
/// Divisor converting |drift angle| * speed into per-tick speed bleed
pub const DRIFT_BLEED_DIVISOR: f32 = 1000.0;

/// Unscaled vehicle bounding box (world units)
pub const VEHICLE_BASE_WIDTH: f32 = 20.0;
pub const VEHICLE_BASE_HEIGHT: f32 = 40.0;

/// Capacity of the replay buffer and the ghost run buffer,
/// about 30 seconds of history at [`TICK_RATE`]
pub const HISTORY_CAPACITY: usize = 1800;

/// Replay status updates are emitted once per this many replay ticks (~10 Hz)
pub const REPLAY_STATUS_INTERVAL: u64 = 6;

/// Fallback world extents used when no track map is loaded
pub mod viewport {
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;
}

pub mod scoring {
    /// |speed| below this ends a drift without banking
    pub const MIN_SPEED: f32 = 3.0;
    /// |drift angle| (degrees) at or above this accrues score
    pub const MIN_DRIFT_ANGLE: f32 = 15.0;
    /// Base accrual rate at multiplier 1.0, combo 1, angle bonus 1
    pub const BASE_POINTS_PER_SECOND: f32 = 500.0;
    /// Per-combo-link addition to the combo multiplier
    pub const COMBO_BONUS: f32 = 0.2;
    /// Grace period (ms) below the angle threshold before banking
    pub const COMBO_DECAY_MS: f32 = 2000.0;
    /// Flat points awarded per direction flip, scaled by the new combo count
    pub const DIRECTION_BONUS: f32 = 500.0;
    /// Degrees of drift angle per +1.0 of angle bonus
    pub const ANGLE_BONUS_DIVISOR: f32 = 30.0;
}

pub mod clipping {
    /// Default zone color sampled from the track bitmap (RGB)
    pub const TARGET_COLOR: [u8; 3] = [255, 255, 255];
    /// Per-channel match tolerance on 0-255 channels
    pub const TOLERANCE: u8 = 50;
    /// Multiplier returned while inside a zone
    pub const BONUS_MULTIPLIER: f32 = 2.5;
    /// Fraction of in-bounds sample points that must match
    pub const MIN_COVERAGE: f32 = 0.3;
}
