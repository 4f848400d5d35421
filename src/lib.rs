//! Rockpush - a tile-based cave platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (sweeps, rocks, player, camera, gate)
//! - `level`: Decoded level model and tile/object layer decoding
//! - `draw`: Draw directives handed to the rendering backend
//! - `tuning`: Data-driven physics constants and sprite metrics

pub mod draw;
pub mod level;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelError, LevelLayers, LevelLoadError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Rock horizontal speed bound (pixels per tick, both directions)
    pub const ROCK_MAX_SPEED: f32 = 3.0;

    /// Walk animation frames and ticks per frame
    pub const WALK_FRAMES: u8 = 4;
    pub const WALK_FRAME_TICKS: u32 = 5;

    /// Push animation frames and ticks per frame
    pub const PUSH_FRAMES: u8 = 2;
    pub const PUSH_FRAME_TICKS: u32 = 10;

    /// Idle gate glow ratio is tracked in these many steps per unit
    pub const GLOW_RESOLUTION: i32 = 100;

    /// Exit glow is tracked in these many steps per unit
    pub const EXIT_GLOW_RESOLUTION: i32 = 1000;
}

/// Round to the nearest integer, ties away from zero:
/// `floor(x + 0.5)` for positive, `ceil(x - 0.5)` otherwise.
#[inline]
pub fn round_half_away_from_zero(x: f32) -> i32 {
    if x >= 0.0 {
        (x + 0.5).floor() as i32
    } else {
        (x - 0.5).ceil() as i32
    }
}

/// One-pixel step that moves a displacement toward zero
#[inline]
pub(crate) fn step_toward_zero(d: i32) -> i32 {
    -d.signum()
}
