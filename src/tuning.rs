//! Data-driven game tuning
//!
//! Physics constants and sprite metrics. Defaults match the shipped game feel;
//! a JSON file may override any subset of fields.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Tunable physics constants and sprite metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal walking speed (pixels per tick)
    pub player_speed: i32,
    /// Vertical speed granted by a jump
    pub jump_speed: i32,
    /// Speed removed from every falling body each tick
    pub gravity: i32,
    /// Fastest any body may fall (positive magnitude)
    pub terminal_velocity: i32,
    /// Player collision box relative to the player position
    pub player_hit_box: Rect,

    // === Rocks ===
    /// Horizontal speed lost to friction each tick
    pub rock_friction: f32,
    /// Horizontal speed gained per tick of pushing
    pub rock_push_accel: f32,
    /// Degrees of rotation per pixel rolled
    pub rock_roll_factor: f32,

    // === Gate ===
    /// Idle glow step, in 1/100ths
    pub gate_glow_step: i32,
    /// Per-tick step of the exit fade, in 1/1000ths
    pub exit_glow_step: i32,
    /// Width of the trigger band in front of the gate
    pub exit_band: i32,

    // === Sprite metrics ===
    pub player_size: IVec2,
    pub rock_size: IVec2,
    pub gate_size: IVec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 7,
            jump_speed: 15,
            gravity: 1,
            terminal_velocity: 16,
            player_hit_box: Rect::new(20, 0, 24, 56),

            rock_friction: 0.25,
            rock_push_accel: 0.5,
            rock_roll_factor: -4.0,

            gate_glow_step: 2,
            exit_glow_step: 25,
            exit_band: 24,

            player_size: IVec2::new(64, 64),
            rock_size: IVec2::new(48, 48),
            gate_size: IVec2::new(64, 128),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Player collision box at a given player position
    pub fn player_rect_at(&self, pos: IVec2) -> Rect {
        self.player_hit_box.translated(pos)
    }
}
