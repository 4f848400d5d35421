//! Draw directives
//!
//! The simulation does not render. Each tick it emits a list of commands in
//! screen space (camera already applied) for the rendering backend to blit.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// Sprite identifiers known to the asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    PlayerStand,
    PlayerWalk(u8),
    PlayerPush(u8),
    PlayerFall,
    Rock,
    /// Gate body
    GateA,
    /// Gate glow, drawn over the body
    GateB,
    /// Exit overlay shown during the completion sequence
    ExitGlow,
}

/// Per-draw options. Player and gate sprites face left unless flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    pub flip_x: bool,
    /// 0 = opaque, 1 = invisible
    pub transparency: f32,
    /// Rotation about the sprite center, degrees
    pub center_rotation_deg: i32,
}

impl DrawOptions {
    pub fn flip_x(mut self, value: bool) -> Self {
        self.flip_x = value;
        self
    }

    /// Set opacity (1 = opaque); stored as transparency
    pub fn opacity(mut self, value: f32) -> Self {
        self.transparency = 1.0 - value.clamp(0.0, 1.0);
        self
    }

    pub fn center_rotation(mut self, degrees: i32) -> Self {
        self.center_rotation_deg = degrees;
        self
    }
}

/// A single draw directive, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Sprite {
        sprite: SpriteId,
        pos: IVec2,
        options: DrawOptions,
    },
    /// Blit `source` from the tile sheet
    Tile { pos: IVec2, source: Rect },
}

impl DrawCommand {
    pub fn pos(&self) -> IVec2 {
        match *self {
            DrawCommand::Sprite { pos, .. } | DrawCommand::Tile { pos, .. } => pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_is_stored_as_transparency() {
        let opts = DrawOptions::default().opacity(0.25);
        assert_eq!(opts.transparency, 0.75);
        assert_eq!(DrawOptions::default().opacity(2.0).transparency, 0.0);
    }

    #[test]
    fn test_builder_chain() {
        let opts = DrawOptions::default().flip_x(true).center_rotation(-45);
        assert!(opts.flip_x);
        assert_eq!(opts.center_rotation_deg, -45);
        assert_eq!(opts.transparency, 0.0);
    }
}
