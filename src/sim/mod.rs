//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, integer pixel positions
//! - Stable iteration order (rocks in spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod gate;
pub mod grid;
pub mod player;
pub mod rect;
pub mod rock;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{BodySweep, depenetrate_x, depenetrate_y, sweep_bodies_x, sweep_bodies_y};
pub use gate::{Gate, GatePhase, PingPong};
pub use grid::{Tile, TileGrid};
pub use player::{Animation, Player};
pub use rect::Rect;
pub use rock::Rock;
pub use state::{GameState, InputEvent, InputState, Key, SoundEffect};
pub use tick::{FrameOutput, tick};
