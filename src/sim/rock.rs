//! Pushable rocks
//!
//! A rock has a floating horizontal speed that friction drains every tick and
//! pushing refills, and an integer vertical speed driven by gravity. Both axes
//! are swept through the grid and then backed off any body they would enter.

use serde::{Deserialize, Serialize};

use super::collision::{depenetrate_x, depenetrate_y};
use super::grid::TileGrid;
use super::rect::Rect;
use crate::consts::ROCK_MAX_SPEED;
use crate::round_half_away_from_zero;
use crate::tuning::Tuning;

/// A movable rock body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub hit_box: Rect,
    /// Horizontal speed, always within `[-ROCK_MAX_SPEED, ROCK_MAX_SPEED]`
    pub speed_x: f32,
    pub speed_y: i32,
    /// Rolling rotation in degrees (render only)
    pub rotation: f32,
}

impl Rock {
    pub fn new(hit_box: Rect) -> Self {
        Self {
            hit_box,
            speed_x: 0.0,
            speed_y: 0,
            rotation: 0.0,
        }
    }

    /// Nudge horizontal speed in the direction of `direction`'s sign
    pub fn push(&mut self, direction: i32, tuning: &Tuning) {
        let accel = tuning.rock_push_accel * direction.signum() as f32;
        self.speed_x = (self.speed_x + accel).clamp(-ROCK_MAX_SPEED, ROCK_MAX_SPEED);
    }

    fn apply_friction(&mut self, friction: f32) {
        if self.speed_x > 0.0 {
            self.speed_x = (self.speed_x - friction).max(0.0);
        } else if self.speed_x < 0.0 {
            self.speed_x = (self.speed_x + friction).min(0.0);
        }
    }

    /// Advance one tick.
    ///
    /// `obstacles` are the other bodies this rock must not move into (the
    /// player and every other rock).
    pub fn update<'a, I>(&mut self, grid: &TileGrid, obstacles: I, tuning: &Tuning)
    where
        I: IntoIterator<Item = &'a Rect> + Clone,
    {
        self.apply_friction(tuning.rock_friction);

        // Horizontal
        let start = self.hit_box;
        let dx = round_half_away_from_zero(self.speed_x);
        let (moved, hit_wall) = grid.move_in_x(start, dx);
        if hit_wall {
            self.speed_x = 0.0;
        }
        let dx = depenetrate_x(start, moved.x - start.x, obstacles.clone());
        self.hit_box.x = start.x.saturating_add(dx);
        self.rotation += dx as f32 * tuning.rock_roll_factor;

        // Vertical
        let start = self.hit_box;
        self.speed_y = (self.speed_y - tuning.gravity).max(-tuning.terminal_velocity);
        let (moved, hit_wall) = grid.move_in_y(start, self.speed_y);
        let dy = depenetrate_y(start, moved.y - start.y, obstacles);
        self.hit_box.y = start.y.saturating_add(dy);
        if hit_wall || dy == 0 {
            self.speed_y = 0;
        }
    }
}
