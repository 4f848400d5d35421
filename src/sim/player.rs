//! Player locomotion
//!
//! Grounded/airborne state is never stored as intent: it is whatever the last
//! vertical sweep said. Horizontal movement is resolved against the grid and
//! then against rocks; being stopped by a rock while on the ground is what
//! makes the player push it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{sweep_bodies_x, sweep_bodies_y};
use super::grid::TileGrid;
use super::rect::Rect;
use super::rock::Rock;
use super::state::InputState;
use crate::consts::{PUSH_FRAMES, PUSH_FRAME_TICKS, WALK_FRAMES, WALK_FRAME_TICKS};
use crate::draw::SpriteId;
use crate::tuning::Tuning;

/// Animation counters (render only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub walk_frame: u8,
    pub walk_timer: u32,
    pub push_frame: u8,
    pub push_timer: u32,
}

impl Animation {
    fn advance(frame: &mut u8, timer: &mut u32, frames: u8, ticks: u32) {
        *timer += 1;
        if *timer >= ticks {
            *timer = 0;
            *frame = (*frame + 1) % frames;
        }
    }

    fn update(&mut self, walking: bool, pushing: bool) {
        if walking {
            Self::advance(
                &mut self.walk_frame,
                &mut self.walk_timer,
                WALK_FRAMES,
                WALK_FRAME_TICKS,
            );
        } else {
            self.walk_frame = 0;
            self.walk_timer = 0;
        }

        if pushing {
            Self::advance(
                &mut self.push_frame,
                &mut self.push_timer,
                PUSH_FRAMES,
                PUSH_FRAME_TICKS,
            );
        } else {
            self.push_frame = 0;
            self.push_timer = 0;
        }
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sprite origin in world pixels; the hit box is offset from here
    pub pos: IVec2,
    pub speed_y: i32,
    pub grounded: bool,
    pub faces_right: bool,
    /// Moved horizontally on the ground this tick
    pub walking: bool,
    /// Pushed a rock this tick
    pub pushing: bool,
    pub anim: Animation,
}

impl Player {
    pub fn spawn(pos: IVec2, faces_right: bool) -> Self {
        Self {
            pos,
            speed_y: 0,
            grounded: false,
            faces_right,
            walking: false,
            pushing: false,
            anim: Animation::default(),
        }
    }

    pub fn hit_box(&self, tuning: &Tuning) -> Rect {
        tuning.player_rect_at(self.pos)
    }

    /// Horizontal center of the sprite
    pub fn center_x(&self, tuning: &Tuning) -> i32 {
        self.pos.x.saturating_add(tuning.player_size.x / 2)
    }

    /// Advance one tick, pushing any rock that stops a grounded walk
    pub fn update(
        &mut self,
        grid: &TileGrid,
        rocks: &mut [Rock],
        input: &InputState,
        tuning: &Tuning,
    ) {
        let was_grounded = self.grounded;
        let bodies: Vec<Rect> = rocks.iter().map(|r| r.hit_box).collect();

        // Horizontal
        let dir = input.horizontal();
        if dir != 0 {
            self.faces_right = dir > 0;
        }
        let dx = dir * tuning.player_speed;
        let start = self.hit_box(tuning);
        let (after_tiles, _) = grid.move_in_x(start, dx);
        let sweep = sweep_bodies_x(start, after_tiles.x - start.x, &bodies);
        let moved_x = sweep.rect.x - start.x;

        self.pushing = false;
        if was_grounded {
            if let Some(rock) = sweep.blocker.and_then(|i| rocks.get_mut(i)) {
                rock.push(dx, tuning);
                self.pushing = true;
                log::trace!("Pushing rock at {:?}, speed {}", rock.hit_box, rock.speed_x);
            }
        }

        // Vertical
        if was_grounded && input.up {
            self.speed_y = tuning.jump_speed;
        }
        self.speed_y = (self.speed_y - tuning.gravity).max(-tuning.terminal_velocity);
        let dy = self.speed_y;
        let start = sweep.rect;
        let (after_tiles, _) = grid.move_in_y(start, dy);
        let sweep = sweep_bodies_y(start, after_tiles.y - start.y, &bodies);
        let blocked = sweep.rect.y - start.y != dy;

        self.grounded = blocked && dy < 0;
        if blocked {
            self.speed_y = 0;
        }

        self.pos = sweep.rect.pos().saturating_sub(tuning.player_hit_box.pos());
        self.walking = self.grounded && moved_x != 0 && !self.pushing;
        self.anim.update(self.walking, self.pushing);
    }

    /// Sprite matching the current locomotion state
    pub fn sprite(&self) -> SpriteId {
        if !self.grounded {
            SpriteId::PlayerFall
        } else if self.pushing {
            SpriteId::PlayerPush(self.anim.push_frame)
        } else if self.walking {
            SpriteId::PlayerWalk(self.anim.walk_frame)
        } else {
            SpriteId::PlayerStand
        }
    }
}
