//! World-to-screen camera
//!
//! The camera is just an offset added to world positions. Large worlds are
//! edge-locked so nothing outside the level is shown; worlds smaller than
//! the viewport are centered (letterboxed).

use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: IVec2,
    pub screen: IVec2,
    pub world: IVec2,
}

impl Camera {
    pub fn new(screen: IVec2, world: IVec2) -> Self {
        Self {
            offset: IVec2::ZERO,
            screen,
            world,
        }
    }

    pub fn set_screen_size(&mut self, width: i32, height: i32) {
        self.screen = IVec2::new(width, height);
    }

    /// Center the viewport on `point`, clamped to the world bounds
    pub fn center_around(&mut self, point: IVec2) {
        self.offset = IVec2::new(
            clamp_axis(
                (self.screen.x / 2).saturating_sub(point.x),
                self.screen.x,
                self.world.x,
            ),
            clamp_axis(
                (self.screen.y / 2).saturating_sub(point.y),
                self.screen.y,
                self.world.y,
            ),
        );
    }

    /// Transform a world position into screen space
    #[inline]
    pub fn to_screen(&self, world_pos: IVec2) -> IVec2 {
        world_pos.saturating_add(self.offset)
    }
}

fn clamp_axis(offset: i32, screen: i32, world: i32) -> i32 {
    if world < screen {
        (screen - world) / 2
    } else {
        offset.clamp(-(world - screen), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_to_top_left() {
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(2000, 1000));
        camera.center_around(IVec2::new(50, 50));
        assert_eq!(camera.offset, IVec2::new(0, 0));
    }

    #[test]
    fn test_clamps_to_far_corner() {
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(2000, 1000));
        camera.center_around(IVec2::new(1990, 990));
        assert_eq!(camera.offset, IVec2::new(-1200, -400));
    }

    #[test]
    fn test_centers_inside_world() {
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(2000, 1000));
        camera.center_around(IVec2::new(1000, 500));
        assert_eq!(camera.offset, IVec2::new(-600, -200));
        assert_eq!(camera.to_screen(IVec2::new(1000, 500)), IVec2::new(400, 300));
    }

    #[test]
    fn test_small_world_is_letterboxed() {
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(400, 300));
        for point in [IVec2::new(0, 0), IVec2::new(399, 299), IVec2::new(-500, 9000)] {
            camera.center_around(point);
            assert_eq!(camera.offset, IVec2::new(200, 150));
        }
    }

    #[test]
    fn test_axes_clamp_independently() {
        // Wide but short world: X follows the point, Y is centered
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(2000, 200));
        camera.center_around(IVec2::new(1000, 100));
        assert_eq!(camera.offset, IVec2::new(-600, 200));
    }

    #[test]
    fn test_screen_size_change_applies_on_next_center() {
        let mut camera = Camera::new(IVec2::new(800, 600), IVec2::new(2000, 1000));
        camera.center_around(IVec2::new(1000, 500));
        camera.set_screen_size(400, 300);
        assert_eq!(camera.offset, IVec2::new(-600, -200));
        camera.center_around(IVec2::new(1000, 500));
        assert_eq!(camera.offset, IVec2::new(-800, -350));
    }
}
