//! Axis-aligned integer rectangles in world pixels
//!
//! Arithmetic saturates, so a body that has left the world keeps a valid
//! (if clamped) rectangle.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle covering pixels `x..x+w` and `y..y+h`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size with its origin at `pos`
    pub fn at(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Last pixel column covered (inclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w).saturating_sub(1)
    }

    /// Last pixel row covered (inclusive)
    #[inline]
    pub fn top(&self) -> i32 {
        self.y.saturating_add(self.h).saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x.saturating_add(other.w)
            && other.x < self.x.saturating_add(self.w)
            && self.y < other.y.saturating_add(other.h)
            && other.y < self.y.saturating_add(self.h)
    }

    pub fn translated(&self, by: IVec2) -> Self {
        Self::new(
            self.x.saturating_add(by.x),
            self.y.saturating_add(by.y),
            self.w,
            self.h,
        )
    }

    /// Grow the rectangle to cover everything it passes through moving `dx`
    pub fn swept_x(&self, dx: i32) -> Self {
        if dx < 0 {
            Self::new(self.x.saturating_add(dx), self.y, self.w.saturating_sub(dx), self.h)
        } else {
            Self::new(self.x, self.y, self.w.saturating_add(dx), self.h)
        }
    }

    /// Grow the rectangle to cover everything it passes through moving `dy`
    pub fn swept_y(&self, dy: i32) -> Self {
        if dy < 0 {
            Self::new(self.x, self.y.saturating_add(dy), self.w, self.h.saturating_sub(dy))
        } else {
            Self::new(self.x, self.y, self.w, self.h.saturating_add(dy))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
        assert!(!a.overlaps(&Rect::new(-10, -10, 10, 10)));
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
        assert!(a.overlaps(&Rect::new(2, 2, 2, 2)));
    }

    #[test]
    fn test_swept_area_covers_travel() {
        let r = Rect::new(10, 20, 16, 8);
        assert_eq!(r.swept_x(-5), Rect::new(5, 20, 21, 8));
        assert_eq!(r.swept_x(5), Rect::new(10, 20, 21, 8));
        assert_eq!(r.swept_y(-3), Rect::new(10, 17, 16, 11));
        assert_eq!(r.swept_y(3), Rect::new(10, 20, 16, 11));
    }

    #[test]
    fn test_far_out_rects_saturate() {
        let r = Rect::new(i32::MIN + 4, i32::MAX - 4, 16, 16);
        assert_eq!(r.translated(IVec2::new(-10, 10)).pos(), IVec2::new(i32::MIN, i32::MAX));
        assert_eq!(r.top(), i32::MAX - 1);
        assert_eq!(r.swept_x(-10).x, i32::MIN);
        assert!(r.overlaps(&r));
    }

    #[test]
    fn test_inclusive_edges() {
        let r = Rect::new(10, 20, 16, 8);
        assert_eq!(r.right(), 25);
        assert_eq!(r.top(), 27);
    }
}
