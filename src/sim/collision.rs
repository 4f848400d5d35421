//! Body-vs-body collision
//!
//! Two tools, both applied after the tile sweep so they can only shorten a
//! move the grid already allowed:
//! - `sweep_bodies_x/y`: the tile sweep's closest-obstruction rule, run over
//!   a list of live bodies. Used for the player against rocks.
//! - `depenetrate_x/y`: back a committed move off one pixel at a time until
//!   the body no longer overlaps anything. Used for rocks.
//!
//! Bodies that already overlap the mover before it moves are ignored; the
//! overlap is tolerated until one of them moves apart.

use super::rect::Rect;
use crate::step_toward_zero;

/// Outcome of a body sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySweep {
    /// The moved rectangle
    pub rect: Rect,
    /// Index of the body that set the final boundary, if the move was shortened
    pub blocker: Option<usize>,
}

impl BodySweep {
    fn unblocked(rect: Rect) -> Self {
        Self {
            rect,
            blocker: None,
        }
    }
}

/// Move `start` horizontally by up to `dx`, stopping at the closest body.
pub fn sweep_bodies_x(start: Rect, dx: i32, bodies: &[Rect]) -> BodySweep {
    if dx == 0 {
        return BodySweep::unblocked(start);
    }
    let swept = start.swept_x(dx);
    let mut best = dx;
    let mut blocker = None;
    for (i, body) in bodies.iter().enumerate() {
        if body.overlaps(&start) || !body.overlaps(&swept) {
            continue;
        }
        // Allowed displacement before touching this body
        let allowed = if dx < 0 {
            body.x.saturating_add(body.w).saturating_sub(start.x)
        } else {
            body.x.saturating_sub(start.x.saturating_add(start.w))
        };
        let allowed = clamp_toward(allowed, dx);
        if allowed.abs() < best.abs() {
            best = allowed;
            blocker = Some(i);
        }
    }
    BodySweep {
        rect: start.translated(glam::IVec2::new(best, 0)),
        blocker,
    }
}

/// Move `start` vertically by up to `dy`, stopping at the closest body.
pub fn sweep_bodies_y(start: Rect, dy: i32, bodies: &[Rect]) -> BodySweep {
    if dy == 0 {
        return BodySweep::unblocked(start);
    }
    let swept = start.swept_y(dy);
    let mut best = dy;
    let mut blocker = None;
    for (i, body) in bodies.iter().enumerate() {
        if body.overlaps(&start) || !body.overlaps(&swept) {
            continue;
        }
        let allowed = if dy < 0 {
            body.y.saturating_add(body.h).saturating_sub(start.y)
        } else {
            body.y.saturating_sub(start.y.saturating_add(start.h))
        };
        let allowed = clamp_toward(allowed, dy);
        if allowed.abs() < best.abs() {
            best = allowed;
            blocker = Some(i);
        }
    }
    BodySweep {
        rect: start.translated(glam::IVec2::new(0, best)),
        blocker,
    }
}

/// Clamp `allowed` into the range between 0 and `requested`
#[inline]
fn clamp_toward(allowed: i32, requested: i32) -> i32 {
    if requested < 0 {
        allowed.clamp(requested, 0)
    } else {
        allowed.clamp(0, requested)
    }
}

/// Shrink a horizontal move from `origin` by `dx` until it overlaps no obstacle.
///
/// Returns the displacement that remains.
pub fn depenetrate_x<'a, I>(origin: Rect, dx: i32, obstacles: I) -> i32
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    depenetrate(origin, dx, obstacles, |r, d| r.translated(glam::IVec2::new(d, 0)))
}

/// Shrink a vertical move from `origin` by `dy` until it overlaps no obstacle.
///
/// Returns the displacement that remains.
pub fn depenetrate_y<'a, I>(origin: Rect, dy: i32, obstacles: I) -> i32
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    depenetrate(origin, dy, obstacles, |r, d| r.translated(glam::IVec2::new(0, d)))
}

fn depenetrate<'a, I, F>(origin: Rect, mut d: i32, obstacles: I, shift: F) -> i32
where
    I: IntoIterator<Item = &'a Rect> + Clone,
    F: Fn(&Rect, i32) -> Rect,
{
    // At most |d| iterations
    while d != 0 {
        let moved = shift(&origin, d);
        if !obstacles.clone().into_iter().any(|o| o.overlaps(&moved)) {
            break;
        }
        d += step_toward_zero(d);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_stops_at_closest_body() {
        let start = Rect::new(0, 0, 10, 10);
        let bodies = [Rect::new(40, 0, 10, 10), Rect::new(25, 5, 10, 10)];
        let sweep = sweep_bodies_x(start, 30, &bodies);
        assert_eq!(sweep.rect.x, 15);
        assert_eq!(sweep.blocker, Some(1));
        assert!(!sweep.rect.overlaps(&bodies[1]));
    }

    #[test]
    fn test_sweep_left_and_down() {
        let start = Rect::new(50, 50, 10, 10);
        let bodies = [Rect::new(20, 50, 10, 10), Rect::new(50, 20, 10, 10)];

        let sweep = sweep_bodies_x(start, -30, &bodies);
        assert_eq!(sweep.rect.x, 30);
        assert_eq!(sweep.blocker, Some(0));

        let sweep = sweep_bodies_y(start, -30, &bodies);
        assert_eq!(sweep.rect.y, 30);
        assert_eq!(sweep.blocker, Some(1));
    }

    #[test]
    fn test_sweep_ignores_bodies_off_the_path() {
        let start = Rect::new(0, 0, 10, 10);
        // Touching from above, and far behind
        let bodies = [Rect::new(5, 10, 10, 10), Rect::new(-50, 0, 10, 10)];
        let sweep = sweep_bodies_x(start, 7, &bodies);
        assert_eq!(sweep.rect.x, 7);
        assert_eq!(sweep.blocker, None);
    }

    #[test]
    fn test_sweep_touching_body_blocks_completely() {
        let start = Rect::new(0, 0, 10, 10);
        let bodies = [Rect::new(10, 0, 10, 10)];
        let sweep = sweep_bodies_x(start, 7, &bodies);
        assert_eq!(sweep.rect.x, 0);
        assert_eq!(sweep.blocker, Some(0));
    }

    #[test]
    fn test_sweep_tolerates_existing_overlap() {
        let start = Rect::new(0, 0, 10, 10);
        let bodies = [Rect::new(5, 0, 10, 10)];
        let sweep = sweep_bodies_x(start, 7, &bodies);
        assert_eq!(sweep.rect.x, 7);
        assert_eq!(sweep.blocker, None);
    }

    #[test]
    fn test_sweep_zero_is_noop() {
        let start = Rect::new(0, 0, 10, 10);
        let sweep = sweep_bodies_y(start, 0, &[Rect::new(0, 10, 10, 10)]);
        assert_eq!(sweep, BodySweep::unblocked(start));
    }

    #[test]
    fn test_depenetrate_shrinks_to_contact() {
        let origin = Rect::new(0, 0, 10, 10);
        let obstacles = [Rect::new(12, 0, 10, 10)];
        assert_eq!(depenetrate_x(origin, 3, &obstacles), 2);
        assert_eq!(depenetrate_x(origin, -3, &obstacles), -3);

        let obstacles = [Rect::new(0, -14, 10, 10)];
        assert_eq!(depenetrate_y(origin, -6, &obstacles), -4);
    }

    #[test]
    fn test_depenetrate_gives_up_at_zero() {
        // Already overlapping: no forced separation
        let origin = Rect::new(0, 0, 10, 10);
        let obstacles = [Rect::new(5, 0, 10, 10)];
        assert_eq!(depenetrate_x(origin, 2, &obstacles), 0);
        assert_eq!(depenetrate_x(origin, 0, &obstacles), 0);
    }

    #[test]
    fn test_depenetrate_without_obstacles_keeps_move() {
        let origin = Rect::new(0, 0, 10, 10);
        let none: [Rect; 0] = [];
        assert_eq!(depenetrate_y(origin, 9, &none), 9);
    }
}
