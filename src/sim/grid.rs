//! Static tile grid and the axis-separated tile sweep
//!
//! Movement is always resolved one axis at a time. The moving rectangle is
//! stretched over the whole distance it travels, every solid tile under that
//! swept area is considered, and the closest obstruction wins. Resolving X and
//! Y separately is what lets bodies slide along walls without tunneling
//! through corners.
//!
//! World Y grows upward: tile row 0 is the bottom of the level.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A single grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Sub-rectangle of the tile sheet to draw (empty = nothing to draw)
    pub source: Rect,
    /// Whether bodies collide with this cell
    pub solid: bool,
}

/// Returned for any lookup outside the grid: edges are permeable
const EMPTY_TILE: Tile = Tile {
    source: Rect::new(0, 0, 0, 0),
    solid: false,
};

/// Row-major grid of tiles, immutable once a level is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    pub tile_w: i32,
    pub tile_h: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create an empty (all non-solid) grid.
    ///
    /// A cell count that does not fit in an `i32` stores no tiles; every
    /// lookup then returns the empty sentinel.
    pub fn new(width: i32, height: i32, tile_w: i32, tile_h: i32) -> Self {
        let count = width.max(0).checked_mul(height.max(0)).unwrap_or(0) as usize;
        Self {
            width,
            height,
            tile_w,
            tile_h,
            tiles: vec![Tile::default(); count],
        }
    }

    /// Number of stored tiles (`width * height` for a well-formed grid)
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// World size in pixels
    pub fn world_size(&self) -> IVec2 {
        IVec2::new(
            self.width.saturating_mul(self.tile_w),
            self.height.saturating_mul(self.tile_h),
        )
    }

    fn index(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if tile_x < 0 || tile_y < 0 || tile_x >= self.width || tile_y >= self.height {
            return None;
        }
        Some((tile_x + tile_y * self.width) as usize)
    }

    /// Tile at grid coordinates, or the empty sentinel outside the grid
    pub fn tile_at(&self, tile_x: i32, tile_y: i32) -> &Tile {
        self.index(tile_x, tile_y)
            .and_then(|i| self.tiles.get(i))
            .unwrap_or(&EMPTY_TILE)
    }

    /// Replace a tile; writes outside the grid are ignored
    pub fn set_tile(&mut self, tile_x: i32, tile_y: i32, tile: Tile) {
        if let Some(slot) = self.index(tile_x, tile_y).and_then(|i| self.tiles.get_mut(i)) {
            *slot = tile;
        }
    }

    #[inline]
    pub fn to_tile_x(&self, world_x: i32) -> i32 {
        world_x.div_euclid(self.tile_w)
    }

    #[inline]
    pub fn to_tile_y(&self, world_y: i32) -> i32 {
        world_y.div_euclid(self.tile_h)
    }

    #[inline]
    pub fn to_world(&self, tile_x: i32, tile_y: i32) -> IVec2 {
        IVec2::new(tile_x * self.tile_w, tile_y * self.tile_h)
    }

    /// Iterate tiles with something to draw, with their world position
    pub fn visible_tiles(&self) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(i, tile)| {
            if tile.source.is_empty() {
                return None;
            }
            let i = i as i32;
            Some((self.to_world(i % self.width, i / self.width), tile))
        })
    }

    /// Grid coordinates of every solid tile touched by `area`.
    ///
    /// Only cells inside the grid are visited; everything outside is empty.
    fn solid_tiles_in(&self, area: Rect) -> impl Iterator<Item = (i32, i32)> + '_ {
        let x0 = self.to_tile_x(area.x).max(0);
        let x1 = self.to_tile_x(area.right()).min(self.width - 1);
        let y0 = self.to_tile_y(area.y).max(0);
        let y1 = self.to_tile_y(area.top()).min(self.height - 1);
        (y0..=y1)
            .flat_map(move |ty| (x0..=x1).map(move |tx| (tx, ty)))
            .filter(|&(tx, ty)| self.tile_at(tx, ty).solid)
    }

    /// Whether any solid tile overlaps `rect`
    pub fn overlaps_solid(&self, rect: Rect) -> bool {
        !rect.is_empty() && self.solid_tiles_in(rect).next().is_some()
    }

    /// Move `start` horizontally by up to `dx`, stopping at the closest solid tile.
    ///
    /// Returns the moved rectangle and whether the move was cut short.
    pub fn move_in_x(&self, start: Rect, dx: i32) -> (Rect, bool) {
        if dx == 0 {
            return (start, false);
        }
        let swept = start.swept_x(dx);
        let mut end = start;
        if dx < 0 {
            let new_x = self
                .solid_tiles_in(swept)
                .map(|(tx, _)| self.to_world(tx + 1, 0).x)
                .fold(swept.x, i32::max);
            end.x = new_x;
        } else {
            let new_right = self
                .solid_tiles_in(swept)
                .map(|(tx, _)| self.to_world(tx, 0).x - 1)
                .fold(swept.right(), i32::min);
            end.x = new_right.saturating_sub(start.w).saturating_add(1);
        }
        (end, end.x != start.x.saturating_add(dx))
    }

    /// Move `start` vertically by up to `dy`, stopping at the closest solid tile.
    ///
    /// Returns the moved rectangle and whether the move was cut short.
    pub fn move_in_y(&self, start: Rect, dy: i32) -> (Rect, bool) {
        if dy == 0 {
            return (start, false);
        }
        let swept = start.swept_y(dy);
        let mut end = start;
        if dy < 0 {
            let new_y = self
                .solid_tiles_in(swept)
                .map(|(_, ty)| self.to_world(0, ty + 1).y)
                .fold(swept.y, i32::max);
            end.y = new_y;
        } else {
            let new_top = self
                .solid_tiles_in(swept)
                .map(|(_, ty)| self.to_world(0, ty).y - 1)
                .fold(swept.top(), i32::min);
            end.y = new_top.saturating_sub(start.h).saturating_add(1);
        }
        (end, end.y != start.y.saturating_add(dy))
    }
}
