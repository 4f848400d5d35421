//! Decoded levels
//!
//! A `Level` is the static description the simulation starts from: the tile
//! grid plus where the player, the gate and every rock spawn. Levels are
//! usually built from the numeric id layers of a Tiled map (`LevelLayers`);
//! reading the map file itself is the asset loader's job.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Rect, Tile, TileGrid};

/// Object ids, relative to the first id after the tile sheet
const OBJ_PLAYER_LEFT: u32 = 0;
const OBJ_PLAYER_RIGHT: u32 = 1;
const OBJ_GATE_LEFT: u32 = 2;
const OBJ_GATE_RIGHT: u32 = 3;
const OBJ_ROCK: u32 = 4;

/// Errors found while decoding or validating a level
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid tile size {tile_w}x{tile_h}")]
    InvalidTileSize { tile_w: i32, tile_h: i32 },

    #[error("invalid tile sheet of {columns}x{rows} tiles")]
    InvalidSheet { columns: u32, rows: u32 },

    #[error("{layer} layer has {actual} cells, expected {expected}")]
    LayerSize {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("tile id {id} at {x},{y} is outside the tile sheet")]
    UnknownTile { id: u32, x: i32, y: i32 },

    #[error("object id {id} at {x},{y} is not a known object")]
    UnknownObject { id: u32, x: i32, y: i32 },

    #[error("level has no player spawn")]
    MissingPlayer,

    #[error("level has no gate")]
    MissingGate,
}

/// Position and facing of a spawned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub pos: IVec2,
    pub faces_right: bool,
}

/// A fully decoded level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub grid: TileGrid,
    pub player: Spawn,
    pub gate: Spawn,
    /// Rock spawn positions, in map reading order (top row first)
    pub rocks: Vec<IVec2>,
}

/// Raw id layers of a Tiled map, rows listed top first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayers {
    pub width: i32,
    pub height: i32,
    pub tile_w: i32,
    pub tile_h: i32,
    /// Tile sheet size in tiles
    pub sheet_columns: u32,
    pub sheet_rows: u32,
    /// Tile layer: 0 = empty, otherwise 1 + sheet index
    pub tiles: Vec<u32>,
    /// Object layer: 0 = nothing, otherwise 1 + sheet size + object kind
    pub objects: Vec<u32>,
}

impl Level {
    /// Decode a level from its tile and object layers
    pub fn from_layers(layers: &LevelLayers) -> Result<Self, LevelError> {
        let LevelLayers {
            width,
            height,
            tile_w,
            tile_h,
            sheet_columns,
            sheet_rows,
            ..
        } = *layers;
        let expected = check_dimensions(width, height, tile_w, tile_h)?;
        if sheet_columns == 0 || sheet_rows == 0 {
            return Err(LevelError::InvalidSheet {
                columns: sheet_columns,
                rows: sheet_rows,
            });
        }
        for (layer, cells) in [("tile", &layers.tiles), ("object", &layers.objects)] {
            if cells.len() != expected {
                return Err(LevelError::LayerSize {
                    layer,
                    expected,
                    actual: cells.len(),
                });
            }
        }

        let sheet_size = sheet_columns * sheet_rows;
        let mut grid = TileGrid::new(width, height, tile_w, tile_h);
        let mut player = None;
        let mut gate = None;
        let mut rocks = Vec::new();

        for (i, (&tile_id, &object_id)) in layers.tiles.iter().zip(&layers.objects).enumerate() {
            let i = i as i32;
            // Map rows run top to bottom; world rows bottom to top
            let (x, y) = (i % width, height - 1 - i / width);

            if tile_id != 0 {
                let index = tile_id - 1;
                if index >= sheet_size {
                    return Err(LevelError::UnknownTile { id: tile_id, x, y });
                }
                let (sx, sy) = ((index % sheet_columns) as i32, (index / sheet_columns) as i32);
                grid.set_tile(
                    x,
                    y,
                    Tile {
                        source: Rect::new(sx * tile_w, sy * tile_h, tile_w, tile_h),
                        // Sheet cell 0 is background decoration
                        solid: index >= 1,
                    },
                );
            }

            if object_id != 0 {
                let pos = grid.to_world(x, y);
                match object_id.checked_sub(1 + sheet_size) {
                    Some(OBJ_PLAYER_LEFT) => player = Some(Spawn { pos, faces_right: false }),
                    Some(OBJ_PLAYER_RIGHT) => player = Some(Spawn { pos, faces_right: true }),
                    Some(OBJ_GATE_LEFT) => gate = Some(Spawn { pos, faces_right: false }),
                    Some(OBJ_GATE_RIGHT) => gate = Some(Spawn { pos, faces_right: true }),
                    Some(OBJ_ROCK) => rocks.push(pos),
                    _ => return Err(LevelError::UnknownObject { id: object_id, x, y }),
                }
            }
        }

        let level = Self {
            grid,
            player: player.ok_or(LevelError::MissingPlayer)?,
            gate: gate.ok_or(LevelError::MissingGate)?,
            rocks,
        };
        log::info!(
            "Decoded level {}x{} ({}x{} px tiles), {} rocks",
            width,
            height,
            tile_w,
            tile_h,
            level.rocks.len()
        );
        Ok(level)
    }

    /// Parse a level from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, LevelLoadError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check a level that did not come through `from_layers`
    pub fn validate(&self) -> Result<(), LevelError> {
        let grid = &self.grid;
        let expected = check_dimensions(grid.width, grid.height, grid.tile_w, grid.tile_h)?;
        if grid.tile_count() != expected {
            return Err(LevelError::LayerSize {
                layer: "tile",
                expected,
                actual: grid.tile_count(),
            });
        }
        Ok(())
    }
}

/// Errors loading a serialized level
#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("malformed level json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Returns the number of cells. The cell count and the world size in pixels
/// must both fit in an `i32`.
fn check_dimensions(
    width: i32,
    height: i32,
    tile_w: i32,
    tile_h: i32,
) -> Result<usize, LevelError> {
    if tile_w <= 0 || tile_h <= 0 {
        return Err(LevelError::InvalidTileSize { tile_w, tile_h });
    }
    let invalid = LevelError::InvalidDimensions { width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }
    let cells = width.checked_mul(height).ok_or_else(|| invalid.clone())?;
    width.checked_mul(tile_w).ok_or_else(|| invalid.clone())?;
    height.checked_mul(tile_h).ok_or(invalid)?;
    Ok(cells as usize)
}

/// Layers of the built-in demo cave: a flat floor, one rock, and a
/// left-facing gate near the right wall.
pub fn demo_layers() -> LevelLayers {
    const W: usize = 16;
    const H: usize = 8;
    // 4x4 sheet: object ids start at 17
    const P: u32 = 18; // player facing right
    const G: u32 = 19; // gate facing left
    const R: u32 = 21; // rock

    let mut tiles = vec![0u32; W * H];
    let mut objects = vec![0u32; W * H];
    for row in 0..H {
        for col in 0..W {
            let i = row * W + col;
            tiles[i] = if row == 0 || row == H - 1 || col == 0 || col == W - 1 {
                2
            } else if row == H - 2 {
                // Background strip just above the floor
                1
            } else if row == 4 && (5..=7).contains(&col) {
                3
            } else {
                0
            };
        }
    }
    // Objects stand on the floor (second row from the bottom)
    let floor_row = (H - 2) * W;
    objects[floor_row + 1] = P;
    objects[floor_row + 4] = R;
    objects[floor_row + 13] = G;

    LevelLayers {
        width: W as i32,
        height: H as i32,
        tile_w: 64,
        tile_h: 64,
        sheet_columns: 4,
        sheet_rows: 4,
        tiles,
        objects,
    }
}

/// The built-in demo cave
pub fn demo_level() -> Level {
    Level::from_layers(&demo_layers()).expect("demo level is well-formed")
}
