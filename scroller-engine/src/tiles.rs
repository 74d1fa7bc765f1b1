// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Tile grid
//!
//! World coordinates map to cells by floor division against the tile size.
//! Cells outside `[0, width) x [0, height)` are "no tile": they never block
//! and never wrap onto a neighbouring row.

use crate::ecs::components::Rect;
use crate::error::LoadError;
use crate::level::LevelData;

/// Collision class of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    /// Empty cell
    #[default]
    None,
    /// Solid cell
    Blocking,
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    /// Index of the graphic in the tileset
    pub graphic: u32,
    /// Collision class
    pub kind: TileKind,
}

impl Tile {
    /// Decode a level tile id (0 empty, `n` blocking graphic `n - 1`)
    pub fn from_id(id: u32) -> Self {
        match id {
            0 => Tile::default(),
            n => Tile {
                graphic: n - 1,
                kind: TileKind::Blocking,
            },
        }
    }

    /// Whether the tile stops movement
    pub fn is_blocking(&self) -> bool {
        self.kind == TileKind::Blocking
    }
}

/// Validated tile grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileMap {
    width: i32,
    height: i32,
    tile_size: i32,
    tileset_columns: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Build a grid from row-major level ids
    pub fn new(width: u32, height: u32, tile_size: u32, ids: &[u32]) -> Result<Self, LoadError> {
        if tile_size == 0 {
            return Err(LoadError::ZeroTileSize);
        }
        let expected = width as usize * height as usize;
        if ids.len() != expected {
            return Err(LoadError::TileCountMismatch {
                expected,
                found: ids.len(),
            });
        }
        Ok(TileMap {
            width: width as i32,
            height: height as i32,
            tile_size: tile_size as i32,
            tileset_columns: 1,
            tiles: ids.iter().copied().map(Tile::from_id).collect(),
        })
    }

    /// Grid with no blocking cells
    pub fn open(width: u32, height: u32, tile_size: u32) -> Result<Self, LoadError> {
        Self::new(width, height, tile_size, &vec![0; width as usize * height as usize])
    }

    /// Validate and build the grid of a parsed level
    pub fn from_level(level: &LevelData) -> Result<Self, LoadError> {
        let mut map = Self::new(level.width, level.height, level.tile_size, &level.tiles)?;
        map.tileset_columns = level.tileset_columns.max(1);
        Ok(map)
    }

    /// Grid width in tiles
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile edge in world units
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Overwrite the cell at `(col, row)` with a level id
    ///
    /// Out-of-grid cells are ignored.
    pub fn set_tile(&mut self, col: i32, row: i32, id: u32) {
        if let Some(index) = self.cell_index(col, row) {
            self.tiles[index] = Tile::from_id(id);
        }
    }

    fn cell_index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return None;
        }
        Some((row * self.width + col) as usize)
    }

    fn cell_of(&self, x: i32, y: i32) -> (i32, i32) {
        if self.tile_size <= 0 {
            return (-1, -1);
        }
        (x.div_euclid(self.tile_size), y.div_euclid(self.tile_size))
    }

    /// Tile under the world point `(x, y)`
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        let (col, row) = self.cell_of(x, y);
        self.cell_index(col, row).map(|index| &self.tiles[index])
    }

    /// Whether a blocking tile covers the world point `(x, y)`
    pub fn point_blocks(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_some_and(Tile::is_blocking)
    }

    /// Whether any blocking tile overlaps `rect` (inclusive edges)
    pub fn rect_blocks(&self, rect: Rect) -> bool {
        if rect.w <= 0 || rect.h <= 0 {
            return false;
        }
        let (first_col, first_row) = self.cell_of(rect.x, rect.y);
        let (last_col, last_row) = self.cell_of(rect.right(), rect.bottom());
        // only cells inside the grid can block
        let (first_col, first_row) = (first_col.max(0), first_row.max(0));
        let (last_col, last_row) = (last_col.min(self.width - 1), last_row.min(self.height - 1));
        (first_row..=last_row).any(|row| {
            (first_col..=last_col).any(|col| {
                self.cell_index(col, row)
                    .is_some_and(|index| self.tiles[index].is_blocking())
            })
        })
    }

    /// Every non-empty cell with its world-space top-left corner
    pub fn non_empty(&self) -> impl Iterator<Item = (i32, i32, &Tile)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(index, tile)| {
            if tile.kind == TileKind::None {
                return None;
            }
            let col = index as i32 % self.width;
            let row = index as i32 / self.width;
            Some((col * self.tile_size, row * self.tile_size, tile))
        })
    }

    /// Region of the tileset image holding `tile`'s graphic
    pub fn source_rect(&self, tile: &Tile) -> Rect {
        let columns = self.tileset_columns.max(1);
        Rect::new(
            (tile.graphic % columns) as i32 * self.tile_size,
            (tile.graphic / columns) as i32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileMap {
        // . . .
        // . # .
        // # # #
        TileMap::new(3, 3, 16, &[0, 0, 0, 0, 5, 0, 1, 1, 1]).unwrap()
    }

    #[test]
    fn test_tile_ids_decode() {
        assert_eq!(Tile::from_id(0).kind, TileKind::None);
        let tile = Tile::from_id(5);
        assert!(tile.is_blocking());
        assert_eq!(tile.graphic, 4);
    }

    #[test]
    fn test_point_lookup() {
        let map = grid();
        assert!(map.point_blocks(16, 16));
        assert!(map.point_blocks(31, 31));
        assert!(!map.point_blocks(32, 16));
        assert!(map.point_blocks(0, 32));
    }

    #[test]
    fn test_out_of_grid_is_no_tile() {
        let map = grid();
        assert!(map.tile_at(-1, 40).is_none());
        assert!(!map.point_blocks(-1, 40));
        assert!(!map.point_blocks(48, 32));
        assert!(!map.point_blocks(0, 48));
        // column 3 of row 1 must not wrap onto row 2, column 0
        assert!(!map.point_blocks(48, 16));
    }

    #[test]
    fn test_rect_blocks() {
        let map = grid();
        assert!(!map.rect_blocks(Rect::new(0, 0, 16, 16)));
        assert!(map.rect_blocks(Rect::new(0, 0, 17, 17)));
        assert!(!map.rect_blocks(Rect::new(32, 0, 16, 32)));
        assert!(map.rect_blocks(Rect::new(32, 0, 16, 33)));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            TileMap::new(2, 2, 0, &[0; 4]),
            Err(LoadError::ZeroTileSize)
        ));
        assert!(matches!(
            TileMap::new(2, 2, 16, &[0; 3]),
            Err(LoadError::TileCountMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn test_non_empty_and_source() {
        let mut map = grid();
        map.tileset_columns = 4;
        let cells: Vec<(i32, i32)> = map.non_empty().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(16, 16), (0, 32), (16, 32), (32, 32)]);

        let center = map.tile_at(16, 16).copied().unwrap();
        assert_eq!(map.source_rect(&center), Rect::new(0, 16, 16, 16));
    }

    #[test]
    fn test_set_tile() {
        let mut map = TileMap::open(4, 4, 8).unwrap();
        assert!(!map.point_blocks(8, 8));
        map.set_tile(1, 1, 1);
        assert!(map.point_blocks(8, 8));
        map.set_tile(9, 9, 1);
    }
}
