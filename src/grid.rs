//! 2-D placement of variable-height tiles.
//!
//! A tile occupies the cells `(x, y) .. (x, y + height - 1)` of its column.
//! Placing a tile over cells already in use shifts the overlapped tiles
//! downward by the minimum amount that opens the space, cascading down the
//! column.

use std::collections::BTreeMap;

/// An integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct V2 {
    pub x: usize,
    pub y: usize,
}

impl V2 {
    pub fn new(x: usize, y: usize) -> Self {
        V2 { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub pos: V2,
    pub height: usize,
}

impl Placement {
    fn overlaps_rows(&self, top: usize, bottom: usize) -> bool {
        self.pos.y < bottom && top < self.pos.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T: Ord + Clone> {
    tiles: BTreeMap<T, Placement>,
    /// Tiles per column, kept in ascending y order.
    columns: BTreeMap<usize, Vec<T>>,
}

impl<T: Ord + Clone> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Grid<T> {
    pub fn new() -> Self {
        Grid {
            tiles: BTreeMap::new(),
            columns: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn placement(&self, tile: &T) -> Option<Placement> {
        self.tiles.get(tile).copied()
    }

    pub fn position(&self, tile: &T) -> Option<V2> {
        self.tiles.get(tile).map(|p| p.pos)
    }

    /// Total width: one past the rightmost occupied column.
    pub fn width(&self) -> usize {
        self.columns.keys().next_back().map_or(0, |x| x + 1)
    }

    /// Total height: one past the lowest occupied cell.
    pub fn height(&self) -> usize {
        self.tiles
            .values()
            .map(|p| p.pos.y + p.height)
            .max()
            .unwrap_or(0)
    }

    /// The tile covering the given cell, if any.
    pub fn tile_at(&self, pos: V2) -> Option<&T> {
        let column = self.columns.get(&pos.x)?;
        column.iter().find(|t| {
            // note: tiles in `columns` always have a placement
            let p = &self.tiles[t];
            pos.y >= p.pos.y && pos.y < p.pos.y + p.height
        })
    }

    /// Iterate tiles with their placements in tile order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &Placement)> {
        self.tiles.iter()
    }

    /// Iterate occupied columns in ascending x; tiles within a column come in
    /// ascending y order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &[T])> {
        self.columns.iter().map(|(x, ts)| (*x, ts.as_slice()))
    }

    /// Place a tile, moving it if it is already on the grid. Tiles already
    /// overlapping the occupied cells are shifted downward, cascading.
    pub fn place(&mut self, tile: T, pos: V2, height: usize) {
        let height = height.max(1);
        self.remove(&tile);

        // Shift the column's tiles out of the way, in ascending y order.
        let mut floor = pos.y + height;
        for other in self.columns.get(&pos.x).cloned().unwrap_or_default() {
            let p = self.tiles[&other];
            if p.pos.y + p.height <= pos.y {
                continue;
            }
            if p.overlaps_rows(pos.y, floor) {
                let moved = V2::new(pos.x, floor);
                floor = moved.y + p.height;
                self.tiles.insert(
                    other,
                    Placement {
                        pos: moved,
                        height: p.height,
                    },
                );
            } else {
                floor = p.pos.y + p.height;
            }
        }

        self.tiles.insert(tile.clone(), Placement { pos, height });
        let column = self.columns.entry(pos.x).or_default();
        column.push(tile);
        let tiles = &self.tiles;
        column.sort_by_key(|t| tiles[t].pos.y);
    }

    /// Remove a tile from the grid. No other tile moves.
    pub fn remove(&mut self, tile: &T) -> Option<Placement> {
        let p = self.tiles.remove(tile)?;
        if let Some(column) = self.columns.get_mut(&p.pos.x) {
            column.retain(|t| t != tile);
            if column.is_empty() {
                self.columns.remove(&p.pos.x);
            }
        }
        Some(p)
    }

    /// Shift every tile in columns `>= from_x` right by `by`, leaving a gap.
    pub fn shift_columns(&mut self, from_x: usize, by: usize) {
        if by == 0 {
            return;
        }
        let moved: Vec<(usize, Vec<T>)> = self.columns.split_off(&from_x).into_iter().collect();
        for (x, tiles) in moved.into_iter().rev() {
            for t in &tiles {
                if let Some(p) = self.tiles.get_mut(t) {
                    p.pos.x = x + by;
                }
            }
            self.columns.insert(x + by, tiles);
        }
    }
}
