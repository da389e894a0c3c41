//! Grid layout of a hypergraph for rendering and editing.
//!
//! A [`Layout`] pairs a hypergraph with a [`Grid`] of tiles: one
//! [`Tile::Edge`] per generator, plus one 1×1 [`Tile::Pseudo`] for each
//! column a wire crosses between its endpoints, so that every wire advances
//! exactly one column at a time.
//!
//! Grid coordinates are *interior*: generator tiles live in columns `0..w`.
//! The public coordinate space of [`Layout::lookup`], [`Layout::positions`]
//! and [`Layout::port_position`] has two extra columns: the left boundary at
//! `x = 0` and the right boundary at `x = w + 1`.
//!
//! Editor mutations keep the layering invariant: a wire between generators
//! only exists while its source column is strictly left of its target
//! column. `connect_ports` refuses (as a no-op) connections that would
//! violate it, and `move_tile` drops wires its move invalidates.

use crate::equivalence::Equivalence;
use crate::grid::{Grid, V2};
use crate::hypergraph::Hypergraph;
use crate::layer::layer;
use crate::port::{HyperEdgeId, Port, PortOwner, PortRole, SourcePort, TargetPort, Wire};
use crate::signature::Signature;

use itertools::Itertools;

use std::collections::BTreeMap;

/// The i-th synthetic bend on the wire from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PseudoNode {
    pub source: SourcePort,
    pub target: TargetPort,
    pub offset: usize,
}

/// An atom placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Edge(HyperEdgeId),
    Pseudo(PseudoNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout<S: Signature> {
    hypergraph: Hypergraph<S>,
    grid: Grid<Tile>,
}

impl<S: Signature> Default for Layout<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Signature> Layout<S> {
    pub fn empty() -> Self {
        Layout {
            hypergraph: Hypergraph::empty(),
            grid: Grid::new(),
        }
    }

    /// Lay out an existing hypergraph: columns by longest-path layering,
    /// rows by stacking within each column. `None` if the wire graph is
    /// cyclic and so admits no left-to-right layout.
    pub fn from_hypergraph(hypergraph: Hypergraph<S>) -> Option<Self> {
        let (columns, complete) = layer(&hypergraph);
        if !complete {
            return None;
        }

        let mut by_column: Equivalence<HyperEdgeId, usize> = Equivalence::new();
        for (e, x) in &columns {
            by_column.insert(*e, *x);
        }

        let mut l = Layout {
            hypergraph,
            grid: Grid::new(),
        };
        for (x, members) in by_column.classes() {
            let mut y = 0;
            for e in members {
                let height = l
                    .hypergraph
                    .signature(*e)
                    .map_or(1, |sig| sig.height());
                l.grid.place(Tile::Edge(*e), V2::new(*x, y), height);
                y += height;
            }
        }
        l.recompute_pseudonodes();
        Some(l)
    }

    pub fn hypergraph(&self) -> &Hypergraph<S> {
        &self.hypergraph
    }

    /// Grid extent in the public coordinate space: interior width plus the
    /// two boundary columns; height covers tiles and both boundaries.
    pub fn dimensions(&self) -> V2 {
        let (in_w, out_w) = self.hypergraph.size();
        V2::new(
            self.grid.width() + 2,
            self.grid.height().max(in_w).max(out_w),
        )
    }

    /// Every tile with its position in the public coordinate space.
    pub fn positions(&self) -> BTreeMap<Tile, V2> {
        self.grid
            .iter()
            .map(|(t, p)| (*t, V2::new(p.pos.x + 1, p.pos.y)))
            .collect()
    }

    /// Where a port renders, in the public coordinate space.
    pub fn port_position(&self, port: impl Into<Port>) -> Option<V2> {
        let port: Port = port.into();
        match (port.owner, port.role) {
            (PortOwner::Boundary, PortRole::Source) => Some(V2::new(0, port.index)),
            (PortOwner::Boundary, PortRole::Target) => {
                Some(V2::new(self.grid.width() + 1, port.index))
            }
            (PortOwner::Gen(e), role) => {
                let p = self.grid.placement(&Tile::Edge(e))?;
                let sig = self.hypergraph.signature(e)?;
                let offsets = match role {
                    PortRole::Source => sig.output_offsets(),
                    PortRole::Target => sig.input_offsets(),
                };
                let dy = offsets.get(port.index).copied()?;
                Some(V2::new(p.pos.x + 1, p.pos.y + dy))
            }
        }
    }

    /// The ports represented by a cell: `(connectable target, connectable
    /// source)`. Left-boundary cells are wire sources, right-boundary cells
    /// wire targets; generator cells answer according to their port offsets.
    /// Pseudonode cells are not connection anchors and answer `(None, None)`.
    pub fn lookup(&self, pos: V2) -> (Option<TargetPort>, Option<SourcePort>) {
        let width = self.grid.width() + 2;
        if pos.x == 0 {
            return (None, Some(SourcePort::boundary(pos.y)));
        }
        if pos.x + 1 == width {
            return (Some(TargetPort::boundary(pos.y)), None);
        }
        let cell = V2::new(pos.x - 1, pos.y);
        match self.grid.tile_at(cell) {
            Some(Tile::Edge(e)) => {
                let Some(sig) = self.hypergraph.signature(*e) else {
                    return (None, None);
                };
                // note: tile_at guarantees the placement exists
                let top = self.grid.placement(&Tile::Edge(*e)).map_or(0, |p| p.pos.y);
                let dy = pos.y - top;
                let target = sig
                    .input_offsets()
                    .iter()
                    .position(|o| *o == dy)
                    .map(|i| TargetPort::gen(*e, i));
                let source = sig
                    .output_offsets()
                    .iter()
                    .position(|o| *o == dy)
                    .map(|j| SourcePort::gen(*e, j));
                (target, source)
            }
            _ => (None, None),
        }
    }

    /// Add a generator and place its tile. Pseudonodes are recomputed: the
    /// placement may have shifted other tiles.
    pub fn place_generator(&self, sig: S, pos: V2) -> (HyperEdgeId, Self) {
        let (e, hypergraph) = self.hypergraph.add_edge(sig.clone());
        let mut l = Layout {
            hypergraph,
            grid: self.grid.clone(),
        };
        l.grid.place(Tile::Edge(e), pos, sig.height());
        l.recompute_pseudonodes();
        (e, l)
    }

    /// Whether connecting `s → t` keeps wires flowing left to right.
    /// Boundaries always connect; generator endpoints require the source
    /// column strictly left of the target column.
    pub fn can_connect_ports(&self, s: &SourcePort, t: &TargetPort) -> bool {
        match (s.owner, t.owner) {
            (PortOwner::Gen(se), PortOwner::Gen(te)) => {
                match (self.column(se), self.column(te)) {
                    (Some(sx), Some(tx)) => sx < tx,
                    _ => false,
                }
            }
            _ => true,
        }
    }

    /// Connect two ports, displacing any wires previously through either
    /// endpoint along with their pseudonodes. A connection that would break
    /// the layering invariant is a silent no-op.
    pub fn connect_ports(&self, s: SourcePort, t: TargetPort) -> Self {
        if !self.can_connect_ports(&s, &t) {
            return self.clone();
        }
        let mut l = Layout {
            hypergraph: self.hypergraph.connect(s, t),
            grid: self.grid.clone(),
        };
        l.remove_pseudonodes_touching(&s, &t);
        l.add_pseudonodes(&(s, t));
        l
    }

    /// Remove the wire out of `s` and its pseudonodes.
    pub fn disconnect_source(&self, s: &SourcePort) -> Self {
        let mut l = Layout {
            hypergraph: self.hypergraph.disconnect_source(s),
            grid: self.grid.clone(),
        };
        l.remove_pseudonodes_where(|p| p.source == *s);
        l
    }

    /// Remove the wire into `t` and its pseudonodes.
    pub fn disconnect_target(&self, t: &TargetPort) -> Self {
        let mut l = Layout {
            hypergraph: self.hypergraph.disconnect_target(t),
            grid: self.grid.clone(),
        };
        l.remove_pseudonodes_where(|p| p.target == *t);
        l
    }

    /// Delete a generator, its tile, its wires and their pseudonodes.
    pub fn delete_generator(&self, e: HyperEdgeId) -> Self {
        let mut l = Layout {
            hypergraph: self.hypergraph.delete_edge(e),
            grid: self.grid.clone(),
        };
        l.grid.remove(&Tile::Edge(e));
        l.recompute_pseudonodes();
        l
    }

    /// Move a tile. Moving a generator drops any of its wires that no longer
    /// flow left to right; moving a pseudonode changes only its row.
    pub fn move_tile(&self, tile: Tile, pos: V2) -> Self {
        match tile {
            Tile::Edge(e) => {
                let mut l = self.clone();
                let height = l.hypergraph.signature(e).map_or(1, |sig| sig.height());
                l.grid.place(tile, pos, height);

                let wires: Vec<Wire> = l
                    .hypergraph
                    .input_wires(e)
                    .into_iter()
                    .chain(l.hypergraph.output_wires(e))
                    .flatten()
                    .collect();
                for (s, t) in wires {
                    if !l.can_connect_ports(&s, &t) {
                        l.hypergraph = l.hypergraph.disconnect_source(&s);
                    }
                }
                l.recompute_pseudonodes();
                l
            }
            Tile::Pseudo(_) => {
                let mut l = self.clone();
                if let Some(p) = l.grid.placement(&tile) {
                    l.grid.place(tile, V2::new(p.pos.x, pos.y), 1);
                }
                l
            }
        }
    }

    /// Shift every tile in columns `>= x` right by `n`, leaving a gap.
    pub fn insert_layer(&self, x: usize, n: usize) -> Self {
        let mut l = self.clone();
        l.grid.shift_columns(x, n);
        l.recompute_pseudonodes();
        l
    }

    /// Delete the columns whose tiles are all pseudonodes, closing the gaps.
    pub fn remove_pseudonode_only_layers(&self) -> Self {
        let removed: Vec<usize> = self
            .grid
            .columns()
            .filter(|(_, tiles)| tiles.iter().all(|t| matches!(t, Tile::Pseudo(_))))
            .map(|(x, _)| x)
            .collect();
        if removed.is_empty() {
            return self.clone();
        }

        let mut l = Layout {
            hypergraph: self.hypergraph.clone(),
            grid: Grid::new(),
        };
        for (x, tiles) in self.grid.columns() {
            if removed.contains(&x) {
                continue;
            }
            let shift = removed.iter().filter(|r| **r < x).count();
            for tile in tiles {
                if let Tile::Edge(_) = tile {
                    // note: tiles listed by a column always have a placement
                    let p = self.grid.placement(tile).expect("placed tile");
                    l.grid
                        .place(*tile, V2::new(x - shift, p.pos.y), p.height);
                }
            }
        }
        l.recompute_pseudonodes();
        l
    }

    /// Interior column of a generator's tile.
    fn column(&self, e: HyperEdgeId) -> Option<usize> {
        self.grid.position(&Tile::Edge(e)).map(|p| p.x)
    }

    /// Signed interior column of a wire endpoint; the left boundary sits one
    /// column before the interior and the right boundary one past it.
    fn source_column(&self, s: &SourcePort) -> Option<i64> {
        match s.owner {
            PortOwner::Boundary => Some(-1),
            PortOwner::Gen(e) => self.column(e).map(|x| x as i64),
        }
    }

    fn target_column(&self, t: &TargetPort) -> Option<i64> {
        match t.owner {
            PortOwner::Boundary => Some(self.grid.width() as i64),
            PortOwner::Gen(e) => self.column(e).map(|x| x as i64),
        }
    }

    /// Row where the wire out of `s` departs.
    fn source_row(&self, s: &SourcePort) -> Option<usize> {
        match s.owner {
            PortOwner::Boundary => Some(s.index),
            PortOwner::Gen(e) => {
                let p = self.grid.placement(&Tile::Edge(e))?;
                let offsets = self.hypergraph.signature(e)?.output_offsets();
                Some(p.pos.y + offsets.get(s.index).copied().unwrap_or(s.index))
            }
        }
    }

    fn remove_pseudonodes_where(&mut self, f: impl Fn(&PseudoNode) -> bool) {
        let stale: Vec<Tile> = self
            .grid
            .iter()
            .filter_map(|(t, _)| match t {
                Tile::Pseudo(p) if f(p) => Some(*t),
                _ => None,
            })
            .collect();
        for t in stale {
            self.grid.remove(&t);
        }
    }

    fn remove_pseudonodes_touching(&mut self, s: &SourcePort, t: &TargetPort) {
        self.remove_pseudonodes_where(|p| p.source == *s || p.target == *t);
    }

    /// Place the pseudonodes of one wire: one per interior column strictly
    /// between the endpoints, on the source's row.
    fn add_pseudonodes(&mut self, wire: &Wire) {
        let (s, t) = wire;
        let (Some(sx), Some(tx)) = (self.source_column(s), self.target_column(t)) else {
            return;
        };
        let Some(y) = self.source_row(s) else {
            return;
        };
        let count = (tx - sx - 1).max(0) as usize;
        for offset in 0..count {
            let tile = Tile::Pseudo(PseudoNode {
                source: *s,
                target: *t,
                offset,
            });
            let x = (sx + 1) as usize + offset;
            self.grid.place(tile, V2::new(x, y), 1);
        }
    }

    /// Drop every pseudonode and re-derive the full set from the current
    /// wires and tile positions.
    fn recompute_pseudonodes(&mut self) {
        self.remove_pseudonodes_where(|_| true);
        for wire in self.hypergraph.wires().collect_vec() {
            self.add_pseudonodes(&wire);
        }
    }
}
