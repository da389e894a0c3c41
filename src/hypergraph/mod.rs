//! Monogamous open hypergraphs.
//!
//! A [`Hypergraph`] is a set of generators (hyperedges labeled with a
//! [`Signature`]) together with a partial bijection from source ports to
//! target ports: the wires. Monogamy is structural: the connection map is a
//! [`BiMap`], so a port is the endpoint of at most one wire.
//!
//! Wires may start on the left boundary ([`SourcePort::boundary`]) or end on
//! the right boundary ([`TargetPort::boundary`]); boundary widths are
//! implicit, one past the highest index in use.
//!
//! Hypergraphs are value-typed: every operation returns a new value and no
//! operation mutates its receiver.

pub mod arrow;

use crate::bimap::BiMap;
use crate::port::{HyperEdgeId, PortOwner, SourcePort, TargetPort, Wire};
use crate::signature::Signature;

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hypergraph<S: Signature> {
    connections: BiMap<SourcePort, TargetPort>,
    signatures: BTreeMap<HyperEdgeId, S>,
    next_edge_id: HyperEdgeId,
}

impl<S: Signature> Default for Hypergraph<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Signature> Hypergraph<S> {
    /// The hypergraph with no edges and no wires.
    pub fn empty() -> Self {
        Hypergraph {
            connections: BiMap::new(),
            signatures: BTreeMap::new(),
            next_edge_id: HyperEdgeId(0),
        }
    }

    /// A single wire from left boundary 0 to right boundary 0.
    pub fn identity() -> Self {
        Self::identity_of_width(1)
    }

    /// `w` parallel boundary-to-boundary wires.
    pub fn identity_of_width(w: usize) -> Self {
        let mut g = Self::empty();
        for i in 0..w {
            g.connections
                .insert(SourcePort::boundary(i), TargetPort::boundary(i));
        }
        g
    }

    /// Allocate a fresh edge labeled `sig`, initially unconnected.
    pub fn add_edge(&self, sig: S) -> (HyperEdgeId, Self) {
        let mut g = self.clone();
        let e = g.next_edge_id;
        g.signatures.insert(e, sig);
        g.next_edge_id = HyperEdgeId(e.0 + 1);
        (e, g)
    }

    /// One generator wired straight through: boundary inputs feed its target
    /// ports and its source ports feed boundary outputs.
    pub fn singleton(sig: S) -> Self {
        let (k, n) = (sig.inputs(), sig.outputs());
        let (e, mut g) = Self::empty().add_edge(sig);
        for i in 0..k {
            g.connections
                .insert(SourcePort::boundary(i), TargetPort::gen(e, i));
        }
        for j in 0..n {
            g.connections
                .insert(SourcePort::gen(e, j), TargetPort::boundary(j));
        }
        g
    }

    /// Insert the wire `s → t`, displacing any wire previously using `s` or
    /// `t`. Ports owned by unknown edges are a caller error: rejected as a
    /// no-op (hard failure in debug builds) rather than corrupting the graph.
    pub fn connect(&self, s: SourcePort, t: TargetPort) -> Self {
        debug_assert!(self.valid_source(&s), "connect: invalid source port");
        debug_assert!(self.valid_target(&t), "connect: invalid target port");
        if !self.valid_source(&s) || !self.valid_target(&t) {
            return self.clone();
        }
        let mut g = self.clone();
        g.connections.insert(s, t);
        g
    }

    /// Remove the wire starting at `s`, if any.
    pub fn disconnect_source(&self, s: &SourcePort) -> Self {
        let mut g = self.clone();
        g.connections.remove_left(s);
        g
    }

    /// Remove the wire ending at `t`, if any.
    pub fn disconnect_target(&self, t: &TargetPort) -> Self {
        let mut g = self.clone();
        g.connections.remove_right(t);
        g
    }

    /// The target the wire from `s` arrives at.
    pub fn target(&self, s: &SourcePort) -> Option<TargetPort> {
        self.connections.get(s).copied()
    }

    /// The source the wire into `t` departs from.
    pub fn source(&self, t: &TargetPort) -> Option<SourcePort> {
        self.connections.get_rev(t).copied()
    }

    /// Remove an edge and every wire touching any of its ports. Unknown edges
    /// are a no-op. The edge's identifier is never reused.
    pub fn delete_edge(&self, e: HyperEdgeId) -> Self {
        let mut g = self.clone();
        if g.signatures.remove(&e).is_none() {
            return g;
        }
        g.connections
            .retain(|s, t| s.owner != PortOwner::Gen(e) && t.owner != PortOwner::Gen(e));
        g
    }

    /// Boundary widths `(in, out)`: one past the highest boundary index in
    /// use on the left (wire sources) and right (wire targets).
    pub fn size(&self) -> (usize, usize) {
        let mut input = 0;
        let mut output = 0;
        for (s, t) in self.connections.iter() {
            if s.is_boundary() {
                input = input.max(s.index + 1);
            }
            if t.is_boundary() {
                output = output.max(t.index + 1);
            }
        }
        (input, output)
    }

    /// For each input port index of `e`, the wire ending there (if any).
    pub fn input_wires(&self, e: HyperEdgeId) -> Vec<Option<Wire>> {
        let k = self.signatures.get(&e).map_or(0, |sig| sig.inputs());
        (0..k)
            .map(|i| {
                let t = TargetPort::gen(e, i);
                self.source(&t).map(|s| (s, t))
            })
            .collect()
    }

    /// For each output port index of `e`, the wire starting there (if any).
    pub fn output_wires(&self, e: HyperEdgeId) -> Vec<Option<Wire>> {
        let n = self.signatures.get(&e).map_or(0, |sig| sig.outputs());
        (0..n)
            .map(|j| {
                let s = SourcePort::gen(e, j);
                self.target(&s).map(|t| (s, t))
            })
            .collect()
    }

    /// Iterate wires in ascending source-port order.
    pub fn wires(&self) -> impl Iterator<Item = Wire> + '_ {
        self.connections.iter().map(|(s, t)| (*s, *t))
    }

    /// Iterate edges with their signatures in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = (HyperEdgeId, &S)> {
        self.signatures.iter().map(|(e, sig)| (*e, sig))
    }

    pub fn signature(&self, e: HyperEdgeId) -> Option<&S> {
        self.signatures.get(&e)
    }

    pub fn contains_edge(&self, e: HyperEdgeId) -> bool {
        self.signatures.contains_key(&e)
    }

    pub fn edge_count(&self) -> usize {
        self.signatures.len()
    }

    pub fn wire_count(&self) -> usize {
        self.connections.len()
    }

    /// The smallest identifier never yet allocated.
    pub fn next_edge_id(&self) -> HyperEdgeId {
        self.next_edge_id
    }

    fn valid_source(&self, s: &SourcePort) -> bool {
        match s.owner {
            PortOwner::Boundary => true,
            PortOwner::Gen(e) => self
                .signatures
                .get(&e)
                .is_some_and(|sig| s.index < sig.outputs()),
        }
    }

    fn valid_target(&self, t: &TargetPort) -> bool {
        match t.owner {
            PortOwner::Boundary => true,
            PortOwner::Gen(e) => self
                .signatures
                .get(&e)
                .is_some_and(|sig| t.index < sig.inputs()),
        }
    }

    // In-place internals for operations (composition, rewriting) that build a
    // graph wholesale and uphold the invariants themselves.

    pub(crate) fn insert_edge_raw(&mut self, e: HyperEdgeId, sig: S) {
        self.signatures.insert(e, sig);
        if e.0 >= self.next_edge_id.0 {
            self.next_edge_id = HyperEdgeId(e.0 + 1);
        }
    }

    pub(crate) fn connect_in_place(&mut self, s: SourcePort, t: TargetPort) {
        debug_assert!(self.valid_source(&s), "connect: invalid source port");
        debug_assert!(self.valid_target(&t), "connect: invalid target port");
        if self.valid_source(&s) && self.valid_target(&t) {
            self.connections.insert(s, t);
        }
    }

    pub(crate) fn disconnect_source_in_place(&mut self, s: &SourcePort) {
        self.connections.remove_left(s);
    }

    pub(crate) fn set_next_edge_id(&mut self, next: HyperEdgeId) {
        debug_assert!(self.signatures.keys().all(|e| e.0 < next.0));
        self.next_edge_id = next;
    }
}
