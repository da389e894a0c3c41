//! Algebraic composition of open hypergraphs.
//!
//! `tensor` stacks two diagrams vertically; `compose` places them side by
//! side and splices the left diagram's outputs into the right diagram's
//! inputs. Composition is *affine*: when the widths disagree, excess wires on
//! the wider side bypass the other diagram and land on the combined boundary
//! instead of failing.
//!
//! `(Hypergraph, tensor, empty)` is a symmetric monoidal category with
//! `compose` as sequential composition. `&a | &b` is tensor and `&a >> &b`
//! is composition.

use super::Hypergraph;
use crate::port::{HyperEdgeId, PortOwner, SourcePort, TargetPort};
use crate::signature::Signature;

impl<S: Signature> Hypergraph<S> {
    /// Parallel composition: `other` below `self`.
    ///
    /// Edges of `other` are renamed by `+ self.next_edge_id()`; its boundary
    /// indices are shifted below `self`'s on both sides.
    pub fn tensor(&self, other: &Self) -> Self {
        let ma = self.next_edge_id().0;
        let mb = other.next_edge_id().0;
        let (ai, ao) = self.size();

        let mut g = self.clone();
        for (e, sig) in other.edges() {
            g.insert_edge_raw(HyperEdgeId(e.0 + ma), sig.clone());
        }
        for (s, t) in other.wires() {
            let s = match s.owner {
                PortOwner::Boundary => SourcePort::boundary(s.index + ai),
                PortOwner::Gen(e) => SourcePort::gen(HyperEdgeId(e.0 + ma), s.index),
            };
            let t = match t.owner {
                PortOwner::Boundary => TargetPort::boundary(t.index + ao),
                PortOwner::Gen(e) => TargetPort::gen(HyperEdgeId(e.0 + ma), t.index),
            };
            g.connect_in_place(s, t);
        }
        g.set_next_edge_id(HyperEdgeId(ma + mb));
        g
    }

    /// Sequential composition: `self` to the left of `other`.
    ///
    /// With `offset = max(0, a_out - b_in)`, input `j` of `other` consumes
    /// output `j + offset` of `self`: outputs and inputs pair lowest-to-lowest
    /// after the shift. Excess outputs of `self` (indices below `offset`)
    /// bypass `other` onto the combined right boundary; excess inputs of
    /// `other` re-attach to the combined left boundary after `self`'s inputs.
    pub fn compose(&self, other: &Self) -> Self {
        let ma = self.next_edge_id().0;
        let mb = other.next_edge_id().0;
        let (ai, ao) = self.size();
        let (bi, _) = other.size();
        let offset = ao.saturating_sub(bi);

        let mut g = self.clone();
        for (e, sig) in other.edges() {
            g.insert_edge_raw(HyperEdgeId(e.0 + ma), sig.clone());
        }

        for (s, t) in other.wires() {
            let t = match t.owner {
                PortOwner::Boundary => TargetPort::boundary(t.index + offset),
                PortOwner::Gen(e) => TargetPort::gen(HyperEdgeId(e.0 + ma), t.index),
            };
            let s = match s.owner {
                PortOwner::Gen(e) => SourcePort::gen(HyperEdgeId(e.0 + ma), s.index),
                PortOwner::Boundary => {
                    // A wire beginning on `other`'s former input boundary.
                    let i = s.index + offset;
                    match self.source(&TargetPort::boundary(i)) {
                        // Splice: `self`'s wire into output `i` and this wire
                        // become one. The spliced-out wire is displaced by the
                        // key collision on insert.
                        Some(a_src) => a_src,
                        // Unpaired: re-attach to the combined left boundary.
                        // With dense boundaries, `i >= ao` here.
                        None => {
                            debug_assert!(i >= ao);
                            SourcePort::boundary((i + ai).saturating_sub(ao))
                        }
                    }
                }
            };
            g.connect_in_place(s, t);
        }
        g.set_next_edge_id(HyperEdgeId(ma + mb));
        g
    }
}

use core::ops::{BitOr, Shr};

impl<S: Signature> BitOr<&Hypergraph<S>> for &Hypergraph<S> {
    type Output = Hypergraph<S>;

    fn bitor(self, rhs: &Hypergraph<S>) -> Hypergraph<S> {
        self.tensor(rhs)
    }
}

impl<S: Signature> Shr<&Hypergraph<S>> for &Hypergraph<S> {
    type Output = Hypergraph<S>;

    fn shr(self, rhs: &Hypergraph<S>) -> Hypergraph<S> {
        self.compose(rhs)
    }
}
