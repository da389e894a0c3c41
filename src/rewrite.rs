//! Double-pushout rewriting of matched subgraphs.
//!
//! A [`Rule`] is a pair of open hypergraphs with the same boundary widths.
//! Applying it at a [`MatchState`] deletes the matched edges and wires,
//! embeds the right-hand side under fresh identifiers, and stitches the
//! surrounding wires to the embedded copy through the boundary
//! correspondence.

use crate::hypergraph::Hypergraph;
use crate::matching::MatchState;
use crate::port::{HyperEdgeId, PortOwner, SourcePort, TargetPort};
use crate::signature::Signature;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule boundary widths differ: left-hand side is {lhs:?}, right-hand side is {rhs:?}")]
    BoundaryMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

/// A rewrite rule `lhs ⇒ rhs` between open hypergraphs of equal boundary
/// width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule<S: Signature> {
    lhs: Hypergraph<S>,
    rhs: Hypergraph<S>,
}

impl<S: Signature> Rule<S> {
    /// Construct a rule, rejecting sides with different boundary widths.
    pub fn new(lhs: Hypergraph<S>, rhs: Hypergraph<S>) -> Result<Self, RuleError> {
        if lhs.size() != rhs.size() {
            return Err(RuleError::BoundaryMismatch {
                lhs: lhs.size(),
                rhs: rhs.size(),
            });
        }
        Ok(Rule { lhs, rhs })
    }

    pub fn lhs(&self) -> &Hypergraph<S> {
        &self.lhs
    }

    pub fn rhs(&self) -> &Hypergraph<S> {
        &self.rhs
    }

    /// The rule applied backwards: `rhs ⇒ lhs`.
    pub fn inverse(&self) -> Self {
        Rule {
            lhs: self.rhs.clone(),
            rhs: self.lhs.clone(),
        }
    }
}

impl<S: Signature> Hypergraph<S> {
    /// Apply `rule` at the site witnessed by `m` (an embedding of
    /// `rule.lhs()` in `self`, as produced by
    /// [`find_matches`](Hypergraph::find_matches)).
    ///
    /// Returns the rewritten hypergraph together with a [`MatchState`]
    /// locating the embedded right-hand side in it.
    pub fn rewrite(&self, rule: &Rule<S>, m: &MatchState) -> (Self, MatchState) {
        let base = self.next_edge_id().0;
        let mut g = self.clone();

        // Delete the image of every lhs wire, then the matched edges with all
        // their remaining incident wires.
        for (_, (hs, _)) in m.wires(rule.lhs()) {
            g.disconnect_source_in_place(&hs);
        }
        for (_, he) in m.edges().iter() {
            g = g.delete_edge(*he);
        }

        // Embed the rhs under fresh identifiers.
        for (e, sig) in rule.rhs().edges() {
            g.insert_edge_raw(HyperEdgeId(e.0 + base), sig.clone());
        }

        // Anchors: where the host met the matched subgraph, by boundary index.
        let anchor_source = |i: usize| m.ports_source().get(&SourcePort::boundary(i)).copied();
        let anchor_target = |j: usize| m.ports_target().get(&TargetPort::boundary(j)).copied();

        let mut witness = MatchState::new();
        for (e, _) in rule.rhs().edges() {
            witness.edges.insert(e, HyperEdgeId(e.0 + base));
        }

        for (s, t) in rule.rhs().wires() {
            let hs = match s.owner {
                PortOwner::Gen(e) => Some(SourcePort::gen(HyperEdgeId(e.0 + base), s.index)),
                PortOwner::Boundary => anchor_source(s.index),
            };
            let ht = match t.owner {
                PortOwner::Gen(e) => Some(TargetPort::gen(HyperEdgeId(e.0 + base), t.index)),
                PortOwner::Boundary => anchor_target(t.index),
            };
            let (Some(hs), Some(ht)) = (hs, ht) else {
                // An anchor the match never recorded: the rule is wider than
                // the match site. Caller error; drop the wire.
                debug_assert!(false, "rewrite: unanchored interface wire");
                continue;
            };
            // An anchor on a deleted edge (the match folded back onto itself)
            // has nothing left to stitch to.
            if edge_gone(&g, hs.owner) || edge_gone(&g, ht.owner) {
                continue;
            }
            g.connect_in_place(hs, ht);
            witness.ports_source.insert(s, hs);
            witness.ports_target.insert(t, ht);
        }

        // Record images for the dangling rhs source ports too, completing
        // the witness exactly the way the matcher would. Dangling target
        // ports stay unmapped, as they do in an enumerated match.
        complete_witness(rule.rhs(), base, &mut witness);

        (g, witness)
    }
}

fn edge_gone<S: Signature>(g: &Hypergraph<S>, owner: PortOwner) -> bool {
    match owner {
        PortOwner::Boundary => false,
        PortOwner::Gen(e) => !g.contains_edge(e),
    }
}

/// Map every generator source port of the embedded rhs that stitching did
/// not already record.
fn complete_witness<S: Signature>(rhs: &Hypergraph<S>, base: usize, witness: &mut MatchState) {
    for (e, sig) in rhs.edges() {
        let image = HyperEdgeId(e.0 + base);
        for j in 0..sig.outputs() {
            let p = SourcePort::gen(e, j);
            if !witness.ports_source.contains_left(&p) {
                witness.ports_source.insert(p, SourcePort::gen(image, j));
            }
        }
    }
}
