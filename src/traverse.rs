//! Breadth-first enumeration of source ports.

use crate::hypergraph::Hypergraph;
use crate::port::{HyperEdgeId, PortOwner, SourcePort};
use crate::signature::Signature;

use std::collections::{BTreeSet, VecDeque};

/// All source ports of `g` in breadth-first order from the left boundary.
///
/// Left-boundary ports come first in index order. Each generator's source
/// ports appear contiguously; generators are visited in the order their
/// target ports first become reachable along wires. Generators never reached
/// that way (disconnected components, generators fed by nothing) follow in
/// ascending id order, each seeding its own traversal, so the enumeration is
/// total.
pub fn bfs_source_ports<S: Signature>(g: &Hypergraph<S>) -> Vec<SourcePort> {
    let mut bfs = Bfs {
        g,
        out: Vec::new(),
        discovered: BTreeSet::new(),
        queue: VecDeque::new(),
    };

    let (in_width, _) = g.size();
    for i in 0..in_width {
        let s = SourcePort::boundary(i);
        bfs.follow(&s);
        bfs.out.push(s);
    }
    bfs.drain();

    // Seed any generator the boundary never reaches.
    let unreached: Vec<HyperEdgeId> = g
        .edges()
        .map(|(e, _)| e)
        .filter(|e| !bfs.discovered.contains(e))
        .collect();
    for e in unreached {
        if bfs.discovered.insert(e) {
            bfs.queue.push_back(e);
            bfs.drain();
        }
    }

    bfs.out
}

struct Bfs<'a, S: Signature> {
    g: &'a Hypergraph<S>,
    out: Vec<SourcePort>,
    discovered: BTreeSet<HyperEdgeId>,
    queue: VecDeque<HyperEdgeId>,
}

impl<S: Signature> Bfs<'_, S> {
    /// Discover the generator (if any) consuming the wire out of `s`.
    fn follow(&mut self, s: &SourcePort) {
        if let Some(t) = self.g.target(s) {
            if let PortOwner::Gen(e) = t.owner {
                if self.discovered.insert(e) {
                    self.queue.push_back(e);
                }
            }
        }
    }

    /// Emit source ports of queued generators, discovering onward.
    fn drain(&mut self) {
        while let Some(e) = self.queue.pop_front() {
            let n = self.g.signature(e).map_or(0, |sig| sig.outputs());
            for j in 0..n {
                let s = SourcePort::gen(e, j);
                self.follow(&s);
                self.out.push(s);
            }
        }
    }
}
