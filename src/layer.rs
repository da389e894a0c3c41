//! Longest-path layering of the wire DAG.
//!
//! Assigns each hyperedge an integer column equal to the length of the
//! longest chain of generator-to-generator wires leading to it, so that every
//! wire between generators flows strictly left to right.

use crate::hypergraph::Hypergraph;
use crate::port::{HyperEdgeId, PortOwner};
use crate::signature::Signature;

use std::collections::BTreeMap;

/// Compute the column of every hyperedge reachable in the wire DAG by a
/// Kahn-style frontier sweep: a generator's column is the wave at which its
/// last predecessor has been processed, i.e. its longest-path depth.
///
/// Returns the assignment and whether it is complete. Generators on a cycle
/// are never assigned, and the second component is `false`.
pub fn layer<S: Signature>(g: &Hypergraph<S>) -> (BTreeMap<HyperEdgeId, usize>, bool) {
    // Successor lists and indegrees of the generator-to-generator wire graph.
    let mut successors: BTreeMap<HyperEdgeId, Vec<HyperEdgeId>> = BTreeMap::new();
    let mut indegree: BTreeMap<HyperEdgeId, usize> = BTreeMap::new();
    for (e, _) in g.edges() {
        successors.insert(e, Vec::new());
        indegree.insert(e, 0);
    }
    for (s, t) in g.wires() {
        if let (PortOwner::Gen(from), PortOwner::Gen(to)) = (s.owner, t.owner) {
            successors.entry(from).or_default().push(to);
            *indegree.entry(to).or_default() += 1;
        }
    }

    let mut columns = BTreeMap::new();
    let mut frontier: Vec<HyperEdgeId> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(e, _)| *e)
        .collect();

    let mut depth = 0;
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for e in frontier {
            columns.insert(e, depth);
            for succ in &successors[&e] {
                let d = indegree.get_mut(succ).expect("successor is a known edge");
                *d -= 1;
                if *d == 0 {
                    next.push(*succ);
                }
            }
        }
        frontier = next;
        depth += 1;
    }

    let complete = columns.len() == g.edge_count();
    (columns, complete)
}

/// Whether the generator-to-generator wire graph is acyclic.
pub fn is_acyclic<S: Signature>(g: &Hypergraph<S>) -> bool {
    layer(g).1
}
