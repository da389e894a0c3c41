use std::collections::BTreeSet;

use monogram::hypergraph::Hypergraph;
use monogram::signature::Arity;

use crate::hypergraph::strategy::arb_diagram;

use proptest::proptest;

/// Every wire endpoint is used by at most one wire.
pub fn assert_monogamous(g: &Hypergraph<Arity>) {
    let sources: BTreeSet<_> = g.wires().map(|(s, _)| s).collect();
    let targets: BTreeSet<_> = g.wires().map(|(_, t)| t).collect();
    assert_eq!(sources.len(), g.wire_count());
    assert_eq!(targets.len(), g.wire_count());

    // forward and reverse lookup agree on every wire
    for (s, t) in g.wires() {
        assert_eq!(g.target(&s), Some(t));
        assert_eq!(g.source(&t), Some(s));
    }
}

/// Boundary indices in use form a prefix `{0..w-1}` on each side.
pub fn assert_dense_boundaries(g: &Hypergraph<Arity>) {
    let (in_w, out_w) = g.size();
    let left: BTreeSet<usize> = g
        .wires()
        .filter(|(s, _)| s.is_boundary())
        .map(|(s, _)| s.index)
        .collect();
    let right: BTreeSet<usize> = g
        .wires()
        .filter(|(_, t)| t.is_boundary())
        .map(|(_, t)| t.index)
        .collect();
    let expected_left: BTreeSet<usize> = (0..in_w).collect();
    let expected_right: BTreeSet<usize> = (0..out_w).collect();
    assert_eq!(left, expected_left);
    assert_eq!(right, expected_right);
}

proptest! {
    #[test]
    fn composites_are_monogamous(g in arb_diagram()) {
        assert_monogamous(&g);
    }

    #[test]
    fn composites_have_dense_boundaries(g in arb_diagram()) {
        assert_dense_boundaries(&g);
    }

    #[test]
    fn edge_ids_stay_below_the_allocator(g in arb_diagram()) {
        for (e, _) in g.edges() {
            assert!(e < g.next_edge_id());
        }
    }
}
