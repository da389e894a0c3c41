use monogram::hypergraph::Hypergraph;
use monogram::port::{SourcePort, TargetPort};

use crate::hypergraph::strategy::arb_diagram;
use crate::theory::*;

use proptest::proptest;

#[test]
fn tensor_of_identities_stacks_boundary_wires() {
    let id: Hypergraph<Op> = Hypergraph::identity();
    let two = id.tensor(&id);
    assert_eq!(two.size(), (2, 2));
    assert_eq!(two.wire_count(), 2);
    for i in 0..2 {
        assert_eq!(
            two.target(&SourcePort::boundary(i)),
            Some(TargetPort::boundary(i))
        );
    }
}

#[test]
fn tensor_stacks_the_right_operand_below() {
    let a = Hypergraph::singleton(op('a', 1, 2));
    let b = Hypergraph::singleton(op('b', 1, 1));
    let t = &a | &b;

    assert_eq!(t.size(), (2, 3));
    assert_eq!(t.edge_count(), 2);

    let (ea, _) = a.edges().next().unwrap();
    let eb = t.edges().map(|(e, _)| e).max().unwrap();
    // `b`'s boundary wires sit below `a`'s on both sides
    assert_eq!(t.target(&SourcePort::boundary(1)), Some(TargetPort::gen(eb, 0)));
    assert_eq!(t.target(&SourcePort::gen(eb, 0)), Some(TargetPort::boundary(2)));
    assert_eq!(t.target(&SourcePort::gen(ea, 1)), Some(TargetPort::boundary(1)));
}

proptest! {
    #[test]
    fn tensor_is_associative(a in arb_diagram(), b in arb_diagram(), c in arb_diagram()) {
        // associativity holds on the nose: renamings coincide
        assert_eq!(a.tensor(&b).tensor(&c), a.tensor(&b.tensor(&c)));
    }

    #[test]
    fn empty_is_the_tensor_unit(g in arb_diagram()) {
        let empty = Hypergraph::empty();
        assert_eq!(empty.tensor(&g), g);
        assert_eq!(g.tensor(&empty), g);
    }
}
