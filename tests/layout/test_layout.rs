use monogram::grid::V2;
use monogram::layout::{Layout, PseudoNode, Tile};
use monogram::port::{PortOwner, SourcePort, TargetPort};

use crate::hypergraph::strategy::arb_diagram;
use crate::theory::*;

use proptest::proptest;

#[test]
fn empty_layout_has_only_the_boundary_columns() {
    let l: Layout<Op> = Layout::empty();
    assert_eq!(l.dimensions(), V2::new(2, 0));
}

#[test]
fn wires_grow_one_pseudonode_per_skipped_column() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(3, 0));

    let s = SourcePort::gen(a, 0);
    let t = TargetPort::gen(b, 0);
    assert!(l.can_connect_ports(&s, &t));
    let l = l.connect_ports(s, t);

    let pseudos: Vec<(Tile, V2)> = l
        .positions()
        .into_iter()
        .filter(|(t, _)| matches!(t, Tile::Pseudo(_)))
        .collect();
    assert_eq!(pseudos.len(), 2);
    assert_eq!(
        pseudos[0].0,
        Tile::Pseudo(PseudoNode {
            source: s,
            target: t,
            offset: 0
        })
    );
    // public coordinates: interior column 1 renders at x = 2
    assert_eq!(pseudos[0].1, V2::new(2, 0));
    assert_eq!(pseudos[1].1, V2::new(3, 0));
}

#[test]
fn adjacent_columns_need_no_pseudonodes() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(1, 0));
    let l = l.connect_ports(SourcePort::gen(a, 0), TargetPort::gen(b, 0));

    assert!(l
        .positions()
        .keys()
        .all(|t| matches!(t, Tile::Edge(_))));
}

#[test]
fn connections_against_the_flow_are_refused() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(2, 0));
    let (b, l) = l.place_generator(f(), V2::new(2, 3));
    let (c, l) = l.place_generator(f(), V2::new(0, 0));

    // same column, and right-to-left: both refused as silent no-ops
    assert!(!l.can_connect_ports(&SourcePort::gen(a, 0), &TargetPort::gen(b, 0)));
    assert!(!l.can_connect_ports(&SourcePort::gen(a, 0), &TargetPort::gen(c, 0)));
    let unchanged = l.connect_ports(SourcePort::gen(a, 0), TargetPort::gen(c, 0));
    assert_eq!(unchanged.hypergraph().wire_count(), 0);

    // boundaries always connect
    assert!(l.can_connect_ports(&SourcePort::boundary(0), &TargetPort::gen(c, 0)));
    assert!(l.can_connect_ports(&SourcePort::gen(a, 0), &TargetPort::boundary(0)));
}

#[test]
fn moving_a_generator_drops_wires_that_no_longer_flow() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(1, 0));
    let l = l.connect_ports(SourcePort::gen(a, 0), TargetPort::gen(b, 0));
    assert_eq!(l.hypergraph().wire_count(), 1);

    // moving b onto a's column invalidates the wire
    let moved = l.move_tile(Tile::Edge(b), V2::new(0, 3));
    assert_eq!(moved.hypergraph().wire_count(), 0);

    // moving it right again does not resurrect anything
    let back = moved.move_tile(Tile::Edge(b), V2::new(1, 0));
    assert_eq!(back.hypergraph().wire_count(), 0);
}

#[test]
fn moving_a_pseudonode_changes_only_its_row() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(2, 0));
    let s = SourcePort::gen(a, 0);
    let t = TargetPort::gen(b, 0);
    let l = l.connect_ports(s, t);

    let bend = Tile::Pseudo(PseudoNode {
        source: s,
        target: t,
        offset: 0,
    });
    let moved = l.move_tile(bend, V2::new(7, 5));
    assert_eq!(moved.positions()[&bend], V2::new(2, 5));
    assert_eq!(moved.hypergraph().wire_count(), 1);
}

#[test]
fn deleting_a_generator_removes_tile_wires_and_pseudonodes() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(2, 0));
    let l = l.connect_ports(SourcePort::gen(a, 0), TargetPort::gen(b, 0));

    let l = l.delete_generator(b);
    assert_eq!(l.hypergraph().edge_count(), 1);
    assert_eq!(l.hypergraph().wire_count(), 0);
    assert_eq!(l.positions().len(), 1);
    assert_eq!(l.positions()[&Tile::Edge(a)], V2::new(1, 0));
}

#[test]
fn insert_layer_stretches_crossing_wires() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(f(), V2::new(0, 0));
    let (b, l) = l.place_generator(f(), V2::new(1, 0));
    let l = l.connect_ports(SourcePort::gen(a, 0), TargetPort::gen(b, 0));

    let stretched = l.insert_layer(1, 2);
    assert_eq!(
        stretched.positions()[&Tile::Edge(b)],
        V2::new(4, 0) // interior 3, public 4
    );
    let pseudo_count = stretched
        .positions()
        .keys()
        .filter(|t| matches!(t, Tile::Pseudo(_)))
        .count();
    assert_eq!(pseudo_count, 2);

    // tidying deletes the pseudonode-only columns again
    let tidy = stretched.remove_pseudonode_only_layers();
    assert_eq!(tidy.positions()[&Tile::Edge(b)], V2::new(2, 0));
    assert!(tidy
        .positions()
        .keys()
        .all(|t| matches!(t, Tile::Edge(_))));
}

#[test]
fn lookup_reports_boundaries_and_generator_ports() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(op('m', 2, 1), V2::new(0, 0));

    // interior width is 1, so public width is 3
    assert_eq!(l.dimensions().x, 3);
    assert_eq!(l.lookup(V2::new(0, 4)), (None, Some(SourcePort::boundary(4))));
    assert_eq!(l.lookup(V2::new(2, 1)), (Some(TargetPort::boundary(1)), None));

    // generator cell at row 0: input 0 and output 0 share the cell
    assert_eq!(
        l.lookup(V2::new(1, 0)),
        (Some(TargetPort::gen(a, 0)), Some(SourcePort::gen(a, 0)))
    );
    // row 1: only input 1
    assert_eq!(l.lookup(V2::new(1, 1)), (Some(TargetPort::gen(a, 1)), None));
}

#[test]
fn port_positions_follow_tiles_and_offsets() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(op('m', 2, 1), V2::new(1, 2));

    assert_eq!(
        l.port_position(SourcePort::boundary(3)),
        Some(V2::new(0, 3))
    );
    assert_eq!(
        l.port_position(TargetPort::gen(a, 1)),
        Some(V2::new(2, 3))
    );
    assert_eq!(
        l.port_position(SourcePort::gen(a, 0)),
        Some(V2::new(2, 2))
    );
    assert_eq!(l.port_position(SourcePort::gen(a, 7)), None);
}

#[test]
fn placement_shifts_overlapping_tiles_down() {
    let l = Layout::empty();
    let (a, l) = l.place_generator(op('m', 2, 1), V2::new(0, 0)); // height 2
    let (b, l) = l.place_generator(f(), V2::new(0, 0));

    assert_eq!(l.positions()[&Tile::Edge(b)], V2::new(1, 0));
    assert_eq!(l.positions()[&Tile::Edge(a)], V2::new(1, 1));
    assert_eq!(l.dimensions().y, 3);
}

proptest! {
    /// Laying out any composite diagram places every generator, keeps wires
    /// flowing left to right, and gives each wire exactly
    /// `max(0, x(t) - x(s) - 1)` pseudonodes.
    #[test]
    fn layouts_respect_flow_and_pseudonode_counts(g in arb_diagram()) {
        let l = Layout::from_hypergraph(g.clone()).expect("composites are acyclic");
        let positions = l.positions();

        let column = |owner: PortOwner, fallback: i64| -> i64 {
            match owner {
                PortOwner::Boundary => fallback,
                PortOwner::Gen(e) => positions[&Tile::Edge(e)].x as i64,
            }
        };

        let width = l.dimensions().x as i64;
        for (s, t) in g.wires() {
            let sx = column(s.owner, 0);
            let tx = column(t.owner, width - 1);
            assert!(sx < tx, "wires must flow left to right");

            let expected = (tx - sx - 1).max(0) as usize;
            let actual = positions
                .keys()
                .filter(|tile| matches!(tile, Tile::Pseudo(p) if p.source == s && p.target == t))
                .count();
            assert_eq!(actual, expected);
        }
    }
}
