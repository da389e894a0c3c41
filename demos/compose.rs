//! Build a small diagram algebraically, rewrite it, and lay it out.
//!
//! The theory has three generators: `dup : 1 → 2`, `not : 1 → 1` and
//! `and : 2 → 1`. We build `dup → (not ⊗ not) → and`, replace the first
//! `not` with a bare wire using a rewrite rule, and print the resulting
//! grid layout.

use monogram::hypergraph::Hypergraph;
use monogram::layout::{Layout, Tile};
use monogram::rewrite::Rule;
use monogram::signature::Signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Gate {
    Dup,
    Not,
    And,
}

impl Signature for Gate {
    fn inputs(&self) -> usize {
        match self {
            Gate::Dup | Gate::Not => 1,
            Gate::And => 2,
        }
    }

    fn outputs(&self) -> usize {
        match self {
            Gate::Dup => 2,
            Gate::Not | Gate::And => 1,
        }
    }
}

fn main() {
    let dup = Hypergraph::singleton(Gate::Dup);
    let not = Hypergraph::singleton(Gate::Not);
    let and = Hypergraph::singleton(Gate::And);

    // dup → (not ⊗ not) → and : feed a value to both inputs of `and`,
    // negated on each branch.
    let circuit = &(&dup >> &(&not | &not)) >> &and;
    println!("circuit: size {:?}, {} generators, {} wires", circuit.size(), circuit.edge_count(), circuit.wire_count());

    // not ⇒ identity, applied at the first occurrence
    let simplify = Rule::new(not.clone(), Hypergraph::identity()).expect("widths match");
    let m = circuit
        .find_matches(simplify.lhs())
        .next()
        .expect("a not gate to rewrite");
    let (simpler, _) = circuit.rewrite(&simplify, &m);
    println!("rewritten: {} generators, {} wires", simpler.edge_count(), simpler.wire_count());

    let layout = Layout::from_hypergraph(simpler).expect("circuit is acyclic");
    println!("layout: dimensions {:?}", layout.dimensions());
    for (tile, pos) in layout.positions() {
        match tile {
            Tile::Edge(e) => {
                let sig = layout.hypergraph().signature(e).expect("placed generator");
                println!("  ({}, {})  {:?}", pos.x, pos.y, sig);
            }
            Tile::Pseudo(_) => println!("  ({}, {})  bend", pos.x, pos.y),
        }
    }
}
