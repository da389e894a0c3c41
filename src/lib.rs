//! # Monogram
//!
//! A library for editing and rewriting the string diagrams of symmetric
//! monoidal categories, represented as directed *monogamous open
//! hypergraphs*: generators with ordered ports, and wires each using a port
//! at most once. In a laid-out diagram, wires run from the left boundary
//! rightward, one grid column at a time:
//!
//! ```text
//!  left      column 0        column 1       column 2      right
//!   0 ───────┤       ├── 0 ─────●──────────┤       │
//!            │  dup  │                     │  and  ├────── 0
//!            │ 1 → 2 ├── 1 ─────●──────────┤ 2 → 1 │
//! ```
//!
//! `dup`'s source ports 0 and 1 feed `and`'s target ports 0 and 1; each `●`
//! is a pseudonode carrying a wire across the column it would otherwise
//! skip.
//!
//! Diagrams are first-class values: they compose in parallel
//! ([`Hypergraph::tensor`], also `&a | &b`) and in sequence
//! ([`Hypergraph::compose`], also `&a >> &b`), patterns can be matched
//! inside hosts ([`Hypergraph::find_matches`]), matched sites rewritten
//! double-pushout style ([`Hypergraph::rewrite`]), and whole diagrams laid
//! out on an integer grid for rendering and interactive editing
//! ([`layout::Layout`]).
//!
//! [`Hypergraph::tensor`]: hypergraph::Hypergraph::tensor
//! [`Hypergraph::compose`]: hypergraph::Hypergraph::compose
//! [`Hypergraph::find_matches`]: hypergraph::Hypergraph::find_matches
//! [`Hypergraph::rewrite`]: hypergraph::Hypergraph::rewrite

pub mod bimap;
pub mod equivalence;
pub mod grid;
pub mod port;
pub mod signature;

pub mod hypergraph;

pub mod layer;
pub mod matching;
pub mod rewrite;
pub mod traverse;

pub mod layout;
