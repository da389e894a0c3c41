use monogram::hypergraph::Hypergraph;
use monogram::matching::MatchState;
use monogram::rewrite::{Rule, RuleError};

use crate::hypergraph::strategy::arb_diagram;
use crate::theory::*;

use proptest::proptest;

#[test]
fn mismatched_boundary_widths_are_rejected() {
    let lhs = Hypergraph::singleton(f());
    let rhs = Hypergraph::singleton(op('d', 1, 2));
    assert_eq!(
        Rule::new(lhs, rhs),
        Err(RuleError::BoundaryMismatch {
            lhs: (1, 1),
            rhs: (1, 2),
        })
    );
}

#[test]
fn rewriting_a_chain_replaces_one_generator_at_a_time() {
    // rule f ⇒ g on host f → f: first application gives g → f, the second
    // g → g.
    let fx = Hypergraph::singleton(f());
    let gx = Hypergraph::singleton(g());
    let rule = Rule::new(fx.clone(), gx.clone()).unwrap();
    let host = fx.compose(&fx);

    let m = host.find_matches(rule.lhs()).next().unwrap();
    let (once, _) = host.rewrite(&rule, &m);
    assert!(once.is_isomorphic(&gx.compose(&fx)));

    let m = once.find_matches(rule.lhs()).next().unwrap();
    let (twice, _) = once.rewrite(&rule, &m);
    assert!(twice.is_isomorphic(&gx.compose(&gx)));

    // nothing left to rewrite
    assert_eq!(twice.find_matches(rule.lhs()).count(), 0);
}

#[test]
fn the_witness_locates_the_embedded_right_hand_side() {
    let fx = Hypergraph::singleton(f());
    let gx = Hypergraph::singleton(g());
    let rule = Rule::new(fx.clone(), gx.clone()).unwrap();
    let host = fx.compose(&fx);

    let m = host.find_matches(rule.lhs()).next().unwrap();
    let (rewritten, witness) = host.rewrite(&rule, &m);

    // the witness is one of the matches the matcher itself would find
    let found: Vec<MatchState> = rewritten.find_matches(rule.rhs()).collect();
    assert!(found.contains(&witness));
}

#[test]
fn a_rule_can_grow_the_diagram() {
    // f ⇒ f → f doubles the generator at the match site.
    let fx = Hypergraph::singleton(f());
    let rule = Rule::new(fx.clone(), fx.compose(&fx)).unwrap();

    let m = fx.find_matches(rule.lhs()).next().unwrap();
    let (grown, _) = fx.rewrite(&rule, &m);
    assert!(grown.is_isomorphic(&fx.compose(&fx)));

    let m = grown.find_matches(rule.lhs()).next().unwrap();
    let (grown_again, _) = grown.rewrite(&rule, &m);
    assert_eq!(grown_again.edge_count(), 3);
    assert!(grown_again.is_isomorphic(&fx.compose(&fx).compose(&fx)));
}

#[test]
fn a_rule_can_erase_to_an_identity_wire() {
    // f ⇒ identity deletes the generator and heals the wire through it.
    let fx = Hypergraph::singleton(f());
    let rule = Rule::new(fx.clone(), Hypergraph::identity()).unwrap();
    let host = fx.compose(&fx);

    let m = host.find_matches(rule.lhs()).next().unwrap();
    let (healed, _) = host.rewrite(&rule, &m);
    assert!(healed.is_isomorphic(&fx));
}

proptest! {
    /// Applying f ⇒ g and then g ⇒ f at the witness restores the original
    /// diagram up to edge renaming.
    #[test]
    fn rewrite_then_inverse_is_the_identity(host in arb_diagram()) {
        let fx = Hypergraph::singleton(monogram::signature::Arity::new(1, 1));
        let rule = Rule::new(fx.clone(), fx).unwrap();

        for m in host.find_matches(rule.lhs()) {
            let (rewritten, witness) = host.rewrite(&rule, &m);
            let (restored, _) = rewritten.rewrite(&rule.inverse(), &witness);
            assert!(restored.is_isomorphic(&host));
        }
    }
}
