//! Subgraph matching: embeddings of a pattern hypergraph into a host.
//!
//! An embedding maps pattern edges to host edges of the same signature,
//! injectively, with ports corresponding in order and every pattern wire
//! carried onto a host wire. Pattern boundary ports may land on host boundary
//! ports or on host generator ports of the same role, but never two on the
//! same host port.
//!
//! The search is a backtracking walk over the pattern's source ports in
//! breadth-first order, driven lazily: [`Matches`] is an iterator holding an
//! explicit stack of search frames, so callers can stop after the first
//! match, and dropping it releases the search state. Candidates are tried in
//! ascending host order, making enumeration deterministic.

use crate::bimap::BiMap;
use crate::equivalence::Equivalence;
use crate::hypergraph::Hypergraph;
use crate::port::{HyperEdgeId, PortOwner, SourcePort, TargetPort, Wire};
use crate::signature::Signature;

/// A witness of a pattern embedding into a host.
///
/// The three maps are bijections between pattern and host elements; the wire
/// correspondence is implied and recoverable through [`MatchState::wires`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) edges: BiMap<HyperEdgeId, HyperEdgeId>,
    pub(crate) ports_source: BiMap<SourcePort, SourcePort>,
    pub(crate) ports_target: BiMap<TargetPort, TargetPort>,
}

impl MatchState {
    pub(crate) fn new() -> Self {
        MatchState {
            edges: BiMap::new(),
            ports_source: BiMap::new(),
            ports_target: BiMap::new(),
        }
    }

    /// Pattern edge to host edge.
    pub fn edges(&self) -> &BiMap<HyperEdgeId, HyperEdgeId> {
        &self.edges
    }

    /// Pattern source ports to host source ports.
    pub fn ports_source(&self) -> &BiMap<SourcePort, SourcePort> {
        &self.ports_source
    }

    /// Pattern target ports to host target ports.
    pub fn ports_target(&self) -> &BiMap<TargetPort, TargetPort> {
        &self.ports_target
    }

    /// The host edge a pattern edge maps to.
    pub fn edge_image(&self, pattern_edge: HyperEdgeId) -> Option<HyperEdgeId> {
        self.edges.get(&pattern_edge).copied()
    }

    /// The wire correspondence implied by the port maps: each pattern wire
    /// paired with its host image.
    pub fn wires<'a, S: Signature>(
        &'a self,
        pattern: &'a Hypergraph<S>,
    ) -> impl Iterator<Item = (Wire, Wire)> + 'a {
        pattern.wires().filter_map(|(ps, pt)| {
            let hs = self.ports_source.get(&ps)?;
            let ht = self.ports_target.get(&pt)?;
            Some(((ps, pt), (*hs, *ht)))
        })
    }
}

/// Observer of match search events. All methods default to no-ops.
pub trait MatchTrace {
    fn on_event(&self, _event: MatchEvent) {}
}

/// A do-nothing trace.
pub struct NoopTrace;

impl MatchTrace for NoopTrace {}

static NOOP_TRACE: NoopTrace = NoopTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// Entering the search step at `depth` with `candidate_count` choices.
    Step { depth: usize, candidate_count: usize },
    /// Trying one candidate at `depth`.
    Branch { depth: usize },
    /// Abandoning a candidate.
    Prune {
        reason: &'static str,
        depth: usize,
    },
    /// A complete embedding was found.
    Solution,
}

impl<S: Signature> Hypergraph<S> {
    /// Lazily enumerate all embeddings of `pattern` into `self`, comparing
    /// signatures by equality.
    pub fn find_matches<'a>(&'a self, pattern: &'a Hypergraph<S>) -> Matches<'a, S, SigEq<S>> {
        self.find_matches_by(pattern, eq_signature::<S> as SigEq<S>, None)
    }

    /// Lazily enumerate all embeddings of `pattern` into `self`, comparing
    /// signatures with `sig_eq`. Signatures that compare equal must still
    /// agree on arity for a match to commit.
    pub fn find_matches_by<'a, F>(
        &'a self,
        pattern: &'a Hypergraph<S>,
        sig_eq: F,
        trace: Option<&'a dyn MatchTrace>,
    ) -> Matches<'a, S, F>
    where
        F: Fn(&S, &S) -> bool,
    {
        Matches::new(self, pattern, sig_eq, trace)
    }

    /// Whether `self` and `other` are equal modulo edge renaming: same
    /// boundary, and a signature- and wire-preserving bijection on edges.
    pub fn is_isomorphic(&self, other: &Self) -> bool {
        if self.size() != other.size()
            || self.edge_count() != other.edge_count()
            || self.wire_count() != other.wire_count()
        {
            return false;
        }
        // With equal counts, an embedding fixing every boundary port is a
        // bijection on edges and wires.
        self.find_matches(other).any(|m| {
            m.ports_source()
                .iter()
                .all(|(p, h)| !p.is_boundary() || p == h)
                && m.ports_target()
                    .iter()
                    .all(|(p, h)| !p.is_boundary() || p == h)
        })
    }
}

/// The default signature comparison.
pub type SigEq<S> = fn(&S, &S) -> bool;

fn eq_signature<S: PartialEq>(a: &S, b: &S) -> bool {
    a == b
}

/// One decision point of the search plan.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Choose the image of a pattern source port.
    Source(SourcePort),
    /// Ensure a pattern edge is matched (wireless, port-less edges only reach
    /// here unmatched).
    Edge(HyperEdgeId),
}

#[derive(Debug, Clone, Copy)]
enum Candidate {
    Port(SourcePort),
    Edge(HyperEdgeId),
    /// The step was already satisfied by earlier commitments.
    Skip,
}

/// Reverting one commitment made while applying a candidate.
#[derive(Debug, Clone, Copy)]
enum Undo {
    Edge(HyperEdgeId),
    Source(SourcePort),
    Target(TargetPort),
}

struct Frame {
    step: usize,
    candidates: Vec<Candidate>,
    next: usize,
    committed: Vec<Undo>,
}

/// Lazy iterator over all [`MatchState`]s of a pattern in a host.
pub struct Matches<'a, S: Signature, F> {
    host: &'a Hypergraph<S>,
    pattern: &'a Hypergraph<S>,
    sig_eq: F,
    trace: &'a dyn MatchTrace,
    plan: Vec<Step>,
    /// Host edges grouped by signature, for candidate enumeration.
    host_classes: Equivalence<HyperEdgeId, S>,
    stack: Vec<Frame>,
    state: MatchState,
    descend: bool,
    done: bool,
}

impl<'a, S: Signature, F: Fn(&S, &S) -> bool> Matches<'a, S, F> {
    fn new(
        host: &'a Hypergraph<S>,
        pattern: &'a Hypergraph<S>,
        sig_eq: F,
        trace: Option<&'a dyn MatchTrace>,
    ) -> Self {
        let mut plan: Vec<Step> = crate::traverse::bfs_source_ports(pattern)
            .into_iter()
            .map(Step::Source)
            .collect();
        // A final sweep guaranteeing every pattern edge is matched; for all
        // but isolated wireless edges this is a no-op.
        plan.extend(pattern.edges().map(|(e, _)| Step::Edge(e)));

        let mut host_classes = Equivalence::new();
        for (e, sig) in host.edges() {
            host_classes.insert(e, sig.clone());
        }

        Matches {
            host,
            pattern,
            sig_eq,
            trace: trace.unwrap_or(&NOOP_TRACE),
            plan,
            host_classes,
            stack: Vec::new(),
            state: MatchState::new(),
            descend: true,
            done: false,
        }
    }

    /// Host edges whose signature matches `sig` (and agrees on arity), in
    /// ascending id order.
    fn candidate_edges(&self, sig: &S) -> Vec<HyperEdgeId> {
        let mut out = Vec::new();
        for (class, members) in self.host_classes.classes() {
            if (self.sig_eq)(sig, class)
                && sig.inputs() == class.inputs()
                && sig.outputs() == class.outputs()
            {
                out.extend(members.iter().copied());
            }
        }
        out.sort();
        out
    }

    fn make_frame(&self, step_index: usize) -> Frame {
        let candidates = match self.plan[step_index] {
            Step::Source(p) => match p.owner {
                // All host wire tails; a pattern boundary source port exists
                // only by virtue of a wire, so its image must carry one too.
                PortOwner::Boundary => self.host.wires().map(|(s, _)| Candidate::Port(s)).collect(),
                PortOwner::Gen(pe) => match self.state.edges.get(&pe) {
                    Some(&he) => vec![Candidate::Port(SourcePort::gen(he, p.index))],
                    None => match self.pattern.signature(pe) {
                        Some(sig) => self
                            .candidate_edges(sig)
                            .into_iter()
                            .map(|he| Candidate::Port(SourcePort::gen(he, p.index)))
                            .collect(),
                        None => Vec::new(),
                    },
                },
            },
            Step::Edge(pe) => {
                if self.state.edges.contains_left(&pe) {
                    vec![Candidate::Skip]
                } else {
                    match self.pattern.signature(pe) {
                        Some(sig) => self
                            .candidate_edges(sig)
                            .into_iter()
                            .map(Candidate::Edge)
                            .collect(),
                        None => Vec::new(),
                    }
                }
            }
        };
        Frame {
            step: step_index,
            candidates,
            next: 0,
            committed: Vec::new(),
        }
    }
}

impl<S: Signature, F: Fn(&S, &S) -> bool> Iterator for Matches<'_, S, F> {
    type Item = MatchState;

    fn next(&mut self) -> Option<MatchState> {
        if self.done {
            return None;
        }
        loop {
            if self.descend {
                if self.stack.len() == self.plan.len() {
                    // Every step satisfied: emit, then resume by advancing
                    // the deepest frame.
                    self.descend = false;
                    self.trace.on_event(MatchEvent::Solution);
                    return Some(self.state.clone());
                }
                let frame = self.make_frame(self.stack.len());
                self.trace.on_event(MatchEvent::Step {
                    depth: frame.step,
                    candidate_count: frame.candidates.len(),
                });
                self.stack.push(frame);
                self.descend = false;
            }

            let Some(top) = self.stack.last_mut() else {
                self.done = true;
                return None;
            };

            // Roll back the candidate currently applied in this frame.
            for undo in top.committed.drain(..).rev() {
                match undo {
                    Undo::Edge(pe) => {
                        self.state.edges.remove_left(&pe);
                    }
                    Undo::Source(ps) => {
                        self.state.ports_source.remove_left(&ps);
                    }
                    Undo::Target(pt) => {
                        self.state.ports_target.remove_left(&pt);
                    }
                }
            }

            if top.next == top.candidates.len() {
                self.stack.pop();
                continue;
            }

            let candidate = top.candidates[top.next];
            top.next += 1;
            let depth = top.step;
            self.trace.on_event(MatchEvent::Branch { depth });
            let applied = apply_candidate(
                self.pattern,
                self.host,
                &self.sig_eq,
                &mut self.state,
                &mut top.committed,
                self.plan[depth],
                candidate,
            );
            match applied {
                Ok(()) => self.descend = true,
                // Partial commitments are rolled back at the top of the next
                // iteration, before the following candidate is applied.
                Err(reason) => self.trace.on_event(MatchEvent::Prune { reason, depth }),
            }
        }
    }
}

/// Try to commit `candidate` for `step`, recording every commitment in
/// `committed` so the caller can roll back. On failure some commitments may
/// remain in `committed`; the caller reverts them.
fn apply_candidate<S: Signature, F: Fn(&S, &S) -> bool>(
    pattern: &Hypergraph<S>,
    host: &Hypergraph<S>,
    sig_eq: &F,
    state: &mut MatchState,
    committed: &mut Vec<Undo>,
    step: Step,
    candidate: Candidate,
) -> Result<(), &'static str> {
    match (step, candidate) {
        (_, Candidate::Skip) => Ok(()),
        (Step::Edge(pe), Candidate::Edge(he)) => commit_edge(state, committed, pe, he),
        (Step::Source(ps), Candidate::Port(hs)) => {
            if let PortOwner::Gen(pe) = ps.owner {
                let PortOwner::Gen(he) = hs.owner else {
                    return Err("generator port maps to boundary");
                };
                match state.edges.get(&pe) {
                    Some(&mapped) => {
                        if mapped != he {
                            return Err("edge image conflict");
                        }
                    }
                    None => commit_edge(state, committed, pe, he)?,
                }
            }
            if state.ports_source.contains_right(&hs) {
                return Err("host source port already used");
            }
            debug_assert!(!state.ports_source.contains_left(&ps));
            state.ports_source.insert(ps, hs);
            committed.push(Undo::Source(ps));

            // Follow the wire out of `ps`, if the pattern has one.
            match pattern.target(&ps) {
                None => Ok(()),
                Some(pt) => match host.target(&hs) {
                    None => Err("host wire missing"),
                    Some(ht) => commit_target(pattern, host, sig_eq, state, committed, pt, ht),
                },
            }
        }
        _ => {
            debug_assert!(false, "candidate shape does not fit step");
            Err("candidate shape does not fit step")
        }
    }
}

fn commit_edge(
    state: &mut MatchState,
    committed: &mut Vec<Undo>,
    pe: HyperEdgeId,
    he: HyperEdgeId,
) -> Result<(), &'static str> {
    if state.edges.contains_right(&he) {
        return Err("host edge already used");
    }
    state.edges.insert(pe, he);
    committed.push(Undo::Edge(pe));
    Ok(())
}

fn commit_target<S: Signature, F: Fn(&S, &S) -> bool>(
    pattern: &Hypergraph<S>,
    host: &Hypergraph<S>,
    sig_eq: &F,
    state: &mut MatchState,
    committed: &mut Vec<Undo>,
    pt: TargetPort,
    ht: TargetPort,
) -> Result<(), &'static str> {
    if let Some(existing) = state.ports_target.get(&pt) {
        return if *existing == ht {
            Ok(())
        } else {
            Err("target image conflict")
        };
    }
    if state.ports_target.contains_right(&ht) {
        return Err("host target port already used");
    }
    if let PortOwner::Gen(pt_e) = pt.owner {
        let PortOwner::Gen(ht_e) = ht.owner else {
            return Err("generator port maps to boundary");
        };
        if pt.index != ht.index {
            return Err("port index mismatch");
        }
        match state.edges.get(&pt_e) {
            Some(&mapped) => {
                if mapped != ht_e {
                    return Err("edge image conflict");
                }
            }
            None => {
                let (Some(p_sig), Some(h_sig)) =
                    (pattern.signature(pt_e), host.signature(ht_e))
                else {
                    return Err("unknown edge");
                };
                if !sig_eq(p_sig, h_sig)
                    || p_sig.inputs() != h_sig.inputs()
                    || p_sig.outputs() != h_sig.outputs()
                {
                    return Err("signature mismatch");
                }
                commit_edge(state, committed, pt_e, ht_e)?;
            }
        }
    }
    state.ports_target.insert(pt, ht);
    committed.push(Undo::Target(pt));
    Ok(())
}
