//! Ports and port ownership.
//!
//! A wire always flows from a [`SourcePort`] (its tail) to a [`TargetPort`]
//! (its head). The role is carried in the type, so source ports can only ever
//! appear as keys of a connection map and target ports as values. Boundary
//! ports order before generator ports, and generator ports order by edge id
//! then port index, which makes iteration over sorted port collections
//! deterministic.

use core::fmt::Debug;

/// Identifier of a hyperedge, locally unique within a single hypergraph.
///
/// Identifiers are allocated in ascending order and never reused within a
/// hypergraph's lifetime, even after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperEdgeId(pub usize);

/// The role of a port, relative to the wire using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortRole {
    Source,
    Target,
}

/// What a port belongs to: the outer boundary, or a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortOwner {
    Boundary,
    Gen(HyperEdgeId),
}

/// The tail end of a wire: an output of a generator, or a left-boundary port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePort {
    pub owner: PortOwner,
    pub index: usize,
}

/// The head end of a wire: an input of a generator, or a right-boundary port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetPort {
    pub owner: PortOwner,
    pub index: usize,
}

impl SourcePort {
    pub fn boundary(index: usize) -> Self {
        SourcePort {
            owner: PortOwner::Boundary,
            index,
        }
    }

    pub fn gen(edge: HyperEdgeId, index: usize) -> Self {
        SourcePort {
            owner: PortOwner::Gen(edge),
            index,
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.owner == PortOwner::Boundary
    }
}

impl TargetPort {
    pub fn boundary(index: usize) -> Self {
        TargetPort {
            owner: PortOwner::Boundary,
            index,
        }
    }

    pub fn gen(edge: HyperEdgeId, index: usize) -> Self {
        TargetPort {
            owner: PortOwner::Gen(edge),
            index,
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.owner == PortOwner::Boundary
    }
}

/// A wire from a source port to a target port.
pub type Wire = (SourcePort, TargetPort);

/// A role-erased port, for contexts (grid lookup, rendering) that handle both
/// roles uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    pub role: PortRole,
    pub owner: PortOwner,
    pub index: usize,
}

impl From<SourcePort> for Port {
    fn from(p: SourcePort) -> Self {
        Port {
            role: PortRole::Source,
            owner: p.owner,
            index: p.index,
        }
    }
}

impl From<TargetPort> for Port {
    fn from(p: TargetPort) -> Self {
        Port {
            role: PortRole::Target,
            owner: p.owner,
            index: p.index,
        }
    }
}
