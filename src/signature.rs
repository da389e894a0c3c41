//! Generator signatures.

use core::fmt::Debug;

/// The type tag of a generator: how many input (target) and output (source)
/// ports it has, and where those ports sit vertically on its tile.
///
/// The core imposes only decidable equality and a total order on signatures;
/// anything else a theory attaches to its generators is opaque here. The
/// layout hooks have sensible defaults: input `i` at y-offset `i`, output `j`
/// at y-offset `j`, tile height covering all ports.
pub trait Signature: Clone + Ord + Debug {
    /// Number of input (target) ports.
    fn inputs(&self) -> usize;

    /// Number of output (source) ports.
    fn outputs(&self) -> usize;

    /// y-offsets of the input ports within the generator's tile.
    fn input_offsets(&self) -> Vec<usize> {
        (0..self.inputs()).collect()
    }

    /// y-offsets of the output ports within the generator's tile.
    fn output_offsets(&self) -> Vec<usize> {
        (0..self.outputs()).collect()
    }

    /// Tile height on the grid. At least 1, and tall enough for every port.
    fn height(&self) -> usize {
        self.input_offsets()
            .into_iter()
            .chain(self.output_offsets())
            .max()
            .map_or(1, |m| m + 1)
            .max(1)
    }
}

/// The minimal signature: a bare `(inputs, outputs)` arity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arity {
    pub inputs: usize,
    pub outputs: usize,
}

impl Arity {
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Arity { inputs, outputs }
    }
}

impl Signature for Arity {
    fn inputs(&self) -> usize {
        self.inputs
    }

    fn outputs(&self) -> usize {
        self.outputs
    }
}
