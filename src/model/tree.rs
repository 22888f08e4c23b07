//! Tree module: a traced neurite with its display metadata.

use crate::model::branch::{Branch, PreOrderIter};
use crate::model::geometry::Color;
use std::fmt;

// =#========================================================================#=
// NEURON TYPE
// =#========================================================================#=
/// Kind of neurite a [Tree] traces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NeuronType {
    #[default]
    Axon,
    Dendrite,
    ApicalDendrite,
    /// Value outside the documented set, preserved verbatim.
    Other(String),
}

impl NeuronType {
    /// Maps the name used in files to a [NeuronType].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Axon" => NeuronType::Axon,
            "Dendrite" => NeuronType::Dendrite,
            "Apical Dendrite" | "ApicalDendrite" => NeuronType::ApicalDendrite,
            other => NeuronType::Other(other.to_string()),
        }
    }

    /// Returns the name used in files for this [NeuronType].
    pub fn as_str(&self) -> &str {
        match self {
            NeuronType::Axon => "Axon",
            NeuronType::Dendrite => "Dendrite",
            NeuronType::ApicalDendrite => "Apical Dendrite",
            NeuronType::Other(name) => name,
        }
    }
}

impl fmt::Display for NeuronType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A traced neurite: a distinguished root [Branch] plus color and neuron type.
///
/// The root branch carries the tree's leaf kind, its own points, markers and
/// the child branches; everything below is reached through it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    /// Display color
    pub color: Color,
    /// Neurite kind
    pub neuron_type: NeuronType,
    /// Root branch
    pub root: Branch,
}

impl Tree {
    /// Creates a new tree with an empty root branch.
    pub fn new(neuron_type: NeuronType, color: Color) -> Self {
        Self {
            color,
            neuron_type,
            root: Branch::default(),
        }
    }

    /// Sets the root branch of this tree.
    pub fn with_root(mut self, root: Branch) -> Self {
        self.root = root;
        self
    }

    /// Returns the total number of points in this tree.
    pub fn num_points(&self) -> usize {
        self.root.num_points()
    }

    /// Returns the total number of markers attached anywhere in this tree.
    pub fn num_markers(&self) -> usize {
        self.root.num_markers()
    }

    /// Returns an iterator over all branches of this tree in pre-order,
    /// starting with the root branch.
    pub fn branches(&self) -> PreOrderIter<'_> {
        self.root.pre_order_iter()
    }
}
