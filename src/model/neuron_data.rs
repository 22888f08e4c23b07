//! The root aggregate: the entire content of one morphology file.

use crate::model::contour::Contour;
use crate::model::image::Image;
use crate::model::marker::Marker;
use crate::model::tree::Tree;

/// Everything read from (or written to) one morphology file.
///
/// Each decode or reconstruct call produces a fresh `NeuronData`; it only
/// changes through the explicit [simplify](crate::simplify) and
/// [transform](crate::transform) passes a caller applies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeuronData {
    /// Calibration of the underlying image stacks
    pub images: Vec<Image>,
    pub trees: Vec<Tree>,
    pub contours: Vec<Contour>,
    /// Markers placed at file level
    pub markers: Vec<Marker>,
}

impl NeuronData {
    /// Creates an empty `NeuronData`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether there are no trees, contours or markers.
    ///
    /// Images are not content and are ignored.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty() && self.contours.is_empty() && self.markers.is_empty()
    }

    /// Returns the number of points in all trees.
    pub fn num_tree_points(&self) -> usize {
        self.trees.iter().map(Tree::num_points).sum()
    }

    /// Returns the number of markers at any level: file, contours and trees.
    pub fn num_markers(&self) -> usize {
        self.markers.len()
            + self.contours.iter().map(|c| c.markers.len()).sum::<usize>()
            + self.trees.iter().map(Tree::num_markers).sum::<usize>()
    }
}
