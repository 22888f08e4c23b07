//! Format-neutral data model of a neuron morphology reconstruction.
//!
//! A file is represented by [NeuronData], holding:
//! - [Image]s: calibration metadata of the traced image stacks
//! - [Tree]s: traced neurites, each a root [Branch] recursively owning its children
//! - [Contour]s: outlines such as cell bodies
//! - [Marker]s: point glyphs at file level (markers also attach to trees,
//!   branches and contours)
//!
//! Branches own their children exclusively, so every tree is acyclic by
//! construction. Traversals use explicit stacks, see [PreOrderIter].

/// Points and colors
pub mod geometry;
/// Point markers
pub mod marker;
/// Recursive branches and leaf kinds
pub mod branch;
/// Trees and neuron types
pub mod tree;
/// Contours
pub mod contour;
/// Image calibration
pub mod image;
/// Root aggregate of one file
pub mod neuron_data;

pub use branch::{Branch, LeafKind, PreOrderIter};
pub use contour::Contour;
pub use geometry::{Color, Point};
pub use image::Image;
pub use marker::Marker;
pub use neuron_data::NeuronData;
pub use tree::{NeuronType, Tree};
