//! Geometric transforms of a whole reconstruction.
//!
//! Image calibration maps traced pixel coordinates to stage coordinates.
//! This module builds these maps from [Image](crate::model::Image) metadata
//! and applies any point mapping to every point of a
//! [NeuronData](crate::model::NeuronData):
//! * [`compose_calibration`] - calibration of one image
//! * [`apply`] / [`apply_affine`] - map all points
//! * [`apply_calibration`] - bake the file's own calibration into its points
//! * [`to_space`] - align one file to another file's calibrated space
//! * [`make_start_marker`] - reduce a file to a start marker
//!
//! All operations take a `flip_z` flag where relevant, negating the
//! z-spacing for stacks imaged upside down.

pub mod affine;
mod pipeline;

pub use self::affine::Affine;
pub use self::pipeline::{
    TransformError, apply, apply_affine, apply_calibration, calibration_of, compose_calibration,
    make_start_marker, to_space, to_space_transform,
};
