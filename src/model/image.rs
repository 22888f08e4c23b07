//! Image calibration metadata.

use glam::{DVec2, DVec3};

/// Calibration of the image stack a reconstruction was traced on.
///
/// This is metadata, not geometry: it is consumed only by the
/// [transform](crate::transform) pipeline to map traced coordinates between
/// pixel and stage space.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image file names, in stack order
    pub filenames: Vec<String>,
    /// Pixel size in x and y
    pub scale: DVec2,
    /// Stage position of the stack origin
    pub coord: DVec3,
    /// Distance between two slices
    pub z_spacing: f64,
    /// Number of slices
    pub slices: usize,
}

impl Image {
    /// Returns whether this calibration maps every point onto itself.
    pub fn is_identity(&self) -> bool {
        self.scale == DVec2::ONE && self.coord == DVec3::ZERO && self.z_spacing == 1.0
    }

    /// Resets scale, coordinate and z-spacing to the identity calibration,
    /// keeping file names and slice count.
    pub fn reset_calibration(&mut self) {
        self.scale = DVec2::ONE;
        self.coord = DVec3::ZERO;
        self.z_spacing = 1.0;
    }
}

impl Default for Image {
    /// The identity calibration without files.
    fn default() -> Self {
        Self {
            filenames: Vec::new(),
            scale: DVec2::ONE,
            coord: DVec3::ZERO,
            z_spacing: 1.0,
            slices: 0,
        }
    }
}
