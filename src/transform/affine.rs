//! Affine transforms of 3D points in homogeneous coordinates.

use glam::{DMat4, DVec3};
use std::ops::Mul;

/// An affine map of 3D space, stored as a 4×4 homogeneous matrix.
///
/// Composition follows matrix multiplication: `a * b` applies `b` first,
/// then `a`; [Affine::then] reads in application order.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use nlxml::transform::Affine;
///
/// let move_then_double = Affine::translation(DVec3::X).then(Affine::scale(DVec3::splat(2.0)));
/// assert_eq!(move_then_double.transform_point(DVec3::ZERO), DVec3::new(2.0, 0.0, 0.0));
///
/// let back = move_then_double.inverse().unwrap();
/// assert_eq!(back.transform_point(DVec3::new(2.0, 0.0, 0.0)), DVec3::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(DMat4);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The map sending every point onto itself.
    pub const IDENTITY: Affine = Affine(DMat4::IDENTITY);

    /// Wraps a homogeneous matrix.
    pub fn from_mat4(matrix: DMat4) -> Self {
        Self(matrix)
    }

    /// Returns the homogeneous matrix.
    pub fn matrix(&self) -> DMat4 {
        self.0
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self(DMat4::from_translation(offset))
    }

    /// Axis-aligned scaling by `factors`.
    pub fn scale(factors: DVec3) -> Self {
        Self(DMat4::from_scale(factors))
    }

    /// Returns the map applying `self` first, then `next`.
    pub fn then(self, next: Affine) -> Affine {
        next * self
    }

    /// Returns the inverse map, or `None` if this map is singular (or not finite).
    pub fn inverse(&self) -> Option<Affine> {
        let det = self.0.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Maps a point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.0.transform_point3(point)
    }
}

impl Mul for Affine {
    type Output = Affine;

    /// Composition: `rhs` is applied first.
    fn mul(self, rhs: Affine) -> Affine {
        Affine(self.0 * rhs.0)
    }
}
