//! Calibration transforms and their application to a whole [NeuronData].

use crate::model::{Branch, Color, Image, Marker, NeuronData, Point};
use crate::transform::affine::Affine;
use glam::DVec3;
use log::debug;

/// Glyph of the marker created by [make_start_marker]
const START_MARKER_KIND: &str = "FilledCircle";
/// Name of the marker created by [make_start_marker]
const START_MARKER_NAME: &str = "Start";

/// Errors of the transform pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The data carries no image calibration to apply.
    #[error("No image calibration found")]
    MissingCalibration,
    /// A calibration cannot be inverted (e.g. zero scale).
    #[error("Calibration transform is not invertible")]
    SingularTransform,
    /// There is no tree point to place a start marker at.
    #[error("No tree point to place the start marker at")]
    MissingStartPoint,
}

// =#========================================================================#=
// CALIBRATION
// =#========================================================================#=
/// Returns the map from image (pixel) space to stage space of `image`:
/// `Translate(coord) · Scale(scale.x, scale.y, z_spacing · sign)`, where
/// `sign` is `-1` if `flip_z` is set and `+1` otherwise.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
/// use nlxml::model::Image;
/// use nlxml::transform::compose_calibration;
///
/// let image = Image {
///     scale: DVec2::new(0.5, 0.5),
///     coord: DVec3::new(10.0, 20.0, 0.0),
///     z_spacing: 2.0,
///     ..Default::default()
/// };
/// let p = compose_calibration(&image, true).transform_point(DVec3::new(2.0, 4.0, 1.0));
/// assert_eq!(p, DVec3::new(11.0, 22.0, -2.0));
/// ```
pub fn compose_calibration(image: &Image, flip_z: bool) -> Affine {
    let sign = if flip_z { -1.0 } else { 1.0 };
    let scale = DVec3::new(image.scale.x, image.scale.y, image.z_spacing * sign);
    Affine::translation(image.coord) * Affine::scale(scale)
}

/// Returns the calibration of the first image of `data`, or `None` without images.
pub fn calibration_of(data: &NeuronData, flip_z: bool) -> Option<Affine> {
    data.images
        .first()
        .map(|image| compose_calibration(image, flip_z))
}

// =#========================================================================#=
// APPLICATION
// =#========================================================================#=
/// Maps `f` over the position of every point in `data`: tree and branch
/// points at any depth, markers at every level (file, contour, tree, branch)
/// and contour points. Diameters are left untouched.
///
/// Branches are visited with an explicit stack.
pub fn apply<F: FnMut(DVec3) -> DVec3>(data: &mut NeuronData, mut f: F) {
    for marker in &mut data.markers {
        map_points(&mut marker.points, &mut f);
    }
    for contour in &mut data.contours {
        map_points(&mut contour.points, &mut f);
        map_markers(&mut contour.markers, &mut f);
    }
    for tree in &mut data.trees {
        let mut stack: Vec<&mut Branch> = vec![&mut tree.root];
        while let Some(branch) = stack.pop() {
            map_points(&mut branch.points, &mut f);
            map_markers(&mut branch.markers, &mut f);
            stack.extend(branch.children.iter_mut());
        }
    }
}

fn map_points<F: FnMut(DVec3) -> DVec3>(points: &mut [Point], f: &mut F) {
    for point in points {
        *point = point.with_position(f(point.position()));
    }
}

fn map_markers<F: FnMut(DVec3) -> DVec3>(markers: &mut [Marker], f: &mut F) {
    for marker in markers {
        map_points(&mut marker.points, f);
    }
}

/// Applies `transform` to every point in `data`, see [apply].
pub fn apply_affine(data: &mut NeuronData, transform: &Affine) {
    apply(data, |p| transform.transform_point(p));
}

/// Applies the calibration of the first image to all points, then resets
/// that image to the identity calibration (coordinate 0, scale 1,
/// z-spacing 1) so it is not applied twice.
///
/// # Errors
/// Returns [TransformError::MissingCalibration] if `data` has no image.
pub fn apply_calibration(data: &mut NeuronData, flip_z: bool) -> Result<(), TransformError> {
    let calibration = calibration_of(data, flip_z).ok_or(TransformError::MissingCalibration)?;
    apply_affine(data, &calibration);
    if let Some(image) = data.images.first_mut() {
        image.reset_calibration();
    }
    debug!("Applied image calibration to {} trees", data.trees.len());
    Ok(())
}

/// Maps `source` into the calibrated space of `target`.
///
/// The transform is `inverse(cal(target)) · cal(source)`, where `cal` is the
/// calibration of the first image and a file without images has the identity
/// calibration. Afterwards `source` adopts the images of `target`.
///
/// A source with images is taken to be in the pixel space of its own first
/// image, so its calibration is applied before mapping into `target`. Only a
/// source without images is taken to be in identity space already. Tools that
/// ignore the source calibration and apply only the inverse of the target
/// produce different coordinates for calibrated sources.
///
/// # Errors
/// Returns [TransformError::SingularTransform] if the target calibration
/// cannot be inverted; `source` is unchanged in that case.
pub fn to_space(
    source: &mut NeuronData,
    target: &NeuronData,
    flip_z: bool,
) -> Result<(), TransformError> {
    let transform = to_space_transform(source, target, flip_z)?;
    apply_affine(source, &transform);
    source.images = target.images.clone();
    Ok(())
}

/// Returns the transform used by [to_space] without applying it.
///
/// The calibration of a source with images is part of the result, since the
/// source is treated as pixel space; see [to_space].
pub fn to_space_transform(
    source: &NeuronData,
    target: &NeuronData,
    flip_z: bool,
) -> Result<Affine, TransformError> {
    let from = calibration_of(source, flip_z).unwrap_or_default();
    let to = calibration_of(target, flip_z).unwrap_or_default();
    let back = to.inverse().ok_or(TransformError::SingularTransform)?;
    Ok(back * from)
}

/// Replaces the content of `data` by a single white `FilledCircle` marker
/// named `Start`, placed at the first point of the first tree.
///
/// Trees, contours, markers and images are all removed.
///
/// # Errors
/// Returns [TransformError::MissingStartPoint] if the first tree has no
/// point, or there is no tree; `data` is unchanged in that case.
pub fn make_start_marker(data: &mut NeuronData) -> Result<(), TransformError> {
    let start = data
        .trees
        .first()
        .and_then(|tree| tree.root.points.first())
        .copied()
        .ok_or(TransformError::MissingStartPoint)?;

    *data = NeuronData::new();
    data.markers.push(
        Marker::new(START_MARKER_KIND, START_MARKER_NAME, Color::WHITE).with_points(vec![start]),
    );
    Ok(())
}
