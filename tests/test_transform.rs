use approx::assert_relative_eq;
use glam::{DVec2, DVec3};
use nlxml::model::{
    Branch, Color, Contour, Image, LeafKind, Marker, NeuronData, NeuronType, Point, Tree,
};
use nlxml::transform::{
    Affine, TransformError, apply, apply_affine, apply_calibration, compose_calibration,
    make_start_marker, to_space, to_space_transform,
};

fn image(scale: f64, coord: DVec3, z_spacing: f64) -> Image {
    Image {
        filenames: vec!["stack.tif".to_string()],
        scale: DVec2::splat(scale),
        coord,
        z_spacing,
        slices: 10,
    }
}

/// Collects every position in `data`, in a fixed order.
fn positions(data: &NeuronData) -> Vec<DVec3> {
    let mut all = Vec::new();
    for tree in &data.trees {
        for branch in tree.branches() {
            all.extend(branch.points.iter().map(Point::position));
            for marker in &branch.markers {
                all.extend(marker.points.iter().map(Point::position));
            }
        }
    }
    for contour in &data.contours {
        all.extend(contour.points.iter().map(Point::position));
        for marker in &contour.markers {
            all.extend(marker.points.iter().map(Point::position));
        }
    }
    for marker in &data.markers {
        all.extend(marker.points.iter().map(Point::position));
    }
    all
}

/// A point at every place a point can live.
fn sample_data() -> NeuronData {
    let p = |x: f64, y: f64, z: f64| Point::new(x, y, z, 0.5);
    let dot = |x: f64| Marker::new("Dot", "m", Color::RED).with_points(vec![p(x, 1.0, 1.0)]);

    let child = Branch::new(LeafKind::Normal)
        .with_points(vec![p(2.0, 2.0, 0.0)])
        .with_markers(vec![dot(2.5)]);
    let root = Branch::new(LeafKind::Normal)
        .with_points(vec![p(1.0, 1.0, 1.0), p(1.5, 1.0, 1.0)])
        .with_markers(vec![dot(1.0)])
        .with_children(vec![
            child,
            Branch::new(LeafKind::Low).with_points(vec![p(3.0, 0.0, -1.0)]),
        ]);

    let mut contour =
        Contour::new("Soma", Color::WHITE, true).with_points(vec![p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0)]);
    contour.markers.push(dot(0.5));

    let mut data = NeuronData::new();
    data.trees.push(Tree::new(NeuronType::Dendrite, Color::WHITE).with_root(root));
    data.contours.push(contour);
    data.markers.push(dot(-4.0));
    data
}

#[test]
fn test_compose_calibration() {
    let calibration = compose_calibration(&image(0.5, DVec3::new(10.0, 20.0, 30.0), 2.0), false);
    let p = calibration.transform_point(DVec3::new(4.0, 8.0, 1.0));
    assert_relative_eq!(p.x, 12.0);
    assert_relative_eq!(p.y, 24.0);
    assert_relative_eq!(p.z, 32.0);

    let flipped = compose_calibration(&image(0.5, DVec3::new(10.0, 20.0, 30.0), 2.0), true);
    assert_relative_eq!(flipped.transform_point(DVec3::new(4.0, 8.0, 1.0)).z, 28.0);
}

#[test]
fn test_apply_identity_is_noop() {
    let mut data = sample_data();
    let before = data.clone();
    apply(&mut data, |p| p);
    assert_eq!(data, before);
    apply_affine(&mut data, &Affine::IDENTITY);
    assert_eq!(data, before);
}

#[test]
fn test_apply_reaches_every_point() {
    let mut data = sample_data();
    let before = positions(&data);
    let mut visited = 0;
    apply(&mut data, |p| {
        visited += 1;
        p + DVec3::new(1.0, 0.0, 0.0)
    });

    assert_eq!(visited, before.len());
    for (moved, original) in positions(&data).iter().zip(&before) {
        assert_relative_eq!(moved.x, original.x + 1.0);
        assert_relative_eq!(moved.y, original.y);
    }
    // Diameters are untouched
    assert!(data.trees[0].branches().all(|b| b.points.iter().all(|p| p.diameter == 0.5)));
}

#[test]
fn test_apply_composes() {
    let shift = Affine::translation(DVec3::new(1.0, -2.0, 3.0));
    let calibration = compose_calibration(&image(0.5, DVec3::new(10.0, 20.0, 0.0), 2.0), true);

    // Order matters for these two
    assert_ne!(calibration * shift, shift * calibration);

    let mut twice = sample_data();
    apply_affine(&mut twice, &shift);
    apply_affine(&mut twice, &calibration);

    let mut product = sample_data();
    apply_affine(&mut product, &(calibration * shift));

    let mut chained = sample_data();
    apply_affine(&mut chained, &shift.then(calibration));

    let mut reversed = sample_data();
    apply_affine(&mut reversed, &(shift * calibration));

    let expected = positions(&twice);
    for once in [positions(&product), positions(&chained)] {
        assert_eq!(once.len(), expected.len());
        for (a, b) in once.iter().zip(&expected) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
        }
    }
    assert!(
        positions(&reversed)
            .iter()
            .zip(&expected)
            .any(|(a, b)| (*a - *b).length() > 1e-6)
    );
}

#[test]
fn test_apply_calibration_resets_image() {
    let mut data = sample_data();
    data.images.push(image(0.25, DVec3::new(100.0, 0.0, 0.0), 3.0));
    let before = positions(&data);

    apply_calibration(&mut data, false).unwrap();
    let after = positions(&data);
    assert_relative_eq!(after[0].x, before[0].x * 0.25 + 100.0);
    assert_relative_eq!(after[0].z, before[0].z * 3.0);
    assert!(data.images[0].is_identity());
    assert_eq!(data.images[0].slices, 10);
    assert_eq!(data.images[0].filenames, vec!["stack.tif".to_string()]);

    // Already calibrated: a second application changes nothing
    let calibrated = data.clone();
    apply_calibration(&mut data, false).unwrap();
    assert_eq!(data, calibrated);
}

#[test]
fn test_apply_calibration_without_image() {
    let mut data = sample_data();
    assert_eq!(
        apply_calibration(&mut data, false),
        Err(TransformError::MissingCalibration)
    );
}

#[test]
fn test_to_space_lands_in_target_calibration() {
    let source_image = image(0.5, DVec3::new(10.0, 0.0, 0.0), 2.0);
    let target_image = image(0.25, DVec3::new(-20.0, 4.0, 1.0), 1.0);

    let mut source = sample_data();
    source.images.push(source_image.clone());
    let mut target = NeuronData::new();
    target.images.push(target_image.clone());

    let before = positions(&source);
    to_space(&mut source, &target, false).unwrap();
    assert_eq!(source.images, target.images);

    // Calibrating both sides gives the same stage coordinates
    let source_cal = compose_calibration(&source_image, false);
    let target_cal = compose_calibration(&target_image, false);
    for (moved, original) in positions(&source).iter().zip(&before) {
        let expected = source_cal.transform_point(*original);
        let actual = target_cal.transform_point(*moved);
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-9);
    }
}

#[test]
fn test_to_space_without_images_is_identity() {
    let transform = to_space_transform(&NeuronData::new(), &NeuronData::new(), true).unwrap();
    let p = DVec3::new(1.0, 2.0, 3.0);
    assert_relative_eq!(transform.transform_point(p).z, 3.0);
}

#[test]
fn test_to_space_applies_source_calibration() {
    let mut target = NeuronData::new();
    target.images.push(image(0.25, DVec3::new(-20.0, 4.0, 1.0), 1.0));
    let mut calibrated = NeuronData::new();
    calibrated.images.push(image(0.5, DVec3::new(10.0, 0.0, 0.0), 2.0));

    let p = DVec3::new(4.0, 8.0, 1.0);
    let target_only = compose_calibration(&target.images[0], false).inverse().unwrap();

    let plain = to_space_transform(&NeuronData::new(), &target, false).unwrap();
    assert_eq!(plain, target_only);

    let pixel = to_space_transform(&calibrated, &target, false).unwrap();
    let expected = target_only.transform_point(DVec3::new(12.0, 4.0, 2.0));
    let actual = pixel.transform_point(p);
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
    assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-9);
    assert!((actual - target_only.transform_point(p)).length() > 1.0);
}

#[test]
fn test_to_space_singular_target() {
    let mut target = NeuronData::new();
    target.images.push(image(0.0, DVec3::ZERO, 1.0));
    let mut source = sample_data();
    let before = source.clone();

    assert_eq!(
        to_space(&mut source, &target, false),
        Err(TransformError::SingularTransform)
    );
    assert_eq!(source, before);
}

#[test]
fn test_make_start_marker() {
    let mut data = sample_data();
    data.images.push(image(1.0, DVec3::ZERO, 1.0));
    make_start_marker(&mut data).unwrap();

    assert!(data.trees.is_empty());
    assert!(data.contours.is_empty());
    assert!(data.images.is_empty());
    assert_eq!(data.markers.len(), 1);
    let start = &data.markers[0];
    assert_eq!(start.kind, "FilledCircle");
    assert_eq!(start.name, "Start");
    assert_eq!(start.color, Color::WHITE);
    assert_eq!(start.points, vec![Point::new(1.0, 1.0, 1.0, 0.5)]);
}

#[test]
fn test_make_start_marker_without_tree() {
    let mut data = NeuronData::new();
    data.markers.push(Marker::new("Dot", "keep", Color::BLACK));
    assert_eq!(
        make_start_marker(&mut data),
        Err(TransformError::MissingStartPoint)
    );
    assert_eq!(data.markers[0].name, "keep");
}
