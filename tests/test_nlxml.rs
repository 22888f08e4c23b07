use glam::{DVec2, DVec3};
use nlxml::model::{
    Branch, Color, Contour, LeafKind, Marker, NeuronData, NeuronType, Point, Tree,
};
use nlxml::nlxml::{NlxmlWriter, color_to_string, decode, encode, parse_color, parse_file, parse_str};
use nlxml::parser::{ErrorCategory, ParsingErrorType};
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn point(x: f64, y: f64) -> Point {
    Point::new(x, y, 0.0, 1.0)
}

// --- TESTS DECODING ---
#[test]
fn test_parse_fixture_file() {
    let data = parse_file(fixture("purkinje_small.xml")).unwrap();

    // Images
    assert_eq!(data.images.len(), 1);
    let image = &data.images[0];
    assert_eq!(image.filenames, vec![r"C:\stacks\cell3.jpx".to_string()]);
    assert_eq!(image.scale, DVec2::new(0.5, 0.5));
    assert_eq!(image.coord, DVec3::new(100.0, -50.0, 10.0));
    assert_eq!(image.z_spacing, 2.0);
    assert_eq!(image.slices, 40);

    // Contour, its unknown children are skipped
    assert_eq!(data.contours.len(), 1);
    let contour = &data.contours[0];
    assert_eq!(contour.name, "CellBody");
    assert_eq!(contour.shape, "Contour");
    assert!(contour.closed);
    assert_eq!(contour.color, parse_color("#FF8000").unwrap());
    assert_eq!(contour.points.len(), 3);

    // Tree
    assert_eq!(data.trees.len(), 1);
    let tree = &data.trees[0];
    assert_eq!(tree.neuron_type, NeuronType::Dendrite);
    assert_eq!(tree.color, Color::new(1.0, 1.0, 0.0));
    assert_eq!(tree.root.leaf, LeafKind::Normal);
    assert_eq!(tree.root.points.len(), 2);
    assert_eq!(tree.num_points(), 7);
    assert_eq!(tree.branches().count(), 5);
    assert_eq!(tree.num_markers(), 1);

    let left = &tree.root.children[0];
    let right = &tree.root.children[1];
    assert_eq!(left.leaf, LeafKind::Normal);
    assert_eq!(left.points[1], Point::new(-5.0, 12.0, 1.0, 1.0));
    assert_eq!(left.children[0].leaf, LeafKind::Unspecified);
    assert_eq!(left.children[1].leaf, LeafKind::High);
    assert_eq!(right.leaf, LeafKind::Incomplete);
    assert!(right.is_leaf());

    let spine = &left.markers[0];
    assert_eq!(spine.kind, "Dot");
    assert_eq!(spine.name, "spine");
    assert!(spine.varicosity);
    assert_eq!(spine.color, Color::new(0.0, 1.0, 0.0));

    // File-level marker
    assert_eq!(data.markers.len(), 1);
    assert_eq!(data.markers[0].kind, "FilledCircle");
    assert_eq!(data.markers[0].color, Color::WHITE);
    assert!(!data.markers[0].varicosity);
    assert_eq!(data.num_markers(), 2);
}

#[test]
fn test_leading_byte_order_mark() {
    let document = "\u{feff}<?xml version=\"1.0\"?>\n<mbf version=\"4.0\">\n\
                    <tree color=\"#FF0000\" type=\"Axon\" leaf=\"Normal\">\n\
                    <point x=\"1\" y=\"2\" z=\"3\" d=\"1\"/>\n\
                    </tree>\n</mbf>\n";
    let data = parse_str(document).unwrap();
    assert_eq!(data.trees.len(), 1);
    assert_eq!(data.trees[0].root.points[0].z, 3.0);
}

#[test]
fn test_nested_branches() {
    let document = r##"<?xml version="1.0"?>
<mbf version="4.0">
  <tree color="#FF0000" type="Axon" leaf="Normal">
    <point x="0" y="0" z="0" d="1"/>
    <branch leaf="Low">
      <point x="1" y="1" z="0" d="1"/>
      <branch leaf="Normal"><point x="2" y="2" z="0" d="1"/></branch>
      <branch leaf="Normal"><point x="2" y="0" z="0" d="1"/></branch>
    </branch>
    <branch leaf="Origin Midpoint"><point x="1" y="-1" z="0" d="1"/></branch>
  </tree>
</mbf>"##;
    let data = parse_str(document).unwrap();
    let root = &data.trees[0].root;

    assert_eq!(root.degree(), 2);
    assert_eq!(root.children[0].leaf, LeafKind::Low);
    assert_eq!(root.children[0].degree(), 2);
    assert_eq!(root.children[0].children[1].points[0].x, 2.0);
    assert_eq!(root.children[1].leaf, LeafKind::OriginMidpoint);

    let xs: Vec<f64> = root.pre_order_iter().map(|b| b.points[0].x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 2.0, 1.0]);
}

#[test]
fn test_attribute_defaults() {
    let document = r#"<mbf><tree><branch><point x="1"/></branch></tree><contour/><marker/></mbf>"#;
    let data = parse_str(document).unwrap();

    let tree = &data.trees[0];
    assert_eq!(tree.color, Color::BLACK);
    assert_eq!(tree.root.leaf, LeafKind::Unspecified);
    assert_eq!(tree.root.children[0].leaf, LeafKind::Unspecified);
    assert_eq!(tree.root.children[0].points[0], Point::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!(data.contours[0], Contour::new("", Color::BLACK, false));
    assert_eq!(data.markers[0], Marker::new("", "", Color::BLACK));
}

#[test]
fn test_unknown_elements_are_skipped() {
    let document = r#"<mbf>
  <thumbnail cols="2" rows="1"><row>FF</row></thumbnail>
  <sections><section sid="S1" name="Section 1" top="0"/></sections>
  <tree type="Dendrite">
    <property name="Set"><s>Layer 5</s></property>
    <point x="1" y="2" z="3" d="1"/>
    <spine><point x="9" y="9" z="9" d="1"/></spine>
  </tree>
  <text>Label</text>
</mbf>"#;
    let data = parse_str(document).unwrap();
    assert_eq!(data.trees.len(), 1);
    assert_eq!(data.trees[0].num_points(), 1);
    assert!(data.contours.is_empty());
    assert!(data.markers.is_empty());
}

#[test]
fn test_unknown_leaf_kind_and_type_kept() {
    let document = r#"<mbf><tree type="Dendritic Spine" leaf="Generated"><point/></tree></mbf>"#;
    let data = parse_str(document).unwrap();
    assert_eq!(data.trees[0].root.leaf, LeafKind::Other("Generated".to_string()));
    assert_eq!(
        data.trees[0].neuron_type,
        NeuronType::Other("Dendritic Spine".to_string())
    );

    let encoded = encode(&data);
    assert!(encoded.contains(r#"type="Dendritic Spine" leaf="Generated""#));
}

#[test]
fn test_entities_in_names() {
    let document = r#"<mbf><contour name="CA1 &lt;left&gt; &amp; more" closed="FALSE"/></mbf>"#;
    let data = parse_str(document).unwrap();
    assert_eq!(data.contours[0].name, "CA1 <left> & more");
    assert!(!data.contours[0].closed);
    assert!(encode(&data).contains("CA1 &lt;left&gt; &amp; more"));
}

#[test]
fn test_empty_root() {
    assert!(parse_str("<mbf/>").unwrap().is_empty());
    assert!(parse_str("<?xml version=\"1.0\"?>\n<mbf></mbf>\n").unwrap().is_empty());
}

#[test]
fn test_decode_bytes_latin1() {
    let mut document = b"<mbf><contour name=\"Zelle ".to_vec();
    document.push(0xC4);
    document.extend_from_slice(b"\"/></mbf>");
    let data = decode(&document).unwrap();
    assert_eq!(data.contours[0].name, "Zelle Ä");
}

// --- TESTS DECODING ERRORS ---
#[test]
fn test_missing_root() {
    let error = parse_str("<?xml version=\"1.0\"?>\n<!-- nothing -->\n").unwrap_err();
    assert_eq!(error.kind(), &ParsingErrorType::MissingRootElement);
    assert_eq!(error.category(), ErrorCategory::Format);
}

#[test]
fn test_mismatched_end_tag() {
    let error = parse_str("<mbf>\n<tree>\n<point/>\n</branch>\n</mbf>").unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::InvalidMarkup(_)));
    assert_eq!(error.line(), Some(4));
}

#[test]
fn test_truncated_document() {
    let error = parse_str("<mbf><tree><branch><point x=\"1\"/>").unwrap_err();
    assert_eq!(error.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_invalid_attribute_values() {
    let error = parse_str(r#"<mbf><tree><point x="one"/></tree></mbf>"#).unwrap_err();
    assert!(matches!(
        error.kind(),
        ParsingErrorType::InvalidAttribute { name, value } if name == "x" && value == "one"
    ));

    let error = parse_str(r#"<mbf><tree color="red"/></mbf>"#).unwrap_err();
    assert_eq!(error.kind(), &ParsingErrorType::InvalidColor("red".to_string()));
    assert_eq!(error.category(), ErrorCategory::Format);
}

// --- TESTS COLORS ---
#[test]
fn test_color_examples() {
    assert_eq!(parse_color("#FF0000").unwrap(), Color::new(1.0, 0.0, 0.0));
    assert_eq!(color_to_string(&Color::new(1.0, 0.0, 0.0)), "#FF0000");
    assert_eq!(parse_color("#00ff00").unwrap(), Color::new(0.0, 1.0, 0.0));
    assert_eq!(color_to_string(&Color::new(2.0, -1.0, 0.5)), "#FF0080");

    for malformed in ["FF0000", "#FF00", "#GG0000", "#FF00000", ""] {
        let error = parse_color(malformed).unwrap_err();
        assert_eq!(
            error.kind(),
            &ParsingErrorType::InvalidColor(malformed.to_string())
        );
    }
}

// --- TESTS ENCODING ---
fn sample_data() -> NeuronData {
    let tip = Branch::new(LeafKind::High).with_points(vec![point(3.0, 1.0)]);
    let other = Branch::new(LeafKind::Normal)
        .with_points(vec![point(3.0, -1.0), point(4.0, -2.0)])
        .with_markers(vec![
            Marker::new("Dot", "bouton", Color::RED)
                .with_points(vec![point(3.5, -1.5)])
                .with_varicosity(),
        ]);
    let root = Branch::new(LeafKind::Normal)
        .with_points(vec![point(0.0, 0.0), point(2.0, 0.0)])
        .with_children(vec![tip, other]);

    let mut soma = Contour::new("Soma", Color::WHITE, true)
        .with_points(vec![point(-1.0, 0.0), point(0.0, 1.0), point(1.0, 0.0)]);
    soma.shape = "Contour".to_string();
    soma.markers
        .push(Marker::new("Asterisk", "nucleus", Color::BLUE).with_points(vec![point(0.0, 0.5)]));

    let mut data = NeuronData::new();
    data.trees.push(
        Tree::new(NeuronType::ApicalDendrite, parse_color("#3366CC").unwrap()).with_root(root),
    );
    data.contours.push(soma);
    data.markers
        .push(Marker::new("FilledCircle", "Start", Color::WHITE).with_points(vec![point(0.0, 0.0)]));
    data
}

#[test]
fn test_encode_decode_preserves_model() {
    let data = sample_data();
    let encoded = encode(&data);
    assert_eq!(decode(encoded.as_bytes()).unwrap(), data);
}

#[test]
fn test_encode_decode_fixture_with_images() {
    let data = parse_file(fixture("purkinje_small.xml")).unwrap();
    let encoded = NlxmlWriter::new().with_images().render(&data);
    assert_eq!(parse_str(&encoded).unwrap(), data);

    // Without images, everything but the calibration survives
    let mut without_images = parse_str(encode(&data)).unwrap();
    assert!(without_images.images.is_empty());
    without_images.images = data.images.clone();
    assert_eq!(without_images, data);
}

#[test]
fn test_encode_document_frame() {
    let encoded = encode(&NeuronData::new());
    let lines: Vec<&str> = encoded.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("<?xml"));
    assert!(lines[1].starts_with(r#"<mbf version="4.0" xmlns="#));
    assert_eq!(lines[2], "</mbf>");
}

#[test]
fn test_encode_top_level_order() {
    let encoded = encode(&sample_data());
    let tree = encoded.find("<tree").unwrap();
    let contour = encoded.find("<contour").unwrap();
    let file_marker = encoded.find(r#"name="Start""#).unwrap();
    assert!(tree < contour);
    assert!(contour < file_marker);
    assert!(encoded.contains(r##"<tree color="#3366CC" type="Apical Dendrite" leaf="Normal">"##));
}

#[test]
fn test_writer_indent() {
    let mut data = NeuronData::new();
    data.markers.push(Marker::new("Dot", "a", Color::BLACK));
    let encoded = NlxmlWriter::new().with_indent("\t").render(&data);
    assert!(encoded.contains("\n\t<marker type=\"Dot\""));
}

#[test]
fn test_write_file_and_parse_back() {
    let path = std::env::temp_dir().join(format!("nlxml-test-{}.xml", std::process::id()));
    let data = sample_data();
    nlxml::write_nlxml_file(&path, &data).unwrap();
    let parsed = nlxml::parse_nlxml_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(parsed, data);
}

// --- TESTS DEEP NESTING ---
#[test]
fn test_deeply_nested_branches() {
    const DEPTH: usize = 20_000;
    let mut document = String::from(r#"<mbf><tree type="Axon" leaf="Normal"><point x="0"/>"#);
    for i in 1..=DEPTH {
        document.push_str(&format!(r#"<branch leaf="Normal"><point x="{i}"/>"#));
    }
    for _ in 0..DEPTH {
        document.push_str("</branch>");
    }
    document.push_str("</tree></mbf>");

    let data = parse_str(&document).unwrap();
    let tree = &data.trees[0];
    assert_eq!(tree.num_points(), DEPTH + 1);
    assert_eq!(tree.branches().count(), DEPTH + 1);
    let deepest = tree.branches().last().unwrap();
    assert_eq!(deepest.points[0].x, DEPTH as f64);

    // Write without indentation to keep the document small
    let encoded = NlxmlWriter::new().with_indent("").render(&data);
    let reparsed = parse_str(&encoded).unwrap();
    assert_eq!(reparsed.trees[0].num_points(), DEPTH + 1);
    assert_eq!(reparsed.trees[0].branches().count(), DEPTH + 1);

    // Nested Debug output recurses, so compare with assert!
    assert!(reparsed.trees[0].root == data.trees[0].root);
    let copy = data.clone();
    assert!(copy == data);
    assert_eq!(copy.trees[0].branches().count(), DEPTH + 1);
}
