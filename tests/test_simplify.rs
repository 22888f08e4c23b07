use nlxml::model::{Branch, Color, LeafKind, NeuronData, NeuronType, Point, Tree};
use nlxml::simplify::{collapse, simplify};
use nlxml::swc::{flatten, reconstruct};
use std::path::Path;

fn point(x: f64) -> Point {
    Point::new(x, 0.0, 0.0, 1.0)
}

#[test]
fn test_simplify_fixture() {
    let path = Path::new("tests").join("fixtures").join("purkinje_small.xml");
    let mut data = nlxml::parse_nlxml_file(path).unwrap();
    let points = data.num_tree_points();
    let markers = data.num_markers();

    // Every branch of the fixture has 0 or 2 children already
    assert_eq!(simplify(&mut data), 0);
    assert_eq!(data.num_tree_points(), points);
    assert_eq!(data.num_markers(), markers);
}

#[test]
fn test_simplify_counts_all_trees() {
    let mut data = NeuronData::new();
    for _ in 0..3 {
        let chain = Branch::new(LeafKind::Normal)
            .with_points(vec![point(0.0)])
            .with_children(vec![
                Branch::new(LeafKind::High).with_points(vec![point(1.0), point(2.0)]),
            ]);
        data.trees.push(Tree::new(NeuronType::Dendrite, Color::WHITE).with_root(chain));
    }

    assert_eq!(simplify(&mut data), 3);
    for tree in &data.trees {
        assert!(tree.root.is_leaf());
        assert_eq!(tree.root.points, vec![point(0.0), point(1.0), point(2.0)]);
        // The surviving branch keeps its own leaf kind
        assert_eq!(tree.root.leaf, LeafKind::Normal);
    }
    assert_eq!(simplify(&mut data), 0);
}

#[test]
fn test_simplified_tree_survives_swc() {
    // root -> single child -> fork of two leaves
    let fork = Branch::new(LeafKind::Normal)
        .with_points(vec![point(1.0)])
        .with_children(vec![
            Branch::new(LeafKind::Normal).with_points(vec![point(2.0)]),
            Branch::new(LeafKind::Normal).with_points(vec![point(3.0)]),
        ]);
    let root = Branch::new(LeafKind::Normal)
        .with_points(vec![point(0.0)])
        .with_children(vec![fork]);
    let mut data = NeuronData::new();
    data.trees.push(Tree::new(NeuronType::Axon, Color::WHITE).with_root(root));

    simplify(&mut data);
    let again = reconstruct(&flatten(&data)).unwrap();
    assert_eq!(again.trees[0].root, data.trees[0].root);
}

#[test]
fn test_collapse_deep_chain() {
    const DEPTH: usize = 20_000;
    let mut branch = Branch::new(LeafKind::Normal).with_points(vec![point(DEPTH as f64)]);
    for i in (0..DEPTH).rev() {
        branch = Branch::new(LeafKind::Normal)
            .with_points(vec![point(i as f64)])
            .with_children(vec![branch]);
    }
    assert_eq!(branch.num_branches(), DEPTH + 1);

    assert_eq!(collapse(&mut branch), DEPTH);
    assert!(branch.is_leaf());
    assert_eq!(branch.points.len(), DEPTH + 1);
    assert!(branch.points.windows(2).all(|w| w[0].x < w[1].x));
}
