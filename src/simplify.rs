//! Topological simplification: removal of degree-2 nodes.
//!
//! A branch with exactly one child does not fork; the split between the two
//! is an artifact of tracing. Collapsing splices such children into their
//! parent until every branch has zero or at least two children.

use crate::model::{Branch, NeuronData};
use log::debug;

/// Collapses all single-child chains in the subtree of `branch`.
///
/// While `branch` has exactly one child, the child's points and markers are
/// appended to `branch`, its children replace those of `branch` and the child
/// is discarded. Then the surviving children are processed the same way.
/// The leaf kind of `branch` is kept.
///
/// Afterwards every branch in the subtree has 0 or at least 2 children. The
/// total number of points and markers is unchanged, and collapsing again has
/// no effect.
///
/// # Returns
/// The number of branches spliced away
///
/// # Example
/// ```
/// use nlxml::model::{Branch, LeafKind, Point};
/// use nlxml::simplify::collapse;
///
/// let tip = Branch::new(LeafKind::Normal).with_points(vec![Point::new(2.0, 0.0, 0.0, 1.0)]);
/// let mid = Branch::new(LeafKind::Normal)
///     .with_points(vec![Point::new(1.0, 0.0, 0.0, 1.0)])
///     .with_children(vec![tip]);
/// let mut root = Branch::new(LeafKind::Normal)
///     .with_points(vec![Point::new(0.0, 0.0, 0.0, 1.0)])
///     .with_children(vec![mid]);
///
/// assert_eq!(collapse(&mut root), 2);
/// assert!(root.is_leaf());
/// assert_eq!(root.points.len(), 3);
/// ```
pub fn collapse(branch: &mut Branch) -> usize {
    let mut spliced = 0;
    let mut stack: Vec<&mut Branch> = vec![branch];

    while let Some(branch) = stack.pop() {
        while branch.children.len() == 1 {
            let Some(mut child) = branch.children.pop() else {
                break;
            };
            branch.points.append(&mut child.points);
            branch.markers.append(&mut child.markers);
            branch.children = std::mem::take(&mut child.children);
            spliced += 1;
        }
        stack.extend(branch.children.iter_mut());
    }

    spliced
}

/// Collapses every tree of `data`, starting at the tree's root branch.
///
/// # Returns
/// The number of branches spliced away in total
pub fn simplify(data: &mut NeuronData) -> usize {
    let spliced: usize = data.trees.iter_mut().map(|t| collapse(&mut t.root)).sum();
    debug!(
        "Collapsed {spliced} degree-2 branches in {} trees",
        data.trees.len()
    );
    spliced
}
