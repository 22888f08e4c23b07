//! Flattening of trees into SWC records.

use crate::model::{Branch, NeuronData};
use crate::swc::defs::NO_PARENT;
use crate::swc::record::{SwcRecord, TypeCode};
use log::warn;

/// Flattens all trees of `data` into SWC records.
///
/// Trees are walked depth-first in pre-order, children in stored order, with
/// ids assigned sequentially from 1 and continuing across trees. Each point
/// becomes one record:
/// - point with two or more successors, or last point of a branch with
///   children: fork
/// - otherwise, first point of a tree: soma, parent `-1`
/// - last point of a branch without children: end
/// - any other point: undefined (0)
///
/// A fork at the start of a tree keeps parent `-1`. A tree whose root branch
/// holds no points is rooted at its first child with points; the remaining
/// children attach to that child's first point, so the tree stays connected.
///
/// A point's parent is the previous point of its branch, or the last point
/// of the parent branch for the first point of a child branch. The diameter
/// channel is written as radius unchanged.
///
/// Contours and markers have no SWC representation; they are dropped with a
/// warning.
///
/// # Example
/// ```
/// use nlxml::model::{Branch, Color, LeafKind, NeuronData, NeuronType, Point, Tree};
/// use nlxml::swc::{TypeCode, flatten};
///
/// let root = Branch::new(LeafKind::Normal).with_points(vec![
///     Point::new(0.0, 0.0, 0.0, 1.0),
///     Point::new(1.0, 0.0, 0.0, 1.0),
///     Point::new(2.0, 0.0, 0.0, 1.0),
/// ]);
/// let mut data = NeuronData::new();
/// data.trees.push(Tree::new(NeuronType::Axon, Color::WHITE).with_root(root));
///
/// let types: Vec<TypeCode> = flatten(&data).iter().map(|r| r.type_code).collect();
/// assert_eq!(types, vec![TypeCode::Soma, TypeCode::Undefined, TypeCode::End]);
/// ```
pub fn flatten(data: &NeuronData) -> Vec<SwcRecord> {
    if !data.contours.is_empty() || data.num_markers() > 0 {
        warn!(
            "Dropping {} contours and {} markers, which SWC cannot represent",
            data.contours.len(),
            data.num_markers()
        );
    }

    let mut records = Vec::with_capacity(data.num_tree_points());
    let mut next_id: i64 = 1;
    let mut stack: Vec<Pending> = Vec::new();

    for tree in &data.trees {
        stack.push(Pending {
            branch: &tree.root,
            attach_to: NO_PARENT,
            is_tree_root: true,
            extra_at_start: 0,
        });

        while let Some(pending) = stack.pop() {
            let branch = pending.branch;

            if pending.is_tree_root && branch.points.is_empty() {
                promote_first_child(pending, next_id, &mut stack);
                continue;
            }

            let last = branch.points.len().saturating_sub(1);
            let mut parent = pending.attach_to;

            for (i, point) in branch.points.iter().enumerate() {
                let mut successors = if i < last { 1 } else { branch.degree() };
                if i == 0 {
                    successors += pending.extra_at_start;
                }

                let type_code = if successors >= 2 || (i == last && !branch.is_leaf()) {
                    TypeCode::Fork
                } else if pending.is_tree_root && i == 0 {
                    TypeCode::Soma
                } else if successors == 0 {
                    TypeCode::End
                } else {
                    TypeCode::Undefined
                };

                records.push(SwcRecord::from_point(next_id, type_code, point, parent));
                parent = next_id;
                next_id += 1;
            }

            // Reverse, so the first child is flattened first
            for child in branch.children.iter().rev() {
                stack.push(Pending {
                    branch: child,
                    attach_to: parent,
                    is_tree_root: false,
                    extra_at_start: 0,
                });
            }
        }
    }

    records
}

/// A branch waiting to be flattened.
struct Pending<'a> {
    branch: &'a Branch,
    /// Id of the point the first point links to
    attach_to: i64,
    /// Whether the first point starts a tree
    is_tree_root: bool,
    /// Branches attached to the first point besides the branch's own continuation
    extra_at_start: usize,
}

/// Replaces a tree root without points by its first child holding points.
///
/// The promoted child starts the tree; its siblings attach to the promoted
/// child's first point, which receives id `first_id`. Subtrees without any
/// point produce no records and are left out.
fn promote_first_child<'a>(pending: Pending<'a>, first_id: i64, stack: &mut Vec<Pending<'a>>) {
    let children = &pending.branch.children;
    let Some(promoted) = children.iter().position(|c| c.num_points() > 0) else {
        return;
    };

    let siblings: Vec<&Branch> = children
        .iter()
        .enumerate()
        .filter(|&(i, c)| i != promoted && c.num_points() > 0)
        .map(|(_, c)| c)
        .collect();

    for &sibling in siblings.iter().rev() {
        stack.push(Pending {
            branch: sibling,
            attach_to: first_id,
            is_tree_root: false,
            extra_at_start: 0,
        });
    }
    stack.push(Pending {
        branch: &children[promoted],
        attach_to: NO_PARENT,
        is_tree_root: true,
        extra_at_start: pending.extra_at_start + siblings.len(),
    });
}
