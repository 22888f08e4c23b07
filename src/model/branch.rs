//! Branch module for the recursive part of a traced neurite.
//!
//! A [Branch] is a polyline of [Point]s that ends either in a leaf or in a fork,
//! at which it owns its child branches. Branches form a tree by exclusive
//! ownership; no parent references are stored.

use crate::model::geometry::Point;
use crate::model::marker::Marker;
use std::fmt;

// =#========================================================================#=
// LEAF KIND
// =#========================================================================#=
/// Classification of how a branch terminates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeafKind {
    Normal,
    High,
    Low,
    Incomplete,
    OriginMidpoint,
    /// Also taken when the encoding does not state a leaf kind.
    #[default]
    Unspecified,
    /// Value outside the documented set, preserved verbatim.
    Other(String),
}

impl LeafKind {
    /// Maps the name used in files to a [LeafKind].
    ///
    /// Unknown names are kept as [LeafKind::Other].
    ///
    /// # Examples
    /// ```
    /// use nlxml::model::branch::LeafKind;
    ///
    /// assert_eq!(LeafKind::from_name("Normal"), LeafKind::Normal);
    /// assert_eq!(LeafKind::from_name("Origin Midpoint"), LeafKind::OriginMidpoint);
    /// assert_eq!(LeafKind::from_name("Generated"), LeafKind::Other("Generated".to_string()));
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "Normal" => LeafKind::Normal,
            "High" => LeafKind::High,
            "Low" => LeafKind::Low,
            "Incomplete" => LeafKind::Incomplete,
            "Origin Midpoint" | "OriginMidpoint" => LeafKind::OriginMidpoint,
            "Unspecified" => LeafKind::Unspecified,
            other => LeafKind::Other(other.to_string()),
        }
    }

    /// Returns the name used in files for this [LeafKind].
    pub fn as_str(&self) -> &str {
        match self {
            LeafKind::Normal => "Normal",
            LeafKind::High => "High",
            LeafKind::Low => "Low",
            LeafKind::Incomplete => "Incomplete",
            LeafKind::OriginMidpoint => "Origin Midpoint",
            LeafKind::Unspecified => "Unspecified",
            LeafKind::Other(name) => name,
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// BRANCH
// =#========================================================================#=
/// A traced polyline with its markers and the child branches spawned at its end.
///
/// # Structure
/// - `points` is ordered along the trace
/// - `markers` carry no order semantics
/// - `children` are ordered; a branch with exactly one child is topologically
///   redundant (see [collapse](crate::simplify::collapse))
///
/// # Example
/// ```
/// use nlxml::model::branch::{Branch, LeafKind};
/// use nlxml::model::geometry::Point;
///
/// let left = Branch::new(LeafKind::Normal).with_points(vec![Point::new(1.0, 1.0, 0.0, 0.5)]);
/// let right = Branch::new(LeafKind::Normal).with_points(vec![Point::new(1.0, -1.0, 0.0, 0.5)]);
/// let root = Branch::new(LeafKind::Unspecified)
///     .with_points(vec![Point::new(0.0, 0.0, 0.0, 1.0)])
///     .with_children(vec![left, right]);
///
/// assert!(root.is_fork());
/// assert_eq!(root.num_points(), 3);
/// assert_eq!(root.pre_order_iter().count(), 3);
/// ```
///
/// Cloning, comparing and dropping walk the subtree with an explicit stack.
/// The [Debug] output is nested and formatting it recurses once per level, so
/// very deep trees should be inspected through [pre_order_iter](Branch::pre_order_iter).
#[derive(Debug, Default)]
pub struct Branch {
    /// How this branch terminates
    pub leaf: LeafKind,
    /// Traced points in order
    pub points: Vec<Point>,
    /// Markers attached to this branch
    pub markers: Vec<Marker>,
    /// Child branches, spawned at the last point
    pub children: Vec<Branch>,
}

impl Branch {
    /// Creates a new, empty branch.
    pub fn new(leaf: LeafKind) -> Self {
        Self {
            leaf,
            points: Vec::new(),
            markers: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the points of this branch.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Sets the child branches of this branch.
    pub fn with_children(mut self, children: Vec<Branch>) -> Self {
        self.children = children;
        self
    }

    /// Sets the markers of this branch.
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    /// Returns the number of direct children.
    pub fn degree(&self) -> usize {
        self.children.len()
    }

    /// Returns whether this branch ends without children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether this branch ends in a fork (two or more children).
    pub fn is_fork(&self) -> bool {
        self.children.len() >= 2
    }

    /// Returns the total number of points in this branch and all descendants.
    pub fn num_points(&self) -> usize {
        self.pre_order_iter().map(|b| b.points.len()).sum()
    }

    /// Returns the total number of markers in this branch and all descendants.
    pub fn num_markers(&self) -> usize {
        self.pre_order_iter().map(|b| b.markers.len()).sum()
    }

    /// Returns the number of branches in this subtree, including this one.
    pub fn num_branches(&self) -> usize {
        self.pre_order_iter().count()
    }

    /// Returns an iterator over this branch and all descendants in pre-order
    /// (parents before children, children in stored order).
    ///
    /// # Returns
    /// A [PreOrderIter] that yields `&Branch` references
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

impl Clone for Branch {
    fn clone(&self) -> Self {
        // Shallow copies in pre-order, each with the index of its parent copy
        let mut nodes: Vec<Branch> = Vec::new();
        let mut parents: Vec<usize> = Vec::new();
        let mut stack: Vec<(&Branch, usize)> = vec![(self, 0)];
        while let Some((branch, parent)) = stack.pop() {
            let index = nodes.len();
            nodes.push(Branch {
                leaf: branch.leaf.clone(),
                points: branch.points.clone(),
                markers: branch.markers.clone(),
                children: Vec::with_capacity(branch.children.len()),
            });
            parents.push(parent);
            stack.extend(branch.children.iter().rev().map(|child| (child, index)));
        }

        // Parents precede their children, so attaching from the back only
        // ever moves complete subtrees. Children arrive last-first.
        while nodes.len() > 1 {
            let Some(mut node) = nodes.pop() else { break };
            node.children.reverse();
            let parent = parents[nodes.len()];
            nodes[parent].children.push(node);
        }

        let mut root = nodes.pop().unwrap_or_default();
        root.children.reverse();
        root
    }
}

impl PartialEq for Branch {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.leaf != b.leaf
                || a.points != b.points
                || a.markers != b.markers
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for Branch {
    /// Drops descendants iteratively, so arbitrarily deep nesting cannot
    /// overflow the call stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut branch) = pending.pop() {
            pending.append(&mut branch.children);
        }
    }
}

// =#========================================================================#=
// TRAVERSAL
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the branches without recursion.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Branch>,
}

impl<'a> PreOrderIter<'a> {
    fn new(branch: &'a Branch) -> Self {
        PreOrderIter {
            stack: vec![branch],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Branch;

    fn next(&mut self) -> Option<Self::Item> {
        let branch = self.stack.pop()?;

        // Push children in reverse, so the first child is processed first
        self.stack.extend(branch.children.iter().rev());

        Some(branch)
    }
}
