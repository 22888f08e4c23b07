//! Contours: outlines such as cell bodies, outside the branch hierarchy.

use crate::model::geometry::{Color, Point};
use crate::model::marker::Marker;

/// A named outline, e.g. the soma boundary traced in one focal plane.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    pub name: String,
    /// Shape tag as found in the file, e.g. `"Contour"`
    pub shape: String,
    pub color: Color,
    /// Whether the last point connects back to the first
    pub closed: bool,
    pub points: Vec<Point>,
    pub markers: Vec<Marker>,
}

impl Contour {
    /// Creates a new contour without points or markers.
    pub fn new(name: impl Into<String>, color: Color, closed: bool) -> Self {
        Self {
            name: name.into(),
            shape: String::new(),
            color,
            closed,
            points: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Sets the points of this contour.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }
}
