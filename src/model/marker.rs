//! Point markers placed on trees, branches, contours or the whole file.

use crate::model::geometry::{Color, Point};

/// A named set of marker glyphs.
///
/// Each point is the center of one placed glyph. The glyph itself is
/// identified by `kind` (e.g. `"FilledCircle"`, `"Dot"`), which is kept as
/// the string found in the file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Marker {
    /// Glyph tag, the `type` attribute in the nested encoding
    pub kind: String,
    /// Marker name
    pub name: String,
    /// Display color
    pub color: Color,
    /// Whether the marker tags a neurite swelling
    pub varicosity: bool,
    /// Glyph positions
    pub points: Vec<Point>,
}

impl Marker {
    /// Creates a new marker without points.
    pub fn new(kind: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            color,
            varicosity: false,
            points: Vec::new(),
        }
    }

    /// Sets the glyph positions of this marker.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Marks this marker as tagging a varicosity.
    pub fn with_varicosity(mut self) -> Self {
        self.varicosity = true;
        self
    }
}
