//! Basic geometric values: traced [Point]s and display [Color]s.

use glam::DVec3;

// =#=======================================================================#=
// POINT
// =#=======================================================================#=
/// A traced sample: position plus the local diameter of the neurite.
///
/// The diameter channel is carried through every conversion and transform
/// untouched; it is never validated or clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Local diameter (or radius, depending on the source format)
    pub diameter: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64, z: f64, diameter: f64) -> Self {
        Self { x, y, z, diameter }
    }

    /// Returns the position of this point as a vector.
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Returns a copy of this point moved to `position`, keeping its diameter.
    pub fn with_position(self, position: DVec3) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            diameter: self.diameter,
        }
    }
}

// =#=======================================================================#=
// COLOR
// =#=======================================================================#=
/// An RGB color with channels normalized to `[0, 1]`.
///
/// Files store colors as `#RRGGBB`; see [parse_color](crate::nlxml::parse_color)
/// and [color_to_string](crate::nlxml::color_to_string) for the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Black, also the color of elements without a color attribute.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    /// White, the color of trees reconstructed from SWC.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    /// Pure red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    /// Pure blue.
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// Creates a new color from normalized channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}
