//! Conversion between [Color] and the `#RRGGBB` strings used in files.

use crate::model::Color;
use crate::parser::{ParsingError, ParsingErrorType};

/// Parses a `#RRGGBB` color string into a normalized [Color].
///
/// Each two-digit hex group is divided by 255. Hex digits may be upper or
/// lower case.
///
/// # Errors
/// Returns a [ParsingError] of kind `InvalidColor` if the string is not
/// exactly `#` followed by six hex digits.
///
/// # Examples
/// ```
/// use nlxml::model::Color;
/// use nlxml::nlxml::parse_color;
///
/// assert_eq!(parse_color("#FF0000").unwrap(), Color::new(1.0, 0.0, 0.0));
/// assert!(parse_color("red").is_err());
/// assert!(parse_color("#FF00").is_err());
/// ```
pub fn parse_color(text: &str) -> Result<Color, ParsingError> {
    decode_hex_color(text).ok_or_else(|| {
        ParsingError::without_context(ParsingErrorType::InvalidColor(text.to_string()))
    })
}

/// Formats a [Color] as `#RRGGBB`.
///
/// Channels are clamped to `[0, 1]`, scaled to `[0, 255]` and rounded to the
/// nearest integer, so a color read by [parse_color] is written back unchanged.
///
/// # Examples
/// ```
/// use nlxml::model::Color;
/// use nlxml::nlxml::color_to_string;
///
/// assert_eq!(color_to_string(&Color::new(1.0, 0.0, 0.0)), "#FF0000");
/// assert_eq!(color_to_string(&Color::new(2.0, -1.0, 0.5)), "#FF0080");
/// ```
pub fn color_to_string(color: &Color) -> String {
    format!(
        "#{:02X}{:02X}{:02X}",
        channel_to_byte(color.r),
        channel_to_byte(color.g),
        channel_to_byte(color.b)
    )
}

/// Decodes `#RRGGBB`, returning `None` if malformed.
pub(crate) fn decode_hex_color(text: &str) -> Option<Color> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16).ok()?;
        Some(byte as f32 / 255.0)
    };
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

fn channel_to_byte(channel: f32) -> u8 {
    // NaN saturates to 0
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
