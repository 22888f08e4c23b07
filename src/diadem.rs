//! Import of DIADEM metric reports as markers.
//!
//! The DIADEM metric compares a test reconstruction against a gold standard
//! and lists the nodes the test missed and the nodes it added:
//! ```text
//! Nodes that were missed (position and weight):
//! (12.5,40,3) 1
//! (20,41.5,3) 2
//!
//! Extra nodes in test reconstruction (position and weight):
//! (5,5,0) 1
//! ```
//! Each section runs until a blank line. Importing a report produces a
//! [NeuronData] in the gold standard's space holding one marker per section,
//! which can be written next to the gold file for visual inspection.

use crate::model::{Color, Marker, NeuronData, Point};
use crate::parser::byte_parser::ConsumeMode;
use crate::parser::byte_source::ByteSource;
use crate::parser::utils::bytes_to_string;
use crate::parser::{ByteParser, ParsingError, ParsingErrorType};
use log::debug;
use std::path::Path;

const MISSED_HEADER: &str = "Nodes that were missed (position and weight):";
const EXTRA_HEADER: &str = "Extra nodes in test reconstruction (position and weight):";

/// Parses a DIADEM report held in a string, see [parse_report].
pub fn parse_report_str(report: &str, gold: &NeuronData) -> Result<NeuronData, ParsingError> {
    parse_report(ByteParser::for_str(report), gold)
}

/// Reads a DIADEM report file completely and parses it, see [parse_report].
pub fn parse_report_file<P: AsRef<Path>>(
    path: P,
    gold: &NeuronData,
) -> Result<NeuronData, ParsingError> {
    parse_report(ByteParser::from_file(path)?, gold)
}

/// Parses a DIADEM report into markers.
///
/// # Arguments
/// * `parser` - Parser positioned at the start of the report
/// * `gold` - The gold standard the report was computed against; its images
///   are copied so the markers share its calibration
///
/// # Returns
/// A [NeuronData] with the gold file's images and one marker per section:
/// missed nodes as red `FilledSquare` markers named `missed pts`, extra
/// nodes as blue `FilledDiamond` markers named `extra pts`. The weight of
/// each node is kept in the diameter channel. Lines outside the two
/// sections are ignored.
///
/// # Errors
/// Returns a [ParsingError] of kind `InvalidRecord` for a node line that is
/// not of the form `(x,y,z) weight`.
///
/// # Example
/// ```
/// use nlxml::diadem::parse_report_str;
/// use nlxml::model::NeuronData;
///
/// let report = "Score: 0.9\nNodes that were missed (position and weight):\n(1,2,3) 1\n\n";
/// let markers = parse_report_str(report, &NeuronData::new())?;
/// assert_eq!(markers.markers[0].name, "missed pts");
/// assert_eq!(markers.markers[0].points[0].z, 3.0);
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
pub fn parse_report<S: ByteSource>(
    mut parser: ByteParser<S>,
    gold: &NeuronData,
) -> Result<NeuronData, ParsingError> {
    let mut data = NeuronData::new();
    data.images = gold.images.clone();

    parser.skip_bom();
    while !parser.is_eof() {
        let line = read_line(&mut parser);
        let marker = match line.trim_end() {
            MISSED_HEADER => Marker::new("FilledSquare", "missed pts", Color::RED),
            EXTRA_HEADER => Marker::new("FilledDiamond", "extra pts", Color::BLUE),
            _ => continue,
        };
        let points = read_nodes(&mut parser)?;
        debug!("Found {} nodes for '{}'", points.len(), marker.name);
        data.markers.push(marker.with_points(points));
    }

    Ok(data)
}

/// Reads node lines up to a blank line or EOF.
fn read_nodes<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<Vec<Point>, ParsingError> {
    let mut points = Vec::new();
    while !parser.is_eof() {
        let start = parser.position();
        let line = read_line(parser);
        if line.trim().is_empty() {
            break;
        }
        let point = parse_node(&line).ok_or_else(|| {
            ParsingError::at_position(
                ParsingErrorType::InvalidRecord(format!(
                    "expected '(x,y,z) weight', found {:?}",
                    line.trim_end()
                )),
                parser,
                start,
            )
        })?;
        points.push(point);
    }
    Ok(points)
}

/// Reads the rest of the current line and consumes its newline.
fn read_line<S: ByteSource>(parser: &mut ByteParser<S>) -> String {
    let start = parser.position();
    parser.consume_until(b'\n', ConsumeMode::Exclusive);
    let line = bytes_to_string(parser.slice_from(start));
    parser.next_byte();
    line
}

/// Parses `(x,y,z) weight`.
fn parse_node(line: &str) -> Option<Point> {
    let rest = line.trim().strip_prefix('(')?;
    let (coords, weight) = rest.split_once(')')?;
    let mut coords = coords.split(',').map(|c| c.trim().parse::<f64>());
    let x = coords.next()?.ok()?;
    let y = coords.next()?.ok()?;
    let z = coords.next()?.ok()?;
    if coords.next().is_some() {
        return None;
    }
    let weight = weight.trim().parse::<f64>().ok()?;
    Some(Point::new(x, y, z, weight))
}
