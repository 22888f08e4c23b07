//! nlxml is a library to read, convert and transform neuron morphology
//! reconstructions stored as Neurolucida XML or SWC.
//!
//! Both encodings are read into one format-neutral model, [NeuronData], and
//! can be written from it again. Core functionality provided:
//! - Neurolucida XML: nested encoding where branches contain their child
//!   branches, plus contours, markers and image calibration.
//!   See [crate::nlxml].
//! - SWC: flat encoding of one sample per line linked to its parent.
//!   Trees are reconstructed from parent links and flattened back.
//!   See [crate::swc].
//! - Simplification: collapse of non-branching (degree-2) nodes.
//!   See [crate::simplify].
//! - Transforms: image calibration, alignment of one file to another file's
//!   space, and arbitrary point mappings over a whole file.
//!   See [crate::transform].
//! - DIADEM metric reports imported as markers. See [crate::diadem].
//!
//! All traversals over branch nesting use explicit stacks, so deeply nested
//! reconstructions do not exhaust the call stack.
//!
//! Limitations:
//! - No morphological validation or statistics (lengths, angles, diameters)
//! - SWC has no contours or markers; they are dropped when flattening
//!
//! Problems that are recovered from (unknown elements, unknown leaf kinds,
//! dropped content) are reported through the [log] facade; install a logger
//! to see them.
//!
//! # Usage patterns
//! 1. Several methods provide quick access with default settings,
//!    see the functions below and the module documentation.
//! 2. Configure [SwcReader](crate::swc::SwcReader),
//!    [SwcWriter](crate::swc::SwcWriter) or
//!    [NlxmlWriter](crate::nlxml::NlxmlWriter) for full control.
//!
//! ## Example Conversion
//!
//! Convert SWC to Neurolucida XML:
//! ```no_run
//! use nlxml::{parse_swc_file, write_nlxml_file};
//!
//! let data = parse_swc_file("pyramidal.swc")?;
//! write_nlxml_file("pyramidal.xml", &data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Simplify and align a tracing to a gold standard's space:
//! ```no_run
//! use nlxml::{parse_nlxml_file, write_nlxml_file};
//! use nlxml::simplify::simplify;
//! use nlxml::transform::to_space;
//!
//! let mut tracing = parse_nlxml_file("tracing.xml")?;
//! let gold = parse_nlxml_file("gold.xml")?;
//! simplify(&mut tracing);
//! to_space(&mut tracing, &gold, false)?;
//! write_nlxml_file("tracing_aligned.xml", &tracing)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod diadem;
pub mod model;
pub mod nlxml;
pub mod parser;
pub mod simplify;
pub mod swc;
pub mod transform;

use crate::model::NeuronData;
use crate::parser::parsing_error::ParsingError;
use std::io;
use std::path::Path;

// ============================================================================
// Quick Neurolucida XML API
// ============================================================================
/// Reads and decodes a Neurolucida XML file using default settings.
///
/// See [`nlxml::parse_file`] for full documentation.
pub fn parse_nlxml_file<P: AsRef<Path>>(path: P) -> Result<NeuronData, ParsingError> {
    nlxml::parse_file(path)
}

/// Decodes a Neurolucida XML document held in a string.
///
/// See [`nlxml::parse_str`].
pub fn parse_nlxml_str<S: AsRef<str>>(document: S) -> Result<NeuronData, ParsingError> {
    nlxml::parse_str(document)
}

/// Writes `data` as a Neurolucida XML file using default settings.
///
/// See [`nlxml::write_file`].
pub fn write_nlxml_file<P: AsRef<Path>>(path: P, data: &NeuronData) -> io::Result<()> {
    nlxml::write_file(path, data)
}

// ============================================================================
// Quick SWC API
// ============================================================================
/// Reads an SWC file and reconstructs its trees using default settings.
///
/// See [`swc::parse_file`] for full documentation.
pub fn parse_swc_file<P: AsRef<Path>>(path: P) -> Result<NeuronData, ParsingError> {
    swc::parse_file(path)
}

/// Parses SWC text and reconstructs its trees.
///
/// See [`swc::parse_str`].
pub fn parse_swc_str<S: AsRef<str>>(swc: S) -> Result<NeuronData, ParsingError> {
    swc::parse_str(swc)
}

/// Flattens the trees of `data` and writes them as an SWC file.
///
/// See [`swc::write_file`].
pub fn write_swc_file<P: AsRef<Path>>(path: P, data: &NeuronData) -> io::Result<()> {
    swc::write_file(path, data)
}
