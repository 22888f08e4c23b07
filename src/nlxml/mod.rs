//! Neurolucida XML ("nested") encoding reader and writer.
//!
//! In this encoding branches nest recursively inside their parent branch:
//! ```text
//! <mbf version="4.0" xmlns="..." xmlns:nl="...">
//!   <tree color="#FF0000" type="Dendrite" leaf="Normal">
//!     <point x="0" y="0" z="0" d="1"/>
//!     <branch leaf="Normal"> <point .../> <branch ...>...</branch> </branch>
//!     <marker type="Dot" name="spine" color="#00FF00" varicosity="false"> <point .../> </marker>
//!   </tree>
//!   <contour name="Soma" shape="Contour" color="#FFFFFF" closed="true"> <point .../> </contour>
//!   <marker ...> <point .../> </marker>
//! </mbf>
//! ```
//!
//! # Quick API
//! * [`parse_file`] - reads and decodes a file
//! * [`parse_str`] / [`decode`] - decodes a document held in memory
//! * [`encode`] - renders a document with default settings
//! * [`write_file`] - writes a document with default settings
//!
//! For control over indentation and image output, configure a [`NlxmlWriter`].
//!
//! # Decoding policy
//! * Unknown elements are skipped with their whole subtree and logged as warnings
//! * Absent attributes take defaults: `leaf` is `Unspecified`, numbers are 0,
//!   strings empty, booleans false, colors black
//! * Present attributes that cannot be read abort decoding with an error

mod color;
mod decoder;
mod defs;
mod reader;
pub mod writer;

pub use self::color::{color_to_string, parse_color};
pub use self::writer::NlxmlWriter;

use crate::model::NeuronData;
use crate::parser::{ByteParser, ParsingError};
use std::io;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads the file at `path` completely and decodes it into a [`NeuronData`].
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [`NeuronData`] - Content of the file
/// * [`ParsingError`] - If file reading fails or the document is invalid
///
/// # Example
/// ```no_run
/// use nlxml::nlxml::parse_file;
///
/// let data = parse_file("purkinje.xml")?;
/// println!("Loaded {} trees", data.trees.len());
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<NeuronData, ParsingError> {
    decoder::decode_document(ByteParser::from_file(path)?)
}

/// Decodes a document held in a string.
///
/// # Example
/// ```
/// use nlxml::nlxml::parse_str;
///
/// let data = parse_str(r#"<mbf><marker type="Dot" name="a"><point x="1" y="2" z="3" d="1"/></marker></mbf>"#)?;
/// assert_eq!(data.markers[0].points[0].y, 2.0);
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(document: S) -> Result<NeuronData, ParsingError> {
    decode(document.as_ref().as_bytes())
}

/// Decodes a document from raw bytes.
pub fn decode(document: &[u8]) -> Result<NeuronData, ParsingError> {
    decoder::decode_document(ByteParser::for_bytes(document))
}

// ============================================================================
// QUICK WRITING API (pub)
// ============================================================================
/// Renders `data` as a document with default [`NlxmlWriter`] settings.
pub fn encode(data: &NeuronData) -> String {
    NlxmlWriter::new().render(data)
}

/// Writes `data` to the file at `path` with default [`NlxmlWriter`] settings.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_file<P: AsRef<Path>>(path: P, data: &NeuronData) -> io::Result<()> {
    NlxmlWriter::new().write_file(data, path)
}
