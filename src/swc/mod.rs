//! SWC ("flat") encoding reader and writer.
//!
//! SWC stores one sample per line, linked to its parent by id:
//! ```text
//! # id type x y z radius parent
//! 1 1 0 0 0 5 -1
//! 2 3 4 0 0 1 1
//! 3 6 8 0 0 1 2
//! ```
//! Type codes: 0 undefined, 1 soma, 2 axon, 3 dendrite, 4 apical dendrite,
//! 5 fork, 6 end, 7 custom. A record with parent `-1` or type soma starts a
//! new tree; there is no other tree separator.
//!
//! # Quick API
//! * [`parse_file`] / [`parse_str`] - read and reconstruct trees
//! * [`reconstruct`] - reconstruct trees from records
//! * [`flatten`] - turn trees into records
//! * [`to_swc_string`] / [`write_file`] - flatten and render
//!
//! Use [`SwcReader`] to accept records with a dangling parent as roots, and
//! [`SwcWriter`] to write a header comment.

mod defs;
mod flatten;
mod reconstruct;
mod record;
pub mod writer;

pub use self::defs::NO_PARENT;
pub use self::flatten::flatten;
pub use self::reconstruct::{SwcReader, reconstruct};
pub use self::record::{SwcRecord, TypeCode};
pub use self::writer::SwcWriter;

use crate::model::NeuronData;
use crate::parser::{ByteParser, ParsingError};
use std::io;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Reads the SWC file at `path` completely and reconstructs its trees.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [`NeuronData`] - One tree per root record
/// * [`ParsingError`] - If file reading fails, a record is malformed, or the
///   records do not form a forest
///
/// # Example
/// ```no_run
/// use nlxml::swc::parse_file;
///
/// let data = parse_file("pyramidal.swc")?;
/// println!("Reconstructed {} trees", data.trees.len());
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<NeuronData, ParsingError> {
    SwcReader::new().parse_file(path)
}

/// Parses SWC text and reconstructs its trees.
pub fn parse_str<S: AsRef<str>>(swc: S) -> Result<NeuronData, ParsingError> {
    SwcReader::new().parse_str(swc)
}

/// Parses SWC text into records without reconstructing trees.
///
/// # Example
/// ```
/// use nlxml::swc::{TypeCode, parse_records};
///
/// let records = parse_records("# comment\n1 1 0 0 0 1 -1\n")?;
/// assert_eq!(records[0].type_code, TypeCode::Soma);
/// # Ok::<(), nlxml::parser::ParsingError>(())
/// ```
pub fn parse_records<S: AsRef<str>>(swc: S) -> Result<Vec<SwcRecord>, ParsingError> {
    let mut parser = ByteParser::for_str(swc.as_ref());
    record::parse_records(&mut parser)
}

// ============================================================================
// QUICK WRITING API (pub)
// ============================================================================
/// Flattens `data` and renders the records as SWC text.
pub fn to_swc_string(data: &NeuronData) -> String {
    SwcWriter::new().render(&flatten(data))
}

/// Flattens `data` and writes the records to the file at `path`.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or written.
pub fn write_file<P: AsRef<Path>>(path: P, data: &NeuronData) -> io::Result<()> {
    SwcWriter::new().write_file(&flatten(data), path)
}
