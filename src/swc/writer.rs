//! SWC file writing.

use crate::swc::record::SwcRecord;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Rough number of bytes per written record, used to presize the output
const BYTES_PER_RECORD: usize = 40;

/// Writer for SWC records, one line per record.
///
/// # Example
/// ```
/// use nlxml::model::Point;
/// use nlxml::swc::{SwcRecord, SwcWriter, TypeCode};
///
/// let records = vec![SwcRecord::from_point(1, TypeCode::Soma, &Point::new(0.0, 0.0, 0.0, 2.0), -1)];
/// let text = SwcWriter::new().with_header("converted from purkinje.xml").render(&records);
/// assert_eq!(text, "# converted from purkinje.xml\n1 1 0 0 0 2 -1\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwcWriter {
    header: Option<String>,
}

impl SwcWriter {
    /// Creates a writer without header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header written as `#` comment lines before the records.
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    /// Renders all records as SWC text.
    pub fn render(&self, records: &[SwcRecord]) -> String {
        let mut out = String::with_capacity((records.len() + 1) * BYTES_PER_RECORD);
        if let Some(header) = &self.header {
            for line in header.lines() {
                let _ = writeln!(out, "# {line}");
            }
        }
        for record in records {
            let _ = writeln!(out, "{record}");
        }
        out
    }

    /// Writes all records to `writer`.
    ///
    /// # Errors
    /// Returns an I/O error if writing fails.
    pub fn write<W: Write>(&self, records: &[SwcRecord], writer: W) -> io::Result<()> {
        let mut writer = BufWriter::new(writer);
        writer.write_all(self.render(records).as_bytes())?;
        writer.flush()
    }

    /// Writes all records to the file at `path`, replacing existing content.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be created or written.
    pub fn write_file<P: AsRef<Path>>(&self, records: &[SwcRecord], path: P) -> io::Result<()> {
        self.write(records, File::create(path)?)
    }
}
