//! Constants for reading and writing SWC files.

/// Parent id of a record without parent
pub const NO_PARENT: i64 = -1;

/// Number of fields of a record: `id type x y z radius parent`
pub(crate) const NUM_FIELDS: usize = 7;

/// Delimiters between the fields of a record
pub(crate) const FIELD_DELIMITERS: &[u8] = b" \t\r\n";

/// Start of a comment line
pub(crate) const COMMENT: u8 = b'#';

/// Field names, in order, for error messages
pub(crate) const FIELD_NAMES: [&str; NUM_FIELDS] =
    ["id", "type", "x", "y", "z", "radius", "parent"];
