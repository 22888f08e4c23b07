//! SWC records and their text form.

use crate::model::Point;
use crate::parser::byte_source::ByteSource;
use crate::parser::{ByteParser, ParsingError};
use crate::swc::defs::{COMMENT, FIELD_DELIMITERS, FIELD_NAMES, NO_PARENT, NUM_FIELDS};
use std::fmt;
use std::str::FromStr;

// =#========================================================================#=
// TYPE CODE
// =#========================================================================#=
/// Structure type of an SWC record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    /// 0
    Undefined,
    /// 1
    Soma,
    /// 2
    Axon,
    /// 3
    Dendrite,
    /// 4
    ApicalDendrite,
    /// 5
    Fork,
    /// 6
    End,
    /// 7
    Custom,
    /// Any code outside 0-7, as written by some third-party tools
    Other(i32),
}

impl TypeCode {
    /// Maps a numeric code to a [TypeCode].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => TypeCode::Undefined,
            1 => TypeCode::Soma,
            2 => TypeCode::Axon,
            3 => TypeCode::Dendrite,
            4 => TypeCode::ApicalDendrite,
            5 => TypeCode::Fork,
            6 => TypeCode::End,
            7 => TypeCode::Custom,
            other => TypeCode::Other(other),
        }
    }

    /// Returns the numeric code.
    pub fn code(&self) -> i32 {
        match self {
            TypeCode::Undefined => 0,
            TypeCode::Soma => 1,
            TypeCode::Axon => 2,
            TypeCode::Dendrite => 3,
            TypeCode::ApicalDendrite => 4,
            TypeCode::Fork => 5,
            TypeCode::End => 6,
            TypeCode::Custom => 7,
            TypeCode::Other(code) => *code,
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =#========================================================================#=
// RECORD
// =#========================================================================#=
/// One line of an SWC file: a sample point with a link to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwcRecord {
    pub id: i64,
    pub type_code: TypeCode,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    /// Id of the parent record, [NO_PARENT] for none
    pub parent_id: i64,
}

impl SwcRecord {
    /// Creates a record from a point, storing its diameter channel as radius.
    pub fn from_point(id: i64, type_code: TypeCode, point: &Point, parent_id: i64) -> Self {
        Self {
            id,
            type_code,
            x: point.x,
            y: point.y,
            z: point.z,
            radius: point.diameter,
            parent_id,
        }
    }

    /// Returns the sample as a [Point], the radius going into the diameter channel.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y, self.z, self.radius)
    }

    /// Returns whether this record starts a tree: it has no parent or is soma.
    pub fn is_root(&self) -> bool {
        self.parent_id == NO_PARENT || self.type_code == TypeCode::Soma
    }
}

impl fmt::Display for SwcRecord {
    /// Formats the record as one SWC line (without newline).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.id, self.type_code, self.x, self.y, self.z, self.radius, self.parent_id
        )
    }
}

// =#========================================================================#=
// PARSING
// =#========================================================================#=
/// Parses all records until EOF.
///
/// Blank lines and lines starting with `#` are skipped. Every other line
/// must hold exactly seven whitespace-separated fields.
///
/// # Errors
/// Returns a [ParsingError] of kind `InvalidRecord` for lines with too few
/// or too many fields, and `InvalidNumber` for fields that cannot be read.
pub(crate) fn parse_records<S: ByteSource>(
    parser: &mut ByteParser<S>,
) -> Result<Vec<SwcRecord>, ParsingError> {
    let mut records = Vec::new();
    parser.skip_bom();
    loop {
        parser.skip_inline_whitespace();
        match parser.peek() {
            None => break,
            Some(b'\n') => {
                parser.next_byte();
            }
            Some(COMMENT) => {
                parser.skip_line();
            }
            Some(_) => records.push(parse_record(parser)?),
        }
    }
    Ok(records)
}

/// Parses the seven fields of one record line, including its newline.
fn parse_record<S: ByteSource>(parser: &mut ByteParser<S>) -> Result<SwcRecord, ParsingError> {
    let id = parse_field::<S, i64>(parser, 0)?;
    let type_code = TypeCode::from_code(parse_field(parser, 1)?);
    let x = parse_field(parser, 2)?;
    let y = parse_field(parser, 3)?;
    let z = parse_field(parser, 4)?;
    let radius = parse_field(parser, 5)?;
    let parent_id = parse_field(parser, 6)?;

    parser.skip_inline_whitespace();
    match parser.peek() {
        None => {}
        Some(b'\n') => {
            parser.next_byte();
        }
        Some(_) => {
            return Err(ParsingError::invalid_record(
                parser,
                format!("more than {NUM_FIELDS} fields"),
            ));
        }
    }

    Ok(SwcRecord {
        id,
        type_code,
        x,
        y,
        z,
        radius,
        parent_id,
    })
}

fn parse_field<S: ByteSource, T: FromStr>(
    parser: &mut ByteParser<S>,
    index: usize,
) -> Result<T, ParsingError> {
    parser.skip_inline_whitespace();
    let start = parser.position();
    let token = parser.parse_token(FIELD_DELIMITERS);
    if token.is_empty() {
        return Err(ParsingError::invalid_record(
            parser,
            format!("expected {NUM_FIELDS} fields, found {index}"),
        ));
    }

    token
        .parse::<T>()
        .map_err(|_| ParsingError::invalid_number(parser, start, FIELD_NAMES[index], token))
}
