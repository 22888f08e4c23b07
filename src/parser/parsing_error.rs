//! Error types for reading morphology files.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading the nested (XML) or flat
//! (SWC) encoding, and [ErrorCategory] to classify them.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================€=
/// Error types that can occur while reading a morphology file.
#[derive(PartialEq, Debug, Clone, thiserror::Error)]
pub enum ParsingErrorType {
    /// Reading the file failed.
    #[error("IO error - {0}")]
    IoError(String),
    /// Input ended in the middle of a construct.
    #[error("Unexpected end of file")]
    UnexpectedEOF,
    /// Markup is not well-formed.
    #[error("Invalid markup - {0}")]
    InvalidMarkup(String),
    /// The document contains no root element.
    #[error("Document has no root element")]
    MissingRootElement,
    /// An attribute is present but its value cannot be read.
    #[error("Invalid value {value:?} for attribute '{name}'")]
    InvalidAttribute { name: String, value: String },
    /// A color string is not of the form `#RRGGBB`.
    #[error("Invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    /// A numeric field cannot be parsed.
    #[error("Invalid number {value:?} for {field}")]
    InvalidNumber { field: String, value: String },
    /// A flat record line is malformed.
    #[error("Invalid record - {0}")]
    InvalidRecord(String),
    /// A record names a parent that does not exist.
    #[error("Record {id} references unknown parent {parent_id}")]
    DanglingParent { id: i64, parent_id: i64 },
    /// A record cannot be reached from any root, i.e. its ancestry loops.
    #[error("Record {0} is part of a parent cycle")]
    CyclicParentage(i64),
    /// Two records share an id.
    #[error("Duplicate record id {0}")]
    DuplicateId(i64),
}

/// Coarse classification of a [ParsingErrorType].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed input: markup, attributes, colors, numbers, record lines.
    Format,
    /// Well-formed input that does not describe a coherent tree.
    Structural,
    /// Failure of the underlying file access.
    Io,
}

impl ParsingErrorType {
    /// Returns the [ErrorCategory] of this error type.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParsingErrorType::IoError(_) => ErrorCategory::Io,
            ParsingErrorType::DanglingParent { .. }
            | ParsingErrorType::CyclicParentage(_)
            | ParsingErrorType::DuplicateId(_) => ErrorCategory::Structural,
            _ => ErrorCategory::Format,
        }
    }
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================$=
/// Parsing error with contextual information (position, line and surrounding bytes).
#[derive(Debug, thiserror::Error)]
#[error("{kind}{}", describe_location(.position, .line, .context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    line: Option<usize>,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            line: Some(parser.line_number()),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError from an error type and a byte position already
    /// passed by the parser, e.g. the start of an offending tag.
    pub fn at_position<S: ByteSource>(
        kind: ParsingErrorType,
        parser: &ByteParser<S>,
        position: usize,
    ) -> Self {
        Self {
            kind,
            position,
            line: Some(parser.line_at(position)),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for InvalidMarkup
    pub fn invalid_markup<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidMarkup(msg), parser)
    }

    /// Convenience constructor for InvalidRecord
    pub fn invalid_record<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidRecord(msg), parser)
    }

    /// Convenience constructor for InvalidNumber, located at the start of the number
    pub fn invalid_number<S: ByteSource>(
        parser: &ByteParser<S>,
        start: usize,
        field: &str,
        value: String,
    ) -> Self {
        Self::at_position(
            ParsingErrorType::InvalidNumber {
                field: field.to_string(),
                value,
            },
            parser,
            start,
        )
    }

    /// Create a ParsingError without parser context
    /// (for errors found after reading, e.g. structural ones)
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: 0,
            line: None,
            context: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the [ErrorCategory] of this error
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Get the byte position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the line where the error occurred, if known
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// Renders the location part of a [ParsingError] message.
fn describe_location(position: &usize, line: &Option<usize>, context: &str) -> String {
    let Some(line) = line else {
        return String::new();
    };

    let mut location = format!(" at line {line} (byte {position})");
    if !context.is_empty() {
        location.push_str(&format!(
            "\n  Context (next {} bytes): {}",
            context.len(),
            context
        ));
    }
    location
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
