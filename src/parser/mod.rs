//! Basic low-level byte parser functionality.
//!
//! This module provides the byte parser shared by the markup reader
//! ([crate::nlxml]) and the SWC reader ([crate::swc]), together with the
//! crate's error type and markup escaping helpers.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ErrorCategory, ParsingError, ParsingErrorType};
