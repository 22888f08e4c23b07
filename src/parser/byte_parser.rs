//! Low-level byte-by-byte parser for text formats.
//!
//! This module provides [ByteParser] for parsing text-based file formats with
//! support for peeking, consuming, pattern matching, and token extraction.
//! Used as the foundation for both the markup reader and the SWC reader.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use crate::parser::utils::bytes_to_string;
use std::path::Path;

/// UTF-8 encoding of U+FEFF, written by some editors at the start of a file.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and pattern matching.
///
/// [ByteParser] provides the parsing operations shared by the markup reader
/// and the SWC reader. It operates on a [ByteSource]; matching is exact
/// (case-sensitive), as both the markup encoding and SWC are.
///
/// # Features
/// - Works with any [ByteSource]
/// - Whitespace skipping (all whitespace, or within a line only)
/// - Token extraction up to a delimiter set
/// - Context extraction and line numbers for error reporting
///
/// # Example
/// ```
/// use nlxml::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  <point x=\"1\"/>");
/// parser.skip_whitespace();
/// assert!(parser.consume_if(b'<'));
/// assert_eq!(parser.parse_token(b" />"), "point");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new `ByteParser` holding the complete content of the file at `path`.
    ///
    /// # Errors
    /// Returns a [ParsingError] of kind `IoError` if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) spaces, tabs and carriage returns, but stops at a newline.
    ///
    /// Used by line-oriented formats where the newline terminates a record.
    pub fn skip_inline_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Consumes the rest of the current line including its newline.
    ///
    /// # Returns
    /// `true` if a newline was consumed, `false` if EOF was reached first
    pub fn skip_line(&mut self) -> bool {
        self.consume_until(b'\n', ConsumeMode::Inclusive)
    }

    /// Checks if the current byte matches the target byte.
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Checks if the following bytes match the given byte sequence.
    ///
    /// This is a peek operation - the parser position is not changed.
    #[inline]
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        self.source.peek_slice(sequence.len()) == sequence
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given byte sequence.
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        self.source.set_position(self.position() + sequence.len());
        true
    }

    /// Consumes a UTF-8 byte order mark at the current position, if present.
    ///
    /// # Returns
    /// `true` if a byte order mark was consumed
    pub fn skip_bom(&mut self) -> bool {
        self.consume_if_sequence(UTF8_BOM)
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Consumes bytes until any of the target bytes is found.
    ///
    /// # Returns
    /// `Some(u8)` with the found byte, or `None` if EOF was reached first
    pub fn consume_until_any(&mut self, targets: &[u8], mode: ConsumeMode) -> Option<u8> {
        while let Some(b) = self.peek() {
            if targets.contains(&b) {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return Some(b);
            }
            self.next_byte();
        }
        None
    }

    /// Consumes bytes until the next bytes match the given byte sequence.
    ///
    /// # Returns
    /// `true` if the sequence was found, `false` if EOF was reached first
    pub fn consume_until_sequence(&mut self, sequence: &[u8], mode: ConsumeMode) -> bool {
        loop {
            if self.is_eof() {
                return false;
            }

            if self.peek_is_sequence(sequence) {
                if mode == ConsumeMode::Inclusive {
                    self.consume_if_sequence(sequence);
                }
                return true;
            }

            self.next_byte();
        }
    }

    /// Consumes bytes up to the given sequence and returns them, consuming
    /// the sequence itself as well.
    ///
    /// # Returns
    /// `Some(bytes)` before the sequence, or `None` if EOF was reached first
    pub fn take_until_sequence(&mut self, sequence: &[u8]) -> Option<Vec<u8>> {
        let start = self.position();
        if !self.consume_until_sequence(sequence, ConsumeMode::Exclusive) {
            return None;
        }
        let taken = self.slice_from(start).to_vec();
        self.consume_if_sequence(sequence);
        Some(taken)
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position (byte offset) in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Sets the position in the byte stream.
    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos);
    }

    /// Returns the 1-based line number of the current position.
    pub fn line_number(&self) -> usize {
        self.source.line_at(self.position())
    }

    /// Returns the 1-based line number of the byte at `pos`.
    pub fn line_at(&self, pos: usize) -> usize {
        self.source.line_at(pos)
    }

    /// Returns a slice of the input from a start position to the current position.
    ///
    /// Returns an empty slice if `start` lies beyond the current position.
    pub fn slice_from(&self, start: usize) -> &[u8] {
        self.source.slice_from(start).unwrap_or(&[])
    }

    /// Returns up to `k` bytes from the current position for error context.
    pub fn get_context(&self, k: usize) -> Vec<u8> {
        self.source.get_context(k)
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let context_bytes = &self.get_context(k);
        String::from_utf8_lossy(context_bytes).into_owned()
    }

    /// Parses a token until any of the given delimiters (or EOF) is encountered.
    ///
    /// The delimiter itself is not consumed. An empty string is returned if
    /// the parser is already positioned at a delimiter.
    pub fn parse_token(&mut self, delimiters: &[u8]) -> String {
        let start = self.position();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            self.next_byte();
        }
        bytes_to_string(self.slice_from(start))
    }

    /// Parses a value enclosed in the quote byte found at the current position
    /// (`"` or `'`), returning the raw bytes between the quotes.
    ///
    /// # Errors
    /// Returns an error if the parser is not positioned at a quote or if the
    /// closing quote is missing.
    pub fn parse_quoted(&mut self) -> Result<Vec<u8>, ParsingError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(ParsingError::invalid_markup(
                    self,
                    "expected quoted value".to_string(),
                ));
            }
        };
        self.next_byte();

        let start = self.position();
        if !self.consume_until(quote, ConsumeMode::Exclusive) {
            return Err(ParsingError::unexpected_eof(self));
        }
        let value = self.slice_from(start).to_vec();
        self.next_byte(); // closing quote

        Ok(value)
    }
}

/// Specifies whether to consume or leave the target when using `consume_until` methods.
///
/// # Examples
/// ```
/// use nlxml::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("<!-- traced by hand --><tree>");
///
/// // Inclusive: consume up to and including the comment end
/// parser.consume_until_sequence(b"-->", ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'<'));
///
/// let mut parser = ByteParser::for_str("name=\"Soma\"");
///
/// // Exclusive: stop right at the opening quote
/// parser.consume_until(b'"', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'"'));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte/sequence along with everything before it.
    Inclusive,

    /// Stop before the target byte/sequence without consuming it.
    Exclusive,
}
