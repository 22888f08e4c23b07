//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait and the in-memory
//! implementation [InMemoryByteSource] used by both the markup reader and
//! the SWC record reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================T=
/// Trait defining the interface for byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// Morphology files are read completely before decoding starts, so the
/// crate itself only ships [InMemoryByteSource]; the trait keeps the parser
/// independent of where its bytes live.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns a slice of up to `k` bytes from the current position without allocating.
    fn peek_slice(&self, k: usize) -> &[u8];

    /// Returns up to `k` bytes from the current position for error context.
    fn get_context(&self, k: usize) -> Vec<u8>;

    /// Returns the bytes from `start` up to the current position,
    /// or `None` if `start` lies beyond it.
    fn slice_from(&self, start: usize) -> Option<&[u8]>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Sets the position in the byte stream.
    fn set_position(&mut self, pos: usize);

    /// Returns the 1-based line number of the byte at `pos`.
    fn line_at(&self, pos: usize) -> usize;

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================$=
/// An in-memory byte source that owns its data.
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte slice
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the entire file at `path` into memory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<InMemoryByteSource> {
        let mut contents = Vec::new();
        let mut file = File::open(path)?;
        file.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline(always)]
    fn peek_slice(&self, k: usize) -> &[u8] {
        let start = self.pos.min(self.input.len());
        let end = (self.pos + k).min(self.input.len());
        &self.input[start..end]
    }

    fn get_context(&self, k: usize) -> Vec<u8> {
        self.peek_slice(k).to_vec()
    }

    fn slice_from(&self, start: usize) -> Option<&[u8]> {
        let end = self.pos.min(self.input.len());
        if start > end {
            return None;
        }
        Some(&self.input[start..end])
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn line_at(&self, pos: usize) -> usize {
        let end = pos.min(self.input.len());
        1 + self.input[..end].iter().filter(|&&b| b == b'\n').count()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_at_counts_newlines() {
        let source = InMemoryByteSource::from_vec(b"1 1 0 0 0 1 -1\n\n2 0 1 0 0 1 1\n".to_vec());
        assert_eq!(source.line_at(0), 1);
        assert_eq!(source.line_at(15), 2);
        assert_eq!(source.line_at(16), 3);
        assert_eq!(source.line_at(1000), 4);
    }

    #[test]
    fn test_slice_from() {
        let mut source = InMemoryByteSource::from_vec(b"<point/>".to_vec());
        source.set_position(6);
        assert_eq!(source.slice_from(1), Some(&b"point"[..]));
        assert_eq!(source.slice_from(7), None);
    }
}
