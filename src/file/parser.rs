//! Low-level byte stream parser for class-file decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data
//! parser for reading the structures of a compiled JVM class file. Every read is bounds-checked
//! and fails with [`crate::Error::OutOfBounds`] instead of panicking on truncated input.
//!
//! # Usage Examples
//!
//! ```rust
//! use sigscope::Parser;
//!
//! let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x41];
//! let mut parser = Parser::new(&data);
//!
//! let magic = parser.read_be::<u32>()?;
//! assert_eq!(magic, 0xCAFE_BABE);
//!
//! parser.seek(6)?;
//! assert_eq!(parser.read_be::<u16>()?, 0x41);
//! # Ok::<(), sigscope::Error>(())
//! ```

use crate::{file::io::read_be_at, file::io::ClassIO, Result};

/// A cursor over a byte slice with big-endian, bounds-checked reads.
///
/// The parser maintains an internal position and never reads past the end of the data.
/// Slices returned by [`Parser::read_bytes`] borrow from the original input.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there are unread bytes left.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move the cursor to an absolute position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `pos` is past the end of the data.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the cursor forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if no byte is left.
    pub fn advance(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    /// Move the cursor forward by `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `step` bytes are left.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if step > self.remaining() {
            return Err(out_of_bounds_error!());
        }

        self.position += step;
        Ok(())
    }

    /// Current position of the cursor.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// The complete underlying data.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Peek at the current byte without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at the end of the data.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Read a big-endian value of type `T` and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the value does not fit in the remaining data.
    pub fn read_be<T: ClassIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Read `len` raw bytes and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `len` bytes are left.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(out_of_bounds_error!());
        }

        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Read a `u16` length prefix followed by that many bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input.
    pub fn read_prefixed_bytes_u16(&mut self) -> Result<&'a [u8]> {
        let len = self.read_be::<u16>()?;
        self.read_bytes(usize::from(len))
    }
}
