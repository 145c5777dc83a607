//! Access to raw class-file bytes.
//!
//! A [`crate::file::File`] owns the bytes of one compiled class, either read into memory or
//! memory-mapped from disk, and hands them to the class-file reader. The
//! [`crate::file::parser::Parser`] provides the bounds-checked cursor used for decoding.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - Owner of the class-file bytes
//! - [`crate::file::parser::Parser`] - Big-endian cursor over a byte slice
//! - [`crate::file::io`] - Primitive big-endian reads

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Storage of the raw bytes behind a [`File`].
pub trait Backend: Send + Sync {
    /// The complete data.
    fn data(&self) -> &[u8];

    /// Length of the data in bytes.
    fn len(&self) -> usize;
}

/// The bytes of a single compiled class.
pub struct File {
    data: Box<dyn Backend>,
}

impl File {
    /// Memory-map a class file from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened and
    /// [`crate::Error::Empty`] if it has no content.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Take ownership of in-memory class-file bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
        })
    }

    /// Length of the class file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the file has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complete class-file data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }
}
