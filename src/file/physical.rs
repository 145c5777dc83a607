//! Memory-mapped backend for class files on disk.
//!
//! Class files are small, but reading a whole classpath directory through this backend still
//! avoids copying every file onto the heap. The mapping is read-only and lives as long as the
//! owning [`crate::file::File`].

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A `.class` file mapped read-only into memory.
#[derive(Debug)]
pub struct Physical {
    map: Mmap,
}

impl Physical {
    /// Map the class file at `path`.
    ///
    /// The content is not inspected here; the magic and structure are checked by the
    /// class-file reader.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the class file cannot be opened, or
    /// [`crate::Error::Error`] if the operating system refuses the mapping.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let class_file = fs::File::open(path).map_err(FileError)?;

        // Safety: read-only mapping, the class file must not be truncated while mapped.
        let map = unsafe { Mmap::map(&class_file) }
            .map_err(|error| Error(format!("cannot map class file: {}", error)))?;

        Ok(Physical { map })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.map
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_class_header() {
        let path =
            std::env::temp_dir().join(format!("sigscope-physical-{}.class", std::process::id()));
        fs::write(&path, [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34]).unwrap();

        let physical = Physical::new(&path).unwrap();
        assert_eq!(physical.len(), 8);
        assert_eq!(&physical.data()[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(&physical.data()[6..], &[0x00, 0x34]);

        drop(physical);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let result = Physical::new("/this/path/does/not/exist.class");
        assert!(matches!(result, Err(FileError(_))));
    }
}
