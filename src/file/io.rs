//! Big-endian, bounds-checked reading of primitive values.
//!
//! The class-file format stores every multi-byte quantity in big-endian order (JVMS §4).
//! This module provides the [`crate::file::io::ClassIO`] trait and the free functions built on
//! it, which the [`crate::file::parser::Parser`] uses for all of its reads.
//!
//! # Key Components
//!
//! - [`crate::file::io::ClassIO`] - Trait for primitive types that can be decoded from bytes
//! - [`crate::file::io::read_be`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_be_at`] - Read a value at an offset and advance the offset
//!
//! # Examples
//!
//! ```rust,ignore
//! use sigscope::file::io::read_be_at;
//!
//! let data = [0x00, 0x01, 0x00, 0x02];
//! let mut offset = 0;
//!
//! let first: u16 = read_be_at(&data, &mut offset)?;
//! assert_eq!(first, 1);
//! assert_eq!(offset, 2);
//! # Ok::<(), sigscope::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive types that can be decoded from a fixed-size big-endian byte array.
///
/// All implementations are pure conversions and are safe to use from multiple threads.
pub trait ClassIO: Sized {
    /// Byte array type for this numeric type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_class_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl ClassIO for $ty {
                type Bytes = [u8; $len];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_class_io! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}

/// Safely reads a value of type `T` in big-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_be<T: ClassIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a value of type `T` in big-endian byte order at `offset`, advancing the offset
/// by the number of bytes read.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes after `offset`.
pub fn read_be_at<T: ClassIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_be_bytes(read))
}
