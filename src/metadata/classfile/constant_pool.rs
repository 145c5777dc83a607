//! The class-file constant pool (JVMS §4.4).
//!
//! Entries are decoded eagerly into [`ConstantInfo`] values. Index 0 and the slot following
//! every `Long` and `Double` entry are unusable, so the pool is stored as a vector whose
//! positions match the class file's one-based indices.

use crate::{file::parser::Parser, Result};

/// `CONSTANT_Utf8`
pub const TAG_UTF8: u8 = 1;
/// `CONSTANT_Integer`
pub const TAG_INTEGER: u8 = 3;
/// `CONSTANT_Float`
pub const TAG_FLOAT: u8 = 4;
/// `CONSTANT_Long`
pub const TAG_LONG: u8 = 5;
/// `CONSTANT_Double`
pub const TAG_DOUBLE: u8 = 6;
/// `CONSTANT_Class`
pub const TAG_CLASS: u8 = 7;
/// `CONSTANT_String`
pub const TAG_STRING: u8 = 8;
/// `CONSTANT_Fieldref`
pub const TAG_FIELD_REF: u8 = 9;
/// `CONSTANT_Methodref`
pub const TAG_METHOD_REF: u8 = 10;
/// `CONSTANT_InterfaceMethodref`
pub const TAG_INTERFACE_METHOD_REF: u8 = 11;
/// `CONSTANT_NameAndType`
pub const TAG_NAME_AND_TYPE: u8 = 12;
/// `CONSTANT_MethodHandle`
pub const TAG_METHOD_HANDLE: u8 = 15;
/// `CONSTANT_MethodType`
pub const TAG_METHOD_TYPE: u8 = 16;
/// `CONSTANT_Dynamic`
pub const TAG_DYNAMIC: u8 = 17;
/// `CONSTANT_InvokeDynamic`
pub const TAG_INVOKE_DYNAMIC: u8 = 18;
/// `CONSTANT_Module`
pub const TAG_MODULE: u8 = 19;
/// `CONSTANT_Package`
pub const TAG_PACKAGE: u8 = 20;

/// One constant-pool entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantInfo {
    /// Decoded modified UTF-8 text
    Utf8(String),
    /// 32-bit integer
    Integer(i32),
    /// 32-bit float
    Float(f32),
    /// 64-bit integer, occupies two slots
    Long(i64),
    /// 64-bit float, occupies two slots
    Double(f64),
    /// Class or interface reference
    Class {
        /// Utf8 entry with the internal (slash-separated) name
        name_index: u16,
    },
    /// String literal
    String {
        /// Utf8 entry with the text
        string_index: u16,
    },
    /// Field reference
    FieldRef {
        /// Class entry of the declaring type
        class_index: u16,
        /// NameAndType entry
        name_and_type_index: u16,
    },
    /// Method reference
    MethodRef {
        /// Class entry of the declaring type
        class_index: u16,
        /// NameAndType entry
        name_and_type_index: u16,
    },
    /// Interface method reference
    InterfaceMethodRef {
        /// Class entry of the declaring interface
        class_index: u16,
        /// NameAndType entry
        name_and_type_index: u16,
    },
    /// Name and descriptor pair
    NameAndType {
        /// Utf8 entry with the member name
        name_index: u16,
        /// Utf8 entry with the descriptor
        descriptor_index: u16,
    },
    /// Method handle
    MethodHandle {
        /// Kind of handle, 1..=9
        reference_kind: u8,
        /// Referenced field or method entry
        reference_index: u16,
    },
    /// Method type
    MethodType {
        /// Utf8 entry with the method descriptor
        descriptor_index: u16,
    },
    /// Dynamically-computed constant
    Dynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// NameAndType entry
        name_and_type_index: u16,
    },
    /// Dynamically-computed call site
    InvokeDynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// NameAndType entry
        name_and_type_index: u16,
    },
    /// Module
    Module {
        /// Utf8 entry with the module name
        name_index: u16,
    },
    /// Package
    Package {
        /// Utf8 entry with the internal package name
        name_index: u16,
    },
    /// Index 0 and the second slot of `Long`/`Double`
    Unusable,
}

/// The decoded constant pool of one class file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstantPool {
    entries: Vec<ConstantInfo>,
}

impl ConstantPool {
    /// Read `constant_pool_count` and the entries that follow it.
    ///
    /// ## Arguments
    /// * 'parser' - Positioned at `constant_pool_count`
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for unknown tags and [`crate::Error::OutOfBounds`]
    /// on truncated input.
    pub fn read(parser: &mut Parser) -> Result<Self> {
        let count = usize::from(parser.read_be::<u16>()?);
        let mut entries = Vec::with_capacity(count.max(1));
        entries.push(ConstantInfo::Unusable);

        while entries.len() < count {
            let offset = parser.pos();
            let tag = parser.read_be::<u8>()?;
            let entry = match tag {
                TAG_UTF8 => ConstantInfo::Utf8(decode_modified_utf8(
                    parser.read_prefixed_bytes_u16()?,
                )),
                TAG_INTEGER => ConstantInfo::Integer(parser.read_be::<i32>()?),
                TAG_FLOAT => ConstantInfo::Float(parser.read_be::<f32>()?),
                TAG_LONG => ConstantInfo::Long(parser.read_be::<i64>()?),
                TAG_DOUBLE => ConstantInfo::Double(parser.read_be::<f64>()?),
                TAG_CLASS => ConstantInfo::Class {
                    name_index: parser.read_be::<u16>()?,
                },
                TAG_STRING => ConstantInfo::String {
                    string_index: parser.read_be::<u16>()?,
                },
                TAG_FIELD_REF => ConstantInfo::FieldRef {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                TAG_METHOD_REF => ConstantInfo::MethodRef {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                TAG_INTERFACE_METHOD_REF => ConstantInfo::InterfaceMethodRef {
                    class_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                TAG_NAME_AND_TYPE => ConstantInfo::NameAndType {
                    name_index: parser.read_be::<u16>()?,
                    descriptor_index: parser.read_be::<u16>()?,
                },
                TAG_METHOD_HANDLE => ConstantInfo::MethodHandle {
                    reference_kind: parser.read_be::<u8>()?,
                    reference_index: parser.read_be::<u16>()?,
                },
                TAG_METHOD_TYPE => ConstantInfo::MethodType {
                    descriptor_index: parser.read_be::<u16>()?,
                },
                TAG_DYNAMIC => ConstantInfo::Dynamic {
                    bootstrap_method_attr_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                TAG_INVOKE_DYNAMIC => ConstantInfo::InvokeDynamic {
                    bootstrap_method_attr_index: parser.read_be::<u16>()?,
                    name_and_type_index: parser.read_be::<u16>()?,
                },
                TAG_MODULE => ConstantInfo::Module {
                    name_index: parser.read_be::<u16>()?,
                },
                TAG_PACKAGE => ConstantInfo::Package {
                    name_index: parser.read_be::<u16>()?,
                },
                _ => {
                    return Err(malformed_error!(
                        "Unknown constant pool tag {} at offset {}",
                        tag,
                        offset
                    ))
                }
            };

            let wide = matches!(entry, ConstantInfo::Long(_) | ConstantInfo::Double(_));
            entries.push(entry);
            if wide {
                entries.push(ConstantInfo::Unusable);
            }
        }

        // A trailing Long/Double may claim a slot past the declared count
        entries.truncate(count.max(1));
        Ok(ConstantPool { entries })
    }

    /// The entry at a one-based class-file index.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the index is 0, out of range or names the
    /// unusable second slot of a wide entry.
    pub fn get(&self, index: u16) -> Result<&ConstantInfo> {
        match self.entries.get(usize::from(index)) {
            Some(ConstantInfo::Unusable) | None => Err(malformed_error!(
                "Invalid constant pool index {} (pool size {})",
                index,
                self.entries.len()
            )),
            Some(entry) => Ok(entry),
        }
    }

    /// The text of a `Utf8` entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the index is invalid or not a `Utf8` entry.
    pub fn utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            ConstantInfo::Utf8(text) => Ok(text),
            other => Err(malformed_error!(
                "Constant pool entry {} is not Utf8: {:?}",
                index,
                other
            )),
        }
    }

    /// The internal (slash-separated) name of a `Class` entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the index is invalid or not a `Class` entry.
    pub fn class_name(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            ConstantInfo::Class { name_index } => self.utf8(*name_index),
            other => Err(malformed_error!(
                "Constant pool entry {} is not a class: {:?}",
                index,
                other
            )),
        }
    }

    /// Number of slots including index 0, as declared by `constant_pool_count`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pool has no usable entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Iterate over `(index, entry)` for every usable entry.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ConstantInfo)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !matches!(entry, ConstantInfo::Unusable))
    }
}

/// Decode modified UTF-8 (JVMS §4.4.7).
///
/// Every sequence is decoded to a UTF-16 code unit first, so the two-byte null `C0 80` maps to
/// `U+0000` and supplementary characters stored as two three-byte surrogates are joined again.
/// Unpaired surrogates and invalid sequences become `U+FFFD`.
#[must_use]
pub fn decode_modified_utf8(bytes: &[u8]) -> String {
    if bytes.is_ascii() {
        return String::from_utf8_lossy(bytes).into_owned();
    }

    let continuation = |offset: usize| {
        bytes
            .get(offset)
            .filter(|byte| *byte & 0xC0 == 0x80)
            .map(|byte| u16::from(byte & 0x3F))
    };

    let mut units = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        let lead = bytes[index];
        match lead {
            0x00..=0x7F => {
                units.push(u16::from(lead));
                index += 1;
            }
            0xC0..=0xDF => match continuation(index + 1) {
                Some(low) => {
                    units.push((u16::from(lead & 0x1F) << 6) | low);
                    index += 2;
                }
                None => {
                    units.push(0xFFFD);
                    index += 1;
                }
            },
            0xE0..=0xEF => match (continuation(index + 1), continuation(index + 2)) {
                (Some(mid), Some(low)) => {
                    units.push((u16::from(lead & 0x0F) << 12) | (mid << 6) | low);
                    index += 3;
                }
                _ => {
                    units.push(0xFFFD);
                    index += 1;
                }
            },
            // Standard four-byte UTF-8 is not valid here but still decodes
            0xF0..=0xF7 => match std::str::from_utf8(&bytes[index..bytes.len().min(index + 4)]) {
                Ok(text) => {
                    units.extend(text.encode_utf16());
                    index += 4;
                }
                Err(_) => {
                    units.push(0xFFFD);
                    index += 1;
                }
            },
            _ => {
                units.push(0xFFFD);
                index += 1;
            }
        }
    }

    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
