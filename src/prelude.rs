//! # sigscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the sigscope library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all sigscope operations
pub use crate::Error;

/// The result type used throughout sigscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Reading compiled classes
pub use crate::ClassFile;

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Decoding
// ================================================================================================

/// Decoder configuration
pub use crate::metadata::config::{ArrayDecoding, DecoderConfig, SynchronizedSlot};

/// Method metadata and the parameter decoder
pub use crate::metadata::method::{
    decode_field_type, param_names, slot_offset, LocalVariable, LocalVariableTable,
    MethodAccessFlags, MethodDecoder, MethodInfo, MethodSummary,
};

/// Descriptor tokenization and parsing
pub use crate::metadata::descriptor::{
    has_precision_loss, param_type_names, parse_field_descriptor, parse_method_descriptor,
    FieldType, MethodDescriptor, ReturnType,
};

// ================================================================================================
// Type System
// ================================================================================================

/// Core type system components
pub use crate::metadata::typesystem::{
    JvmFlavor, JvmType, JvmTypeRc, PrimitiveKind, TypeRegistry, TypeResolver,
};
