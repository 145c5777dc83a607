//! Method metadata and parameter decoding.
//!
//! A [`MethodInfo`] carries the three pieces of compiled-method metadata the decoder needs:
//! the access flags, the descriptor and the optional local-variable debug table. The
//! [`MethodDecoder`] turns them into per-parameter type tokens, best-effort parameter names and
//! resolved type handles, collected in a [`MethodSummary`].
//!
//! # Parameter slots
//!
//! Parameter names are looked up by local-variable slot. Parameter `i` lives in slot
//! `i + slot_offset(..)`, where the offset skips the receiver of instance methods and, with the
//! default configuration, one further slot for synchronized methods. See [`slot_offset`].
//!
//! # Examples
//!
//! ```rust
//! use sigscope::{metadata::method::param_names, MethodInfo};
//!
//! let method = MethodInfo::new(0x0009, "main", "([Ljava/lang/String;)V");
//! assert_eq!(param_names(&method), vec!["0"]);
//! ```

mod decoder;
mod types;

pub use decoder::MethodDecoder;
pub use types::*;

use crate::{
    metadata::{
        config::DecoderConfig,
        descriptor::{self, MethodDescriptor},
        typesystem::{JvmTypeRc, TypeResolver},
    },
    Result,
};

/// The local-variable slot of a method's first declared parameter.
///
/// Instance methods keep their receiver in slot 0, so their parameters start one slot later.
/// Synchronized methods are counted as reserving one more slot; the JVM does not do this, and
/// callers that need the JVM's layout pass `is_synchronized = false` or use
/// [`crate::metadata::config::SynchronizedSlot::Ignored`].
///
/// ## Arguments
/// * 'is_static' - The method is static
/// * 'is_synchronized' - The method is synchronized
#[must_use]
pub fn slot_offset(is_static: bool, is_synchronized: bool) -> usize {
    let mut offset = 0;
    if is_synchronized {
        offset += 1;
    }
    if !is_static {
        offset += 1;
    }
    offset
}

/// Parameter names of `method` with the default configuration.
///
/// No resolver is involved in naming, so none is required.
#[must_use]
pub fn param_names(method: &MethodInfo) -> Vec<String> {
    let resolver = |_: &str| -> Option<JvmTypeRc> { None };
    MethodDecoder::new(&resolver).param_names(method)
}

/// Decode a single parameter type token with the default configuration.
///
/// # Errors
/// Returns [`crate::Error::TypeNotResolvable`] if an object reference cannot be resolved.
pub fn decode_field_type<R: TypeResolver + ?Sized>(
    token: &str,
    resolver: &R,
) -> Result<Option<JvmTypeRc>> {
    MethodDecoder::new(resolver).decode_field_type(token)
}

/// Metadata of one compiled method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Access and property flags
    pub access_flags: MethodAccessFlags,
    /// Method name
    pub name: String,
    /// Method descriptor, e.g. `(Ljava/lang/String;)V`
    pub descriptor: String,
    /// Debug names of local-variable slots, if the class was compiled with them
    pub local_variables: Option<LocalVariableTable>,
}

impl MethodInfo {
    /// Create method metadata without a local-variable table.
    ///
    /// ## Arguments
    /// * 'access_flags' - Raw `access_flags` value
    /// * 'name' - Method name
    /// * 'descriptor' - Method descriptor
    pub fn new(access_flags: u16, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        MethodInfo {
            access_flags: MethodAccessFlags::from_raw(access_flags),
            name: name.into(),
            descriptor: descriptor.into(),
            local_variables: None,
        }
    }

    /// Attach a local-variable table.
    #[must_use]
    pub fn with_local_variables(mut self, table: LocalVariableTable) -> Self {
        self.local_variables = Some(table);
        self
    }

    /// Returns `true` if the method is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.access_flags.is_static()
    }

    /// Returns `true` if the method is synchronized.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.access_flags.is_synchronized()
    }

    /// Per-parameter type tokens, see [`crate::metadata::descriptor::param_type_names`].
    #[must_use]
    pub fn param_type_names(&self) -> Vec<String> {
        descriptor::param_type_names(&self.descriptor)
    }

    /// Strictly parse the descriptor.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the descriptor does not follow the grammar.
    pub fn parsed_descriptor(&self) -> Result<MethodDescriptor> {
        descriptor::parse_method_descriptor(&self.descriptor)
    }

    /// Summarize with `resolver` and `config`.
    ///
    /// # Errors
    /// Returns [`crate::Error::ClasspathAccess`] if a parameter type cannot be resolved.
    pub fn summarize<R: TypeResolver + ?Sized>(
        &self,
        resolver: &R,
        config: DecoderConfig,
    ) -> Result<MethodSummary> {
        MethodDecoder::new(resolver)
            .with_config(config)
            .summarize(self)
    }
}

/// Everything the decoder extracts from one method.
///
/// The three per-parameter vectors always have the same length.
#[derive(Debug, Clone)]
pub struct MethodSummary {
    /// Method name
    pub name: String,
    /// Method descriptor
    pub descriptor: String,
    /// Type token per parameter
    pub param_type_names: Vec<String>,
    /// Name per parameter
    pub param_names: Vec<String>,
    /// Resolved handle per parameter, `None` for tokens without one
    pub param_types: Vec<Option<JvmTypeRc>>,
    /// `true` if the descriptor is well-formed but its tokens do not separate every parameter
    pub precision_loss: bool,
}

impl MethodSummary {
    /// Number of parameter tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.param_type_names.len()
    }

    /// Returns `true` if the method has no parameter tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.param_type_names.is_empty()
    }

    /// `(name, handle)` per parameter.
    pub fn params(&self) -> impl Iterator<Item = (&str, Option<&JvmTypeRc>)> {
        self.param_names
            .iter()
            .map(String::as_str)
            .zip(self.param_types.iter().map(Option::as_ref))
    }
}
