//! Method and field descriptor handling.
//!
//! Descriptors encode parameter and return types as compact strings, for example
//! `(ILjava/lang/String;)V` for `void m(int, String)`. Two independent readers live here:
//!
//! - [`param_type_names`] splits the parameter section into tokens on `;`. This is the rule
//!   parameter names and parameter types are derived from, and it is reproduced exactly,
//!   including its blind spot: primitives that are not followed by a reference type stay
//!   glued together (`(IJ)V` yields the single token `"IJ"`). It never fails.
//! - [`DescriptorParser`] follows the descriptor grammar exactly and rejects malformed input.
//!   It is used to detect when the token splitter lost precision ([`has_precision_loss`]) and
//!   to decode array tokens element by element when that is enabled.
//!
//! # Grammar
//!
//! ```text
//! MethodDescriptor ::= "(" ParamType* ")" ReturnType
//! ParamType        ::= PrimitiveTag | "L" ClassName ";" | "[" ParamType
//! PrimitiveTag     ::= "B"|"C"|"D"|"F"|"I"|"J"|"S"|"Z"
//! ReturnType       ::= ParamType | "V"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use sigscope::metadata::descriptor::{has_precision_loss, param_type_names};
//!
//! assert_eq!(param_type_names("(Ljava/lang/String;I)V"), vec!["Ljava/lang/String;", "I"]);
//! assert_eq!(param_type_names("(IJ)V"), vec!["IJ"]);
//! assert!(has_precision_loss("(IJ)V"));
//! ```
//!
//! # References
//!
//! - JVMS SE 21, §4.3 - Descriptors

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// The text between the first `(` and the last `)`.
///
/// A missing `(` reads from the start of the input; a missing `)`, or one before the `(`,
/// yields an empty section.
#[must_use]
pub fn params_section(descriptor: &str) -> &str {
    let start = descriptor.find('(').map_or(0, |open| open + 1);
    match descriptor.rfind(')') {
        Some(end) if end >= start => &descriptor[start..end],
        _ => "",
    }
}

/// Split a method descriptor into per-parameter type tokens.
///
/// Reference tokens keep their `;` terminator. Adjacent primitives and arrays of primitives
/// are not separated from whatever follows them up to the next `;`. Trailing tokens that are a
/// bare `;` are dropped, while bare `;` tokens between others are kept. Malformed descriptors
/// produce meaningless tokens instead of errors.
///
/// ## Arguments
/// * 'descriptor' - The method descriptor, e.g. `(Ljava/lang/String;)V`
#[must_use]
pub fn param_type_names(descriptor: &str) -> Vec<String> {
    let params = params_section(descriptor);
    if params.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<&str> = params.split_inclusive(';').collect();
    while tokens.last() == Some(&";") {
        tokens.pop();
    }
    tokens.into_iter().map(str::to_string).collect()
}

/// Returns `true` if `descriptor` is well-formed and [`param_type_names`] yields a different
/// number of tokens than it has parameters.
///
/// Malformed descriptors report `false`; there is no reference count to compare against.
#[must_use]
pub fn has_precision_loss(descriptor: &str) -> bool {
    match parse_method_descriptor(descriptor) {
        Ok(method) => method.params.len() != param_type_names(descriptor).len(),
        Err(_) => false,
    }
}

/// Parse a complete method descriptor.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the descriptor does not follow the grammar.
pub fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor> {
    let mut parser = DescriptorParser::new(descriptor);
    parser.parse_method_descriptor()
}

/// Parse a complete field descriptor.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the descriptor is not exactly one field type.
pub fn parse_field_descriptor(descriptor: &str) -> Result<FieldType> {
    let mut parser = DescriptorParser::new(descriptor);
    let field = parser.parse_field_type()?;
    if !parser.is_at_end() {
        return Err(malformed_error!(
            "Trailing data after field descriptor at offset {} - {}",
            parser.pos(),
            descriptor
        ));
    }
    Ok(field)
}
