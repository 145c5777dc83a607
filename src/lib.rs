// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # sigscope
//!
//! Decoding of JVM method descriptors into per-parameter type tokens, parameter names and
//! resolved type handles.
//!
//! Given a method's access flags, its descriptor (for example `(Ljava/lang/String;I)V`) and
//! the optional local-variable debug table of its bytecode, `sigscope` answers three
//! questions for every parameter:
//!
//! - **Which type token?** The descriptor's parameter section, split on `;`
//! - **Which name?** The debug name of the parameter's local-variable slot, or its position
//! - **Which type?** A shared handle from a pluggable [`TypeResolver`]
//!
//! ## Features
//!
//! - **Legacy-exact tokenization** - Reproduces the `;`-split rule, quirks included
//! - **Strict descriptor parser** - Grammar-correct parsing for validation and array decoding
//! - **Pluggable resolution** - Any [`TypeResolver`], with a concurrent [`TypeRegistry`]
//! - **Class-file reader** - Methods and local-variable tables straight from `.class` files
//! - **Parallel decoding** - All methods of a class decoded with `rayon`
//!
//! ## Quick Start
//!
//! ```rust
//! use sigscope::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let decoder = MethodDecoder::new(&registry);
//!
//! let method = MethodInfo::new(0x0001, "put", "(Ljava/lang/String;I)V")
//!     .with_local_variables(LocalVariableTable::from_names([(0, "this"), (1, "key"), (2, "value")]));
//!
//! let summary = decoder.summarize(&method)?;
//! assert_eq!(summary.param_names, vec!["key", "value"]);
//! assert_eq!(summary.param_types[1].as_ref().unwrap().name, "java.lang.Integer");
//! # Ok::<(), sigscope::Error>(())
//! ```
//!
//! ### Reading Class Files
//!
//! ```rust,no_run
//! use sigscope::prelude::*;
//! use std::path::Path;
//!
//! let class = ClassFile::from_file(Path::new("Widget.class"))?;
//! let registry = TypeRegistry::new();
//! registry.register_classfile(&class)?;
//!
//! for summary in class.method_summaries(&registry, DecoderConfig::default())? {
//!     println!("{} {:?}", summary.name, summary.param_names);
//! }
//! # Ok::<(), sigscope::Error>(())
//! ```
//!
//! ## Legacy Behaviour
//!
//! The default configuration reproduces two behaviours that differ from the JVM: a
//! synchronized method is treated as reserving one extra local-variable slot before its
//! parameters, and every array parameter resolves to the generic `java.util.Arrays` marker.
//! Both can be switched off through [`DecoderConfig`].
//!
//! ## Error Handling
//!
//! Decoding descriptors never fails on malformed input. The only decoding error is a type that
//! cannot be resolved:
//!
//! ```rust
//! use sigscope::{metadata::typesystem::TypeRegistry, Error, MethodDecoder, MethodInfo};
//!
//! let registry = TypeRegistry::new();
//! let method = MethodInfo::new(0x0009, "load", "(Lcom/acme/Missing;)V");
//!
//! match MethodDecoder::new(&registry).param_types(&method) {
//!     Err(Error::ClasspathAccess { message, .. }) => {
//!         assert_eq!(message, "Class could not be found: com.acme.Missing")
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Logging
//!
//! `sigscope` emits [`tracing`](https://docs.rs/tracing) events and installs no subscriber.
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run classfile --release
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use sigscope::prelude::*;
///
/// let method = MethodInfo::new(0x0008, "max", "(II)I");
/// assert_eq!(param_type_names(&method.descriptor), vec!["II"]);
/// ```
pub mod prelude;

/// Class files, descriptors, method metadata and the type system
///
/// # Key Components
///
/// - [`metadata::classfile`] - Reading compiled classes
/// - [`metadata::descriptor`] - Descriptor tokenization and parsing
/// - [`metadata::method`] - Parameter decoding
/// - [`metadata::typesystem`] - Type handles and resolution
/// - [`metadata::config`] - Decoder configuration
pub mod metadata;

/// `sigscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `sigscope` Error type
///
/// Covers class-file reading failures and type-resolution failures.
pub use error::Error;

/// Reading compiled classes.
pub use metadata::classfile::ClassFile;

/// Decoder configuration.
pub use metadata::config::DecoderConfig;

/// Parameter decoding.
pub use metadata::method::{MethodDecoder, MethodInfo, MethodSummary};

/// Type handles and resolution.
pub use metadata::typesystem::{JvmType, JvmTypeRc, TypeRegistry, TypeResolver};

/// Provides access to low-level file and memory parsing utilities.
///
/// The [`Parser`] type is the big-endian cursor used for reading class files.
///
/// # Example
///
/// ```rust
/// use sigscope::Parser;
/// let data = [0x00, 0x34];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_be::<u16>()?, 52);
/// # Ok::<(), sigscope::Error>(())
/// ```
pub use file::{parser::Parser, File};
