//! Metadata parsing and representation for compiled JVM classes.
//!
//! This module contains everything between the raw bytes of a class file and the decoded
//! parameter information of its methods.
//!
//! # Key Components
//!
//! - [`classfile`] - Class-file reader: constant pool, attributes, methods
//! - [`descriptor`] - Method-descriptor tokenization and grammar-correct parsing
//! - [`method`] - Method metadata, local-variable tables and the parameter decoder
//! - [`typesystem`] - Type handles, primitive kinds and name-based resolution
//! - [`config`] - Decoder configuration
//!
//! # Examples
//!
//! ```rust
//! use sigscope::metadata::{
//!     method::{LocalVariableTable, MethodDecoder, MethodInfo},
//!     typesystem::TypeRegistry,
//! };
//!
//! let registry = TypeRegistry::new();
//! let method = MethodInfo::new(0x0001, "rename", "(Ljava/lang/String;Z)V")
//!     .with_local_variables(LocalVariableTable::from_names([(0, "this"), (1, "name")]));
//!
//! let summary = MethodDecoder::new(&registry).summarize(&method)?;
//! assert_eq!(summary.param_type_names, vec!["Ljava/lang/String;", "Z"]);
//! assert_eq!(summary.param_names, vec!["name", "1"]);
//! # Ok::<(), sigscope::Error>(())
//! ```

/// Implementation of the class-file format
pub mod classfile;
/// Decoder configuration
pub mod config;
/// Implementation of method and field descriptors
pub mod descriptor;
/// Method metadata and parameter decoding
pub mod method;
/// JVM type handles and resolution
pub mod typesystem;
