use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {{
        tracing::trace!("out of bounds read at {}:{}", file!(), line!());
        crate::Error::OutOfBounds
    }};
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Two families of failures exist. Reading class-file bytes is strict: truncated or corrupted
/// input fails with [`Error::Malformed`] or [`Error::OutOfBounds`]. Decoding descriptors is
/// permissive: malformed descriptors never fail, and the only decoding error is a type
/// reference that cannot be resolved, surfaced as [`Error::TypeNotResolvable`] by the single
/// token decoder and as [`Error::ClasspathAccess`] by the all-parameters operation.
///
/// # Error Categories
///
/// ## File Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid class-file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of the input
/// - [`Error::NotSupported`] - Input is not a class file
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// ## Type Resolution Errors
/// - [`Error::TypeNotResolvable`] - A named type is unknown to the active resolver
/// - [`Error::ClasspathAccess`] - A parameter type could not be loaded
///
/// ## Analysis Errors
/// - [`Error::RecursionLimit`] - Maximum array nesting exceeded
///
/// # Examples
///
/// ```rust
/// use sigscope::{Error, metadata::typesystem::TypeRegistry, MethodDecoder, MethodInfo};
///
/// let registry = TypeRegistry::new();
/// let decoder = MethodDecoder::new(&registry);
/// let method = MethodInfo::new(0x0009, "main", "(Lcom/not/Real;)V");
///
/// match decoder.param_types(&method) {
///     Ok(types) => println!("{} parameters", types.len()),
///     Err(Error::ClasspathAccess { message, .. }) => eprintln!("{}", message),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // File parsing Errors
    /// The class file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the input.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Returned when the input does not start with the `0xCAFEBABE` class-file magic.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// The named type is not known to the active [`crate::metadata::typesystem::TypeResolver`].
    ///
    /// The associated value is the fully-qualified, dot-separated type name.
    #[error("Type could not be resolved - {0}")]
    TypeNotResolvable(String),

    /// A parameter type could not be loaded from the classpath.
    ///
    /// Wraps the underlying lookup failure, usually [`Error::TypeNotResolvable`].
    #[error("{message}")]
    ClasspathAccess {
        /// Description of the failed access
        message: String,
        /// The lookup failure that caused this error
        #[source]
        source: Box<Error>,
    },

    /// Recursion limit reached.
    ///
    /// Array descriptors may nest at most 255 dimensions; deeper nesting is rejected by the
    /// strict descriptor parser.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

impl Error {
    /// Returns `true` if this error, or the error it wraps, is a failed type lookup.
    #[must_use]
    pub fn is_unresolvable(&self) -> bool {
        match self {
            Error::TypeNotResolvable(_) => true,
            Error::ClasspathAccess { source, .. } => source.is_unresolvable(),
            _ => false,
        }
    }
}
