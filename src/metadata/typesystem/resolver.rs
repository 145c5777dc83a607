use crate::{metadata::typesystem::JvmTypeRc, Error::TypeNotResolvable, Result};

/// Resolves a fully-qualified, dot-separated type name to a type handle.
///
/// This is the seam through which the decoder performs dynamic type lookup. The
/// [`crate::metadata::typesystem::TypeRegistry`] is the provided implementation; any closure
/// `Fn(&str) -> Option<JvmTypeRc>` works as well, which keeps tests free of global state.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use sigscope::metadata::typesystem::{JvmType, JvmTypeRc, TypeResolver};
///
/// let resolver = |name: &str| -> Option<JvmTypeRc> {
///     (name == "com.acme.Widget").then(|| Arc::new(JvmType::class(name)))
/// };
///
/// assert_eq!(resolver.resolve("com.acme.Widget")?.name, "com.acme.Widget");
/// assert!(resolver.resolve("com.acme.Gadget").is_err());
/// # Ok::<(), sigscope::Error>(())
/// ```
pub trait TypeResolver: Send + Sync {
    /// Look up `name` (for example `java.lang.String`).
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotResolvable`] if the type is not known.
    fn resolve(&self, name: &str) -> Result<JvmTypeRc>;
}

impl<F> TypeResolver for F
where
    F: Fn(&str) -> Option<JvmTypeRc> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Result<JvmTypeRc> {
        self(name).ok_or_else(|| TypeNotResolvable(name.to_string()))
    }
}
