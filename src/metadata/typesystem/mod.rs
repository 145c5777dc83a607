//! JVM type handles and name-based type resolution.
//!
//! The decoder turns descriptor tokens into type handles. Primitive tokens map to a fixed set
//! of boxed wrapper handles, object-reference tokens are looked up by name through a
//! [`TypeResolver`], and array tokens map to a generic array marker (or, when configured, to an
//! element-aware array handle).
//!
//! # Key Components
//!
//! - [`JvmType`]: A resolved type handle, shared as [`JvmTypeRc`]
//! - [`JvmFlavor`]: What kind of type a handle stands for
//! - [`PrimitiveKind`]: The eight JVM primitive types
//! - [`TypeResolver`]: Name to handle lookup, injected into the decoder
//! - [`TypeRegistry`]: Concurrent registry implementing [`TypeResolver`]
//!
//! # Examples
//!
//! ```rust
//! use sigscope::metadata::typesystem::{TypeRegistry, TypeResolver};
//!
//! let registry = TypeRegistry::new();
//! registry.register_class("com.acme.Widget");
//!
//! let widget = registry.resolve("com.acme.Widget")?;
//! assert!(widget.is_class());
//! assert!(registry.resolve("com.acme.Gadget").is_err());
//! # Ok::<(), sigscope::Error>(())
//! ```

mod primitives;
mod registry;
mod resolver;

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use strum::IntoEnumIterator;

pub use primitives::PrimitiveKind;
pub use registry::TypeRegistry;
pub use resolver::TypeResolver;

/// Reference to a `JvmType`
pub type JvmTypeRc = Arc<JvmType>;

/// Fully-qualified name of the handle returned for array tokens by default.
pub const ARRAY_MARKER_NAME: &str = "java.util.Arrays";

/// Handles that never go through a resolver, created once per process
struct FixedHandles {
    /// Indexed by `PrimitiveKind as usize`
    boxed: Vec<JvmTypeRc>,
    array_marker: JvmTypeRc,
}

fn fixed_handles() -> &'static FixedHandles {
    static HANDLES: OnceLock<FixedHandles> = OnceLock::new();
    HANDLES.get_or_init(|| FixedHandles {
        boxed: PrimitiveKind::iter()
            .map(|kind| Arc::new(JvmType::boxed(kind)))
            .collect(),
        array_marker: Arc::new(JvmType::array_marker()),
    })
}

/// The shared wrapper-class handle of a primitive (`java.lang.Integer` for `int`).
#[must_use]
pub fn boxed_handle(kind: PrimitiveKind) -> JvmTypeRc {
    fixed_handles().boxed[kind as usize].clone()
}

/// The shared generic array marker handle.
#[must_use]
pub fn array_marker_handle() -> JvmTypeRc {
    fixed_handles().array_marker.clone()
}

/// The kind of type a [`JvmType`] represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JvmFlavor {
    /// A raw primitive (`int`), only used as the element of an element-aware array
    Primitive(PrimitiveKind),
    /// The wrapper class of a primitive (`java.lang.Integer`)
    Boxed(PrimitiveKind),
    /// A class or interface
    Class,
    /// An array with a known element type
    Array(JvmTypeRc),
    /// The generic array marker produced for array tokens by default
    ArrayMarker,
}

/// A resolved type handle.
///
/// `name` is the binary name as the JVM reports it: dot-separated for classes
/// (`java.lang.String`), descriptor-shaped for arrays (`[I`, `[Ljava.lang.String;`) and the
/// keyword for raw primitives (`int`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JvmType {
    /// The binary name of the type
    pub name: String,
    /// What kind of type this is
    pub flavor: JvmFlavor,
}

impl JvmType {
    /// A class or interface handle.
    pub fn class(name: impl Into<String>) -> Self {
        JvmType {
            name: name.into(),
            flavor: JvmFlavor::Class,
        }
    }

    /// The wrapper class handle of a primitive.
    #[must_use]
    pub fn boxed(kind: PrimitiveKind) -> Self {
        JvmType {
            name: kind.boxed_name().to_string(),
            flavor: JvmFlavor::Boxed(kind),
        }
    }

    /// A raw primitive handle.
    #[must_use]
    pub fn primitive(kind: PrimitiveKind) -> Self {
        JvmType {
            name: kind.to_string(),
            flavor: JvmFlavor::Primitive(kind),
        }
    }

    /// The generic array marker.
    #[must_use]
    pub fn array_marker() -> Self {
        JvmType {
            name: ARRAY_MARKER_NAME.to_string(),
            flavor: JvmFlavor::ArrayMarker,
        }
    }

    /// An array of `element`.
    #[must_use]
    pub fn array_of(element: JvmTypeRc) -> Self {
        JvmType {
            name: format!("[{}", element.component_name()),
            flavor: JvmFlavor::Array(element),
        }
    }

    /// Name of this type when used as an array component (`I`, `Ljava.lang.String;`, `[I`).
    fn component_name(&self) -> String {
        match &self.flavor {
            JvmFlavor::Primitive(kind) => kind.tag().to_string(),
            JvmFlavor::Array(_) => self.name.clone(),
            JvmFlavor::Boxed(_) | JvmFlavor::Class | JvmFlavor::ArrayMarker => {
                format!("L{};", self.name)
            }
        }
    }

    /// Returns `true` for class handles.
    #[must_use]
    pub fn is_class(&self) -> bool {
        matches!(self.flavor, JvmFlavor::Class)
    }

    /// Returns `true` for boxed primitive handles.
    #[must_use]
    pub fn is_boxed(&self) -> bool {
        matches!(self.flavor, JvmFlavor::Boxed(_))
    }

    /// Returns `true` for the generic array marker.
    #[must_use]
    pub fn is_array_marker(&self) -> bool {
        matches!(self.flavor, JvmFlavor::ArrayMarker)
    }

    /// The element type, for element-aware array handles.
    #[must_use]
    pub fn element(&self) -> Option<&JvmTypeRc> {
        match &self.flavor {
            JvmFlavor::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The simple name, without package (`String` for `java.lang.String`).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match self.flavor {
            JvmFlavor::Array(_) | JvmFlavor::Primitive(_) => &self.name,
            _ => self.name.rsplit('.').next().unwrap_or(&self.name),
        }
    }

    /// The package, empty for the default package, arrays and primitives.
    #[must_use]
    pub fn package(&self) -> &str {
        match self.flavor {
            JvmFlavor::Array(_) | JvmFlavor::Primitive(_) => "",
            _ => self.name.rsplit_once('.').map_or("", |(package, _)| package),
        }
    }
}

impl fmt::Display for JvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
