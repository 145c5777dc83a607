//! Concurrent name to type registry.
//!
//! The [`TypeRegistry`] plays the role of the host's type loader: it knows a set of types by
//! their fully-qualified name and hands out shared handles for them. A fresh registry knows
//! the boxed primitive wrappers, `java.lang.Object`, `java.lang.String` and the array marker;
//! everything else is registered explicitly or taken from scanned class files.
//!
//! # Thread Safety
//!
//! Lookups and insertions go through a `DashMap` and never block each other for long, so one
//! registry can back decoders running on many threads.

use std::sync::Arc;

use dashmap::DashMap;
use strum::IntoEnumIterator;

use crate::{
    metadata::{
        classfile::ClassFile,
        typesystem::{
            array_marker_handle, boxed_handle, JvmType, JvmTypeRc, PrimitiveKind, TypeResolver,
        },
    },
    Error::TypeNotResolvable,
    Result,
};

/// Names of the classes every registry starts with, besides the primitive wrappers.
const SEEDED_CLASSES: [&str; 2] = ["java.lang.Object", "java.lang.String"];

/// Registry of known types, keyed by fully-qualified dot-separated name.
pub struct TypeRegistry {
    types: DashMap<String, JvmTypeRc>,
}

impl TypeRegistry {
    /// Create a registry seeded with the boxed primitives, `java.lang.Object`,
    /// `java.lang.String` and the array marker.
    #[must_use]
    pub fn new() -> Self {
        let registry = TypeRegistry::empty();

        for kind in PrimitiveKind::iter() {
            registry.insert(boxed_handle(kind));
        }
        for name in SEEDED_CLASSES {
            registry.register_class(name);
        }
        registry.insert(array_marker_handle());

        registry
    }

    /// Create a registry that knows no types at all.
    #[must_use]
    pub fn empty() -> Self {
        TypeRegistry {
            types: DashMap::new(),
        }
    }

    /// Register a type. If a type with the same name exists, the existing handle is kept
    /// and returned.
    pub fn register(&self, new_type: JvmType) -> JvmTypeRc {
        self.types
            .entry(new_type.name.clone())
            .or_insert_with(|| Arc::new(new_type))
            .value()
            .clone()
    }

    /// Register an existing handle under its name. If a type with the same name exists, the
    /// existing handle is kept and returned.
    pub fn insert(&self, handle: JvmTypeRc) -> JvmTypeRc {
        self.types
            .entry(handle.name.clone())
            .or_insert(handle)
            .value()
            .clone()
    }

    /// Register a class by name, returning its handle.
    pub fn register_class(&self, name: &str) -> JvmTypeRc {
        if let Some(existing) = self.get(name) {
            return existing;
        }
        self.register(JvmType::class(name))
    }

    /// Register the class defined by a parsed class file, returning its handle.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the class file's `this_class` entry cannot be
    /// resolved through its constant pool.
    pub fn register_classfile(&self, class: &ClassFile) -> Result<JvmTypeRc> {
        let name = class.this_class_name()?.replace('/', ".");
        tracing::debug!(class = %name, "registering scanned class");
        Ok(self.register_class(&name))
    }

    /// Look up a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<JvmTypeRc> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// Returns `true` if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Result<JvmTypeRc> {
        self.get(name).ok_or_else(|| {
            tracing::debug!(name, "type not present in registry");
            TypeNotResolvable(name.to_string())
        })
    }
}
