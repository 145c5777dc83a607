//! Compiled JVM class files (JVMS §4).
//!
//! [`ClassFile`] reads a class from memory or from a memory-mapped file and exposes what the
//! parameter decoder needs: the class's own name, its superclass and its methods as
//! [`MethodInfo`] values, with local-variable debug names taken from each method's `Code`
//! attribute.
//!
//! Unlike descriptor decoding, reading class-file bytes is strict. Truncated input fails with
//! [`crate::Error::OutOfBounds`], structural damage with [`crate::Error::Malformed`] and input
//! without the class-file magic with [`crate::Error::NotSupported`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use sigscope::{metadata::typesystem::TypeRegistry, ClassFile, DecoderConfig};
//! use std::path::Path;
//!
//! let class = ClassFile::from_file(Path::new("Widget.class"))?;
//! let registry = TypeRegistry::new();
//! registry.register_classfile(&class)?;
//!
//! for summary in class.method_summaries(&registry, DecoderConfig::default())? {
//!     println!("{}{} -> {:?}", summary.name, summary.descriptor, summary.param_names);
//! }
//! # Ok::<(), sigscope::Error>(())
//! ```

pub mod attributes;
pub mod constant_pool;

use std::path::Path;

use rayon::prelude::*;

use crate::{
    file::{parser::Parser, File},
    metadata::{
        classfile::constant_pool::ConstantPool,
        config::DecoderConfig,
        method::{MethodInfo, MethodSummary},
        typesystem::TypeResolver,
    },
    Error::NotSupported,
    Result,
};

/// The magic number every class file starts with
pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// A parsed class file.
#[derive(Debug, Clone)]
pub struct ClassFile {
    /// Minor version
    pub minor_version: u16,
    /// Major version (52 = Java 8, 65 = Java 21)
    pub major_version: u16,
    /// Raw class access flags
    pub access_flags: u16,
    /// Decoded constant pool
    pub constant_pool: ConstantPool,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    field_count: u16,
    methods: Vec<MethodInfo>,
}

impl ClassFile {
    /// Read a class file from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read, plus every error of
    /// [`ClassFile::from_mem`].
    pub fn from_file(path: &Path) -> Result<ClassFile> {
        let input = File::from_file(path)?;
        Self::load(&input)
    }

    /// Read a class file from a buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input, [`crate::Error::NotSupported`] if the
    /// magic is wrong and [`crate::Error::Malformed`] or [`crate::Error::OutOfBounds`] if the
    /// structure is damaged.
    pub fn from_mem(data: Vec<u8>) -> Result<ClassFile> {
        let input = File::from_mem(data)?;
        Self::load(&input)
    }

    fn load(input: &File) -> Result<ClassFile> {
        let mut parser = Parser::new(input.data());

        if parser.read_be::<u32>()? != CLASS_MAGIC {
            return Err(NotSupported);
        }
        let minor_version = parser.read_be::<u16>()?;
        let major_version = parser.read_be::<u16>()?;
        let constant_pool = ConstantPool::read(&mut parser)?;

        let access_flags = parser.read_be::<u16>()?;
        let this_class = parser.read_be::<u16>()?;
        let super_class = parser.read_be::<u16>()?;

        let interface_count = parser.read_be::<u16>()?;
        let interfaces = (0..interface_count)
            .map(|_| parser.read_be::<u16>())
            .collect::<Result<Vec<_>>>()?;

        let field_count = parser.read_be::<u16>()?;
        for _ in 0..field_count {
            // access_flags, name_index, descriptor_index
            parser.advance_by(6)?;
            attributes::skip_attributes(&mut parser)?;
        }

        let method_count = parser.read_be::<u16>()?;
        let mut methods = Vec::with_capacity(usize::from(method_count));
        for _ in 0..method_count {
            methods.push(read_method(&mut parser, &constant_pool)?);
        }

        attributes::skip_attributes(&mut parser)?;

        let class = ClassFile {
            minor_version,
            major_version,
            access_flags,
            constant_pool,
            this_class,
            super_class,
            interfaces,
            field_count,
            methods,
        };

        tracing::debug!(
            class = class.this_class_name().unwrap_or("<invalid>"),
            version = %format!("{}.{}", major_version, minor_version),
            constants = class.constant_pool.len(),
            methods = class.methods.len(),
            "parsed class file"
        );

        Ok(class)
    }

    /// Internal name of this class (`com/acme/Widget`).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `this_class` is not a valid class entry.
    pub fn this_class_name(&self) -> Result<&str> {
        self.constant_pool.class_name(self.this_class)
    }

    /// Internal name of the superclass, `None` for `java/lang/Object` and module descriptors.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `super_class` is not a valid class entry.
    pub fn super_class_name(&self) -> Result<Option<&str>> {
        if self.super_class == 0 {
            return Ok(None);
        }
        self.constant_pool.class_name(self.super_class).map(Some)
    }

    /// Internal names of the directly implemented interfaces.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if an entry is not a valid class entry.
    pub fn interface_names(&self) -> Result<Vec<&str>> {
        self.interfaces
            .iter()
            .map(|index| self.constant_pool.class_name(*index))
            .collect()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        usize::from(self.field_count)
    }

    /// All declared methods, in class-file order.
    #[must_use]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// The first method called `name`.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Decode every method, in class-file order.
    ///
    /// Methods are decoded in parallel. If several methods fail, which error is returned is
    /// unspecified.
    ///
    /// # Errors
    /// Returns [`crate::Error::ClasspathAccess`] if a parameter type cannot be resolved.
    pub fn method_summaries<R: TypeResolver + ?Sized>(
        &self,
        resolver: &R,
        config: DecoderConfig,
    ) -> Result<Vec<MethodSummary>> {
        self.methods
            .par_iter()
            .map(|method| method.summarize(resolver, config))
            .collect()
    }
}

fn read_method(parser: &mut Parser, pool: &ConstantPool) -> Result<MethodInfo> {
    let access_flags = parser.read_be::<u16>()?;
    let name = pool.utf8(parser.read_be::<u16>()?)?;
    let descriptor = pool.utf8(parser.read_be::<u16>()?)?;

    let method_attributes = attributes::read_attributes(parser, pool)?;
    let local_variables = attributes::local_variables(&method_attributes, pool)?;

    let mut method = MethodInfo::new(access_flags, name, descriptor);
    method.local_variables = local_variables;
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::typesystem::TypeRegistry,
        test::{widget_class, ClassFileBuilder},
        Error,
    };

    #[test]
    fn widget() {
        let class = ClassFile::from_mem(widget_class()).unwrap();

        assert_eq!(class.major_version, 52);
        assert_eq!(class.this_class_name().unwrap(), "com/acme/Widget");
        assert_eq!(class.super_class_name().unwrap(), Some("java/lang/Object"));
        assert_eq!(class.interface_names().unwrap(), vec!["java/lang/Runnable"]);
        assert_eq!(class.field_count(), 1);
        assert_eq!(class.methods().len(), 4);

        let init = class.method("<init>").unwrap();
        assert_eq!(init.descriptor, "(Ljava/lang/String;I)V");
        assert_eq!(
            init.local_variables.as_ref().unwrap().name_for_slot(1),
            Some("label")
        );

        let run = class.method("run").unwrap();
        assert!(run.local_variables.is_none());
        assert!(class.method("missing").is_none());
    }

    #[test]
    fn summaries_keep_order() {
        let class = ClassFile::from_mem(widget_class()).unwrap();
        let registry = TypeRegistry::new();
        registry.register_classfile(&class).unwrap();

        let summaries = class
            .method_summaries(&registry, DecoderConfig::default())
            .unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["<init>", "run", "resize", "copyOf"]);

        assert_eq!(summaries[0].param_names, vec!["label", "count"]);
        // Synchronized instance method, names start at slot 2
        assert_eq!(summaries[2].param_names, vec!["height", "1"]);
        assert_eq!(summaries[3].param_names, vec!["source"]);
        assert_eq!(
            summaries[3].param_types[0].as_ref().unwrap().name,
            "com.acme.Widget"
        );
    }

    #[test]
    fn summaries_fail_on_unknown_types() {
        let class = ClassFile::from_mem(widget_class()).unwrap();
        let registry = TypeRegistry::new();

        assert!(matches!(
            class.method_summaries(&registry, DecoderConfig::default()),
            Err(Error::ClasspathAccess { .. })
        ));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(ClassFile::from_mem(Vec::new()), Err(Error::Empty)));
        assert!(matches!(
            ClassFile::from_mem(vec![0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 52]),
            Err(Error::NotSupported)
        ));

        let full = widget_class();
        for cut in [4, 10, full.len() / 2, full.len() - 1] {
            let result = ClassFile::from_mem(full[..cut].to_vec());
            assert!(
                matches!(result, Err(Error::OutOfBounds | Error::Malformed { .. })),
                "cut at {}",
                cut
            );
        }
    }

    #[test]
    fn no_superclass() {
        let mut builder = ClassFileBuilder::new("java/lang/Object");
        builder.without_super_class();
        let class = ClassFile::from_mem(builder.build()).unwrap();
        assert_eq!(class.super_class_name().unwrap(), None);
        assert!(class.methods().is_empty());
    }
}
