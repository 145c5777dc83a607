//! Class-file byte builders for unit tests.

use crate::{
    file::parser::Parser,
    metadata::classfile::constant_pool::{ConstantPool, TAG_CLASS, TAG_LONG, TAG_UTF8},
};

/// Assembles a minimal but well-formed class file.
pub struct ClassFileBuilder {
    /// Serialized constant-pool entries
    pool: Vec<u8>,
    /// Next free constant-pool index
    next_index: u16,
    utf8: Vec<(String, u16)>,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<u8>,
    field_count: u16,
    methods: Vec<u8>,
    method_count: u16,
}

impl ClassFileBuilder {
    /// A class extending `java/lang/Object`.
    pub fn new(this_class: &str) -> Self {
        let mut builder = ClassFileBuilder {
            pool: Vec::new(),
            next_index: 1,
            utf8: Vec::new(),
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            field_count: 0,
            methods: Vec::new(),
            method_count: 0,
        };
        builder.this_class = builder.class(this_class);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub fn without_super_class(&mut self) -> &mut Self {
        self.super_class = 0;
        self
    }

    /// Index of a `Utf8` entry, adding it if needed.
    pub fn utf8(&mut self, text: &str) -> u16 {
        if let Some((_, index)) = self.utf8.iter().find(|(known, _)| known == text) {
            return *index;
        }

        let index = self.next_index;
        self.pool.push(TAG_UTF8);
        self.pool
            .extend_from_slice(&(text.len() as u16).to_be_bytes());
        self.pool.extend_from_slice(text.as_bytes());
        self.next_index += 1;
        self.utf8.push((text.to_string(), index));
        index
    }

    /// Index of a new `Class` entry.
    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let index = self.next_index;
        self.pool.push(TAG_CLASS);
        self.pool.extend_from_slice(&name_index.to_be_bytes());
        self.next_index += 1;
        index
    }

    /// Index of a new `Long` entry, which takes two slots.
    pub fn long(&mut self, value: i64) -> u16 {
        let index = self.next_index;
        self.pool.push(TAG_LONG);
        self.pool.extend_from_slice(&value.to_be_bytes());
        self.next_index += 2;
        index
    }

    pub fn interface(&mut self, name: &str) -> &mut Self {
        let index = self.class(name);
        self.interfaces.push(index);
        self
    }

    /// Add a field carrying one opaque attribute.
    pub fn field(&mut self, access_flags: u16, name: &str, descriptor: &str) -> &mut Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let attribute = self.attribute("Synthetic", &[]);

        self.fields.extend_from_slice(&access_flags.to_be_bytes());
        self.fields.extend_from_slice(&name_index.to_be_bytes());
        self.fields.extend_from_slice(&descriptor_index.to_be_bytes());
        self.fields.extend_from_slice(&1u16.to_be_bytes());
        self.fields.extend_from_slice(&attribute);
        self.field_count += 1;
        self
    }

    /// Add a method with fully encoded attributes.
    pub fn method(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: &[Vec<u8>],
    ) -> &mut Self {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);

        self.methods.extend_from_slice(&access_flags.to_be_bytes());
        self.methods.extend_from_slice(&name_index.to_be_bytes());
        self.methods.extend_from_slice(&descriptor_index.to_be_bytes());
        self.methods
            .extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for attribute in attributes {
            self.methods.extend_from_slice(attribute);
        }
        self.method_count += 1;
        self
    }

    /// Add a method whose `Code` attribute carries `locals` as its `LocalVariableTable`.
    pub fn method_with_locals(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        locals: &[(u16, &str, &str)],
    ) -> &mut Self {
        let table = self.local_variable_table(locals);
        let code = self.code_attribute(&[0xB1], &[table]);
        let code = self.attribute("Code", &code);
        self.method(access_flags, name, descriptor, &[code])
    }

    /// A complete attribute: name index, length, body.
    pub fn attribute(&mut self, name: &str, info: &[u8]) -> Vec<u8> {
        let mut data = self.utf8(name).to_be_bytes().to_vec();
        data.extend_from_slice(&(info.len() as u32).to_be_bytes());
        data.extend_from_slice(info);
        data
    }

    /// The body of a `Code` attribute with an empty exception table.
    pub fn code_attribute(&mut self, code: &[u8], attributes: &[Vec<u8>]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&(code.len() as u32).to_be_bytes());
        data.extend_from_slice(code);
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for attribute in attributes {
            data.extend_from_slice(attribute);
        }
        data
    }

    /// A complete `LocalVariableTable` attribute from `(slot, name, descriptor)` entries.
    pub fn local_variable_table(&mut self, entries: &[(u16, &str, &str)]) -> Vec<u8> {
        let mut info = (entries.len() as u16).to_be_bytes().to_vec();
        for (slot, name, descriptor) in entries {
            let name_index = self.utf8(name);
            let descriptor_index = self.utf8(descriptor);
            info.extend_from_slice(&0u16.to_be_bytes());
            info.extend_from_slice(&1u16.to_be_bytes());
            info.extend_from_slice(&name_index.to_be_bytes());
            info.extend_from_slice(&descriptor_index.to_be_bytes());
            info.extend_from_slice(&slot.to_be_bytes());
        }
        self.attribute("LocalVariableTable", &info)
    }

    fn pool_bytes(&self) -> Vec<u8> {
        let mut data = self.next_index.to_be_bytes().to_vec();
        data.extend_from_slice(&self.pool);
        data
    }

    /// The constant pool as the reader sees it.
    pub fn constant_pool(&self) -> ConstantPool {
        ConstantPool::read(&mut Parser::new(&self.pool_bytes())).unwrap()
    }

    /// Serialize the class file (version 52.0).
    pub fn build(&mut self) -> Vec<u8> {
        let source_file = self.attribute("SourceFile", &[0x00, 0x01]);

        let mut data = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34];
        data.extend_from_slice(&self.pool_bytes());
        data.extend_from_slice(&0x0021u16.to_be_bytes());
        data.extend_from_slice(&self.this_class.to_be_bytes());
        data.extend_from_slice(&self.super_class.to_be_bytes());
        data.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for interface in &self.interfaces {
            data.extend_from_slice(&interface.to_be_bytes());
        }
        data.extend_from_slice(&self.field_count.to_be_bytes());
        data.extend_from_slice(&self.fields);
        data.extend_from_slice(&self.method_count.to_be_bytes());
        data.extend_from_slice(&self.methods);
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&source_file);
        data
    }
}

/// `com/acme/Widget`: a constructor with debug names, a method without a local-variable table,
/// a synchronized instance method and a static factory.
pub fn widget_class() -> Vec<u8> {
    let mut builder = ClassFileBuilder::new("com/acme/Widget");
    builder.interface("java/lang/Runnable");
    builder.long(1);
    builder.field(0x0002, "label", "Ljava/lang/String;");

    builder.method_with_locals(
        0x0001,
        "<init>",
        "(Ljava/lang/String;I)V",
        &[
            (0, "this", "Lcom/acme/Widget;"),
            (1, "label", "Ljava/lang/String;"),
            (2, "count", "I"),
        ],
    );

    let code = builder.code_attribute(&[0xB1], &[]);
    let code = builder.attribute("Code", &code);
    builder.method(0x0001, "run", "()V", &[code]);

    builder.method_with_locals(
        0x0021,
        "resize",
        "(Ljava/lang/Object;Ljava/lang/Object;)V",
        &[
            (0, "this", "Lcom/acme/Widget;"),
            (1, "width", "Ljava/lang/Object;"),
            (2, "height", "Ljava/lang/Object;"),
        ],
    );

    builder.method_with_locals(
        0x0009,
        "copyOf",
        "(Lcom/acme/Widget;)Lcom/acme/Widget;",
        &[(0, "source", "Lcom/acme/Widget;")],
    );

    builder.build()
}
