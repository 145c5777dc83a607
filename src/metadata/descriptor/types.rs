use std::fmt;

use crate::metadata::typesystem::PrimitiveKind;

/// The type of a field, parameter or array component (JVMS §4.3.2)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A primitive (`I`, `J`, ...)
    Base(PrimitiveKind),
    /// An object reference; holds the slash-separated internal name (`java/lang/String`)
    Object(String),
    /// An array of the boxed component type
    Array(Box<FieldType>),
}

impl FieldType {
    /// Render back to descriptor form (`I`, `Ljava/lang/String;`, `[[J`).
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            FieldType::Base(kind) => kind.tag().to_string(),
            FieldType::Object(name) => format!("L{};", name),
            FieldType::Array(component) => format!("[{}", component.descriptor()),
        }
    }

    /// The binary name used for type lookups: `java.lang.String` for objects, `[I` and
    /// `[Ljava.lang.String;` for arrays, the keyword (`int`) for primitives.
    #[must_use]
    pub fn java_name(&self) -> String {
        match self {
            FieldType::Base(kind) => kind.to_string(),
            FieldType::Object(name) => name.replace('/', "."),
            FieldType::Array(_) => self.descriptor().replace('/', "."),
        }
    }

    /// Number of array dimensions, zero for non-arrays.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        match self {
            FieldType::Array(component) => 1 + component.dimensions(),
            _ => 0,
        }
    }

    /// The innermost non-array type.
    #[must_use]
    pub fn element(&self) -> &FieldType {
        match self {
            FieldType::Array(component) => component.element(),
            other => other,
        }
    }

    /// Number of local-variable slots a value of this type occupies.
    #[must_use]
    pub fn slot_size(&self) -> usize {
        match self {
            FieldType::Base(kind) => kind.slot_size(),
            _ => 1,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Array(component) => write!(f, "{}[]", component),
            other => write!(f, "{}", other.java_name()),
        }
    }
}

/// The return type of a method descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// `V`
    Void,
    /// Any field type
    Field(FieldType),
}

impl ReturnType {
    /// Render back to descriptor form.
    #[must_use]
    pub fn descriptor(&self) -> String {
        match self {
            ReturnType::Void => "V".to_string(),
            ReturnType::Field(field) => field.descriptor(),
        }
    }
}

/// A fully parsed method descriptor (JVMS §4.3.3)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Parameter types in declaration order
    pub params: Vec<FieldType>,
    /// The return type
    pub return_type: ReturnType,
}

impl MethodDescriptor {
    /// Render back to descriptor form.
    #[must_use]
    pub fn descriptor(&self) -> String {
        let params: String = self.params.iter().map(FieldType::descriptor).collect();
        format!("({}){}", params, self.return_type.descriptor())
    }

    /// Number of local-variable slots the declared parameters occupy (receiver excluded).
    #[must_use]
    pub fn param_slots(&self) -> usize {
        self.params.iter().map(FieldType::slot_size).sum()
    }
}
