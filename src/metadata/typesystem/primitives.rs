use strum::{Display, EnumCount, EnumIter};

/// The eight primitive types of the JVM, as they appear in descriptors.
///
/// `Display` renders the Java source keyword (`int`, `boolean`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum PrimitiveKind {
    /// `B` - signed 8-bit integer
    #[strum(serialize = "byte")]
    Byte,
    /// `C` - UTF-16 code unit
    #[strum(serialize = "char")]
    Char,
    /// `D` - 64-bit floating point
    #[strum(serialize = "double")]
    Double,
    /// `F` - 32-bit floating point
    #[strum(serialize = "float")]
    Float,
    /// `I` - signed 32-bit integer
    #[strum(serialize = "int")]
    Int,
    /// `J` - signed 64-bit integer
    #[strum(serialize = "long")]
    Long,
    /// `S` - signed 16-bit integer
    #[strum(serialize = "short")]
    Short,
    /// `Z` - true or false
    #[strum(serialize = "boolean")]
    Boolean,
}

impl PrimitiveKind {
    /// Map a descriptor tag to its primitive kind.
    #[must_use]
    pub fn from_tag(tag: char) -> Option<PrimitiveKind> {
        match tag {
            'B' => Some(PrimitiveKind::Byte),
            'C' => Some(PrimitiveKind::Char),
            'D' => Some(PrimitiveKind::Double),
            'F' => Some(PrimitiveKind::Float),
            'I' => Some(PrimitiveKind::Int),
            'J' => Some(PrimitiveKind::Long),
            'S' => Some(PrimitiveKind::Short),
            'Z' => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }

    /// The descriptor tag of this kind.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Boolean => 'Z',
        }
    }

    /// Fully-qualified name of the wrapper class (`java.lang.Integer` for `int`).
    #[must_use]
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Double => "java.lang.Double",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Boolean => "java.lang.Boolean",
        }
    }

    /// Number of local-variable slots a value of this kind occupies.
    #[must_use]
    pub fn slot_size(self) -> usize {
        match self {
            PrimitiveKind::Double | PrimitiveKind::Long => 2,
            _ => 1,
        }
    }
}
