//! Method access flags and local-variable debug information.
//!
//! # Key Types
//! - [`MethodAccessFlags`]: Modifiers of a method (JVMS §4.6)
//! - [`LocalVariable`], [`LocalVariableTable`]: Debug names of local-variable slots

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method access and property flags
    pub struct MethodAccessFlags: u16 {
        /// Declared public
        const PUBLIC = 0x0001;
        /// Declared private
        const PRIVATE = 0x0002;
        /// Declared protected
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final
        const FINAL = 0x0010;
        /// Declared synchronized
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler
        const BRIDGE = 0x0040;
        /// Declared with a variable number of arguments
        const VARARGS = 0x0080;
        /// Declared native
        const NATIVE = 0x0100;
        /// Declared abstract
        const ABSTRACT = 0x0400;
        /// In a class file whose major version is 46..=60, declared strictfp
        const STRICT = 0x0800;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
    }
}

impl MethodAccessFlags {
    /// Interpret raw `access_flags`, keeping unknown bits.
    #[must_use]
    pub fn from_raw(flags: u16) -> Self {
        Self::from_bits_retain(flags)
    }

    /// Returns `true` if the method is static.
    #[must_use]
    pub fn is_static(self) -> bool {
        self.contains(MethodAccessFlags::STATIC)
    }

    /// Returns `true` if the method is synchronized.
    #[must_use]
    pub fn is_synchronized(self) -> bool {
        self.contains(MethodAccessFlags::SYNCHRONIZED)
    }
}

/// One entry of a `LocalVariableTable` attribute (JVMS §4.7.13)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    /// First code offset at which the variable is live
    pub start_pc: u16,
    /// Length of the live range in bytes of code
    pub length: u16,
    /// Declared name
    pub name: String,
    /// Field descriptor of the declared type
    pub descriptor: String,
    /// Local-variable slot
    pub index: u16,
}

/// The debug names of a method's local-variable slots.
///
/// Entries keep their order from the class file. A slot may appear more than once when a
/// compiler reuses it for variables with disjoint live ranges; lookups return the first
/// entry, which for parameters is the one starting at offset 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalVariableTable {
    entries: Vec<LocalVariable>,
}

impl LocalVariableTable {
    /// Create a table from its entries.
    #[must_use]
    pub fn new(entries: Vec<LocalVariable>) -> Self {
        LocalVariableTable { entries }
    }

    /// Convenience constructor from `(slot, name)` pairs, with empty live ranges and
    /// descriptors.
    #[must_use]
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = (u16, S)>) -> Self {
        let entries = names
            .into_iter()
            .map(|(index, name)| LocalVariable {
                start_pc: 0,
                length: 0,
                name: name.into(),
                descriptor: String::new(),
                index,
            })
            .collect();
        LocalVariableTable { entries }
    }

    /// Name of the variable in `slot`, if the table has one.
    #[must_use]
    pub fn name_for_slot(&self, slot: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| usize::from(entry.index) == slot)
            .map(|entry| entry.name.as_str())
    }

    /// Append the entries of another table; used when a `Code` attribute carries several.
    pub fn extend(&mut self, other: LocalVariableTable) {
        self.entries.extend(other.entries);
    }

    /// All entries, in class-file order.
    #[must_use]
    pub fn entries(&self) -> &[LocalVariable] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
