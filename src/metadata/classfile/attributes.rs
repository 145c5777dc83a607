//! Attribute walking (JVMS §4.7).
//!
//! Only the attributes on the path from a method to its parameter names are decoded:
//! `Code` and the `LocalVariableTable` nested inside it. Every other attribute is skipped by
//! its declared length.

use crate::{
    file::parser::Parser,
    metadata::{
        classfile::constant_pool::ConstantPool,
        method::{LocalVariable, LocalVariableTable},
    },
    Result,
};

/// Name of the method attribute holding bytecode
pub const CODE: &str = "Code";
/// Name of the `Code` sub-attribute holding local-variable debug names
pub const LOCAL_VARIABLE_TABLE: &str = "LocalVariableTable";

/// A raw attribute: resolved name and undecoded body.
pub struct RawAttribute<'a> {
    /// Attribute name from the constant pool
    pub name: &'a str,
    /// `info` bytes, `attribute_length` long
    pub info: &'a [u8],
}

/// Read `attributes_count` followed by that many attributes.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if an attribute runs past the input and
/// [`crate::Error::Malformed`] if a name index is not a `Utf8` entry.
pub fn read_attributes<'a, 'd: 'a>(
    parser: &mut Parser<'d>,
    pool: &'a ConstantPool,
) -> Result<Vec<RawAttribute<'a>>> {
    let count = parser.read_be::<u16>()?;
    let mut attributes = Vec::with_capacity(usize::from(count));

    for _ in 0..count {
        let name_index = parser.read_be::<u16>()?;
        let length = parser.read_be::<u32>()?;
        let length = usize::try_from(length).map_err(|_| out_of_bounds_error!())?;

        attributes.push(RawAttribute {
            name: pool.utf8(name_index)?,
            info: parser.read_bytes(length)?,
        });
    }

    Ok(attributes)
}

/// Skip `attributes_count` attributes without resolving their names.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] on truncated input.
pub fn skip_attributes(parser: &mut Parser) -> Result<()> {
    let count = parser.read_be::<u16>()?;
    for _ in 0..count {
        parser.advance_by(2)?;
        let length = parser.read_be::<u32>()?;
        parser.advance_by(usize::try_from(length).map_err(|_| out_of_bounds_error!())?)?;
    }
    Ok(())
}

/// Collect the local-variable tables of a method's attributes.
///
/// Returns `None` if the method has no `Code` attribute or its `Code` carries no
/// `LocalVariableTable`. Several tables are merged in class-file order.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::Malformed`] if the `Code`
/// attribute or a table inside it is damaged.
pub fn local_variables(
    attributes: &[RawAttribute],
    pool: &ConstantPool,
) -> Result<Option<LocalVariableTable>> {
    let mut merged: Option<LocalVariableTable> = None;

    for code in attributes.iter().filter(|attribute| attribute.name == CODE) {
        let mut parser = Parser::new(code.info);
        // max_stack, max_locals
        parser.advance_by(4)?;
        let code_length = parser.read_be::<u32>()?;
        parser.advance_by(usize::try_from(code_length).map_err(|_| out_of_bounds_error!())?)?;
        let exception_table_length = parser.read_be::<u16>()?;
        parser.advance_by(usize::from(exception_table_length) * 8)?;

        for nested in read_attributes(&mut parser, pool)? {
            if nested.name != LOCAL_VARIABLE_TABLE {
                continue;
            }

            let table = read_local_variable_table(nested.info, pool)?;
            match merged.as_mut() {
                Some(existing) => existing.extend(table),
                None => merged = Some(table),
            }
        }
    }

    Ok(merged)
}

fn read_local_variable_table(info: &[u8], pool: &ConstantPool) -> Result<LocalVariableTable> {
    let mut parser = Parser::new(info);
    let count = parser.read_be::<u16>()?;
    let mut entries = Vec::with_capacity(usize::from(count));

    for _ in 0..count {
        let start_pc = parser.read_be::<u16>()?;
        let length = parser.read_be::<u16>()?;
        let name_index = parser.read_be::<u16>()?;
        let descriptor_index = parser.read_be::<u16>()?;
        let index = parser.read_be::<u16>()?;

        entries.push(LocalVariable {
            start_pc,
            length,
            name: pool.utf8(name_index)?.to_string(),
            descriptor: pool.utf8(descriptor_index)?.to_string(),
            index,
        });
    }

    Ok(LocalVariableTable::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::ClassFileBuilder, Error};

    #[test]
    fn code_without_table() {
        let mut builder = ClassFileBuilder::new("A");
        let code = builder.code_attribute(&[], &[]);
        let pool = builder.constant_pool();

        let attributes = vec![RawAttribute {
            name: CODE,
            info: &code,
        }];
        assert!(local_variables(&attributes, &pool).unwrap().is_none());
        assert!(local_variables(&[], &pool).unwrap().is_none());
    }

    #[test]
    fn tables_are_merged() {
        let mut builder = ClassFileBuilder::new("A");
        let first = builder.local_variable_table(&[(0, "this", "LA;"), (1, "x", "I")]);
        let second = builder.local_variable_table(&[(2, "y", "J")]);
        let code = builder.code_attribute(&[0xB1], &[first, second]);
        let pool = builder.constant_pool();

        let attributes = vec![RawAttribute {
            name: CODE,
            info: &code,
        }];
        let table = local_variables(&attributes, &pool).unwrap().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.name_for_slot(1), Some("x"));
        assert_eq!(table.name_for_slot(2), Some("y"));
        assert_eq!(table.entries()[2].descriptor, "J");
    }

    #[test]
    fn truncated_code() {
        let builder = ClassFileBuilder::new("A");
        let pool = builder.constant_pool();
        let attributes = vec![RawAttribute {
            name: CODE,
            info: &[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x10],
        }];
        assert!(matches!(
            local_variables(&attributes, &pool),
            Err(Error::OutOfBounds)
        ));
    }

    #[test]
    fn skip() {
        let data = [0x00, 0x01, 0x00, 0x09, 0x00, 0x00, 0x00, 0x02, 0xAA, 0xBB, 0x42];
        let mut parser = Parser::new(&data);
        skip_attributes(&mut parser).unwrap();
        assert_eq!(parser.read_be::<u8>().unwrap(), 0x42);
    }
}
