use crate::{
    metadata::{
        descriptor::{FieldType, MethodDescriptor, ReturnType},
        typesystem::PrimitiveKind,
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum number of array dimensions a descriptor may declare (JVMS §4.3.2)
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Strict parser for field and method descriptors.
///
/// Unlike the token splitter used for parameter names, this parser follows the descriptor
/// grammar exactly and rejects anything that does not conform to it.
///
/// # Example
///
/// ```rust
/// use sigscope::metadata::descriptor::{DescriptorParser, FieldType};
///
/// let mut parser = DescriptorParser::new("(IJLjava/lang/String;)V");
/// let method = parser.parse_method_descriptor()?;
/// assert_eq!(method.params.len(), 3);
/// assert_eq!(method.params[2], FieldType::Object("java/lang/String".into()));
/// # Ok::<(), sigscope::Error>(())
/// ```
pub struct DescriptorParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> DescriptorParser<'a> {
    /// Create a new `DescriptorParser` over a descriptor string
    ///
    /// ## Arguments
    /// * 'input' - The descriptor to read from
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        DescriptorParser { input, position: 0 }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns `true` once the whole input has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn next(&mut self) -> Result<u8> {
        let Some(byte) = self.peek() else {
            return Err(malformed_error!(
                "Descriptor ended unexpectedly - {}",
                self.input
            ));
        };
        self.position += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        let found = self.next()?;
        if found != expected {
            return Err(malformed_error!(
                "Expected '{}' at offset {} - {}",
                char::from(expected),
                self.position - 1,
                self.input
            ));
        }
        Ok(())
    }

    /// Parse a single field type starting at the current position.
    ///
    /// Trailing input is left unread; use [`DescriptorParser::is_at_end`] to check for it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for input that is not a field type and
    /// [`crate::Error::RecursionLimit`] for more than 255 array dimensions.
    pub fn parse_field_type(&mut self) -> Result<FieldType> {
        let mut dimensions = 0_usize;
        while self.peek() == Some(b'[') {
            self.position += 1;
            dimensions += 1;
            if dimensions > MAX_ARRAY_DIMENSIONS {
                return Err(RecursionLimit(MAX_ARRAY_DIMENSIONS));
            }
        }

        let tag = self.next()?;
        let mut field = match tag {
            b'L' => FieldType::Object(self.parse_class_name()?),
            other => match PrimitiveKind::from_tag(char::from(other)) {
                Some(kind) => FieldType::Base(kind),
                None => {
                    return Err(malformed_error!(
                        "Invalid field type tag '{}' at offset {} - {}",
                        char::from(other),
                        self.position - 1,
                        self.input
                    ))
                }
            },
        };

        for _ in 0..dimensions {
            field = FieldType::Array(Box::new(field));
        }

        Ok(field)
    }

    /// Parse the internal name of an `L...;` type; the leading `L` is already consumed.
    fn parse_class_name(&mut self) -> Result<String> {
        let rest = &self.input[self.position..];
        let Some(end) = rest.find(';') else {
            return Err(malformed_error!(
                "Unterminated class name at offset {} - {}",
                self.position,
                self.input
            ));
        };

        let name = &rest[..end];
        if name.is_empty()
            || name.split('/').any(str::is_empty)
            || name.contains(['.', '[', '(', ')'])
        {
            return Err(malformed_error!(
                "Invalid class name '{}' - {}",
                name,
                self.input
            ));
        }

        self.position += end + 1;
        Ok(name.to_string())
    }

    /// Parse a complete method descriptor; the input must be fully consumed.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the input is not a method descriptor.
    pub fn parse_method_descriptor(&mut self) -> Result<MethodDescriptor> {
        self.expect(b'(')?;

        let mut params = Vec::new();
        while self.peek() != Some(b')') {
            if self.is_at_end() {
                return Err(malformed_error!(
                    "Missing ')' in method descriptor - {}",
                    self.input
                ));
            }
            params.push(self.parse_field_type()?);
        }
        self.expect(b')')?;

        let return_type = if self.peek() == Some(b'V') {
            self.position += 1;
            ReturnType::Void
        } else {
            ReturnType::Field(self.parse_field_type()?)
        };

        if !self.is_at_end() {
            return Err(malformed_error!(
                "Trailing data after method descriptor at offset {} - {}",
                self.position,
                self.input
            ));
        }

        Ok(MethodDescriptor {
            params,
            return_type,
        })
    }
}
