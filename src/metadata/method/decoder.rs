use std::sync::Arc;

use crate::{
    metadata::{
        config::{ArrayDecoding, DecoderConfig, SynchronizedSlot},
        descriptor::{self, DescriptorParser, FieldType},
        method::{slot_offset, MethodAccessFlags, MethodInfo, MethodSummary},
        typesystem::{
            array_marker_handle, boxed_handle, JvmType, JvmTypeRc, PrimitiveKind, TypeResolver,
        },
    },
    Error, Result,
};

/// Decodes parameter type tokens, parameter names and parameter types of a method.
///
/// The decoder borrows the [`TypeResolver`] used for object-reference lookups and is otherwise
/// stateless; one decoder can be shared across threads.
///
/// # Examples
///
/// ```rust
/// use sigscope::{
///     metadata::{method::LocalVariableTable, typesystem::TypeRegistry},
///     MethodDecoder, MethodInfo,
/// };
///
/// let registry = TypeRegistry::new();
/// let decoder = MethodDecoder::new(&registry);
///
/// let method = MethodInfo::new(0x0001, "setName", "(Ljava/lang/String;)V")
///     .with_local_variables(LocalVariableTable::from_names([(0, "this"), (1, "name")]));
///
/// assert_eq!(decoder.param_type_names(&method), vec!["Ljava/lang/String;"]);
/// assert_eq!(decoder.param_names(&method), vec!["name"]);
///
/// let types = decoder.param_types(&method)?;
/// assert_eq!(types[0].as_ref().unwrap().name, "java.lang.String");
/// # Ok::<(), sigscope::Error>(())
/// ```
pub struct MethodDecoder<'r, R: TypeResolver + ?Sized> {
    resolver: &'r R,
    config: DecoderConfig,
}

impl<'r, R: TypeResolver + ?Sized> MethodDecoder<'r, R> {
    /// Create a decoder with the default configuration.
    ///
    /// ## Arguments
    /// * 'resolver' - Lookup for object-reference types
    pub fn new(resolver: &'r R) -> Self {
        MethodDecoder {
            resolver,
            config: DecoderConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The local-variable slot of the first declared parameter.
    pub fn slot_offset(&self, flags: MethodAccessFlags) -> usize {
        let synchronized = match self.config.synchronized_slot {
            SynchronizedSlot::Reserved => flags.is_synchronized(),
            SynchronizedSlot::Ignored => false,
        };
        slot_offset(flags.is_static(), synchronized)
    }

    /// Per-parameter type tokens of `method`, see [`crate::metadata::descriptor::param_type_names`].
    pub fn param_type_names(&self, method: &MethodInfo) -> Vec<String> {
        descriptor::param_type_names(&method.descriptor)
    }

    /// One name per parameter token: the debug name of the parameter's slot, or the
    /// parameter's position when the method has no local-variable table or the table does
    /// not name that slot.
    pub fn param_names(&self, method: &MethodInfo) -> Vec<String> {
        let count = self.param_type_names(method).len();
        self.names_for(method, count)
    }

    /// Resolved handle per parameter token.
    ///
    /// Empty tokens and tokens with an unknown tag yield `None`.
    ///
    /// # Errors
    /// Returns [`crate::Error::ClasspathAccess`] wrapping the lookup failure if an object
    /// reference cannot be resolved.
    pub fn param_types(&self, method: &MethodInfo) -> Result<Vec<Option<JvmTypeRc>>> {
        let tokens = self.param_type_names(method);
        self.types_for(&tokens)
    }

    /// Decode all three views of `method` at once.
    ///
    /// Also checks the descriptor against the strict parser and logs a warning when the
    /// tokens do not separate every parameter.
    ///
    /// # Errors
    /// Returns [`crate::Error::ClasspathAccess`] if a parameter type cannot be resolved.
    pub fn summarize(&self, method: &MethodInfo) -> Result<MethodSummary> {
        let tokens = self.param_type_names(method);
        let param_names = self.names_for(method, tokens.len());
        let param_types = self.types_for(&tokens)?;

        let precision_loss = descriptor::has_precision_loss(&method.descriptor);
        if precision_loss {
            tracing::warn!(
                method = %method.name,
                descriptor = %method.descriptor,
                tokens = tokens.len(),
                "descriptor tokens do not separate every parameter"
            );
        }

        tracing::trace!(
            method = %method.name,
            descriptor = %method.descriptor,
            params = tokens.len(),
            "decoded method"
        );

        Ok(MethodSummary {
            name: method.name.clone(),
            descriptor: method.descriptor.clone(),
            param_type_names: tokens,
            param_names,
            param_types,
            precision_loss,
        })
    }

    /// Decode a single parameter type token.
    ///
    /// | token | result |
    /// |---|---|
    /// | `L<name>;` | the resolver's handle for `<name>` with `/` replaced by `.` |
    /// | `B C D F I J S Z` | the boxed wrapper handle |
    /// | `[...` | the array marker, or an element-aware handle if configured |
    /// | anything else | `None` |
    ///
    /// Only the leading character selects the case; the rest of a primitive token is ignored.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotResolvable`] (or whatever the resolver reports) if an
    /// object reference cannot be resolved.
    pub fn decode_field_type(&self, token: &str) -> Result<Option<JvmTypeRc>> {
        let Some(tag) = token.chars().next() else {
            return Ok(None);
        };

        match tag {
            'L' => {
                let content = &token[1..];
                let name = content.strip_suffix(';').unwrap_or(content).replace('/', ".");
                self.resolver.resolve(&name).map(Some)
            }
            '[' => match self.config.array_decoding {
                ArrayDecoding::Marker => Ok(Some(array_marker_handle())),
                ArrayDecoding::ElementAware => self.decode_array(token).map(Some),
            },
            other => Ok(PrimitiveKind::from_tag(other).map(boxed_handle)),
        }
    }

    fn names_for(&self, method: &MethodInfo, count: usize) -> Vec<String> {
        let offset = self.slot_offset(method.access_flags);

        (0..count)
            .map(|index| {
                method
                    .local_variables
                    .as_ref()
                    .and_then(|table| table.name_for_slot(index + offset))
                    .map_or_else(|| index.to_string(), str::to_string)
            })
            .collect()
    }

    fn types_for(&self, tokens: &[String]) -> Result<Vec<Option<JvmTypeRc>>> {
        tokens
            .iter()
            .map(|token| {
                if token.is_empty() {
                    return Ok(None);
                }
                self.decode_field_type(token).map_err(|error| {
                    let name = match &error {
                        Error::TypeNotResolvable(name) => name.clone(),
                        other => other.to_string(),
                    };
                    Error::ClasspathAccess {
                        message: format!("Class could not be found: {}", name),
                        source: Box::new(error),
                    }
                })
            })
            .collect()
    }

    /// Element-aware decoding of an array token. Tokens whose leading field type does not
    /// parse fall back to the array marker.
    fn decode_array(&self, token: &str) -> Result<JvmTypeRc> {
        let mut parser = DescriptorParser::new(token);
        match parser.parse_field_type() {
            Ok(field) => self.resolve_field(&field),
            Err(error) => {
                tracing::debug!(token, %error, "array token not decodable, using marker");
                Ok(array_marker_handle())
            }
        }
    }

    fn resolve_field(&self, field: &FieldType) -> Result<JvmTypeRc> {
        match field {
            FieldType::Base(kind) => Ok(Arc::new(JvmType::primitive(*kind))),
            FieldType::Object(name) => self.resolver.resolve(&name.replace('/', ".")),
            FieldType::Array(component) => {
                Ok(Arc::new(JvmType::array_of(self.resolve_field(component)?)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        method::LocalVariableTable,
        typesystem::{JvmFlavor, TypeRegistry},
    };

    fn registry() -> TypeRegistry {
        let registry = TypeRegistry::new();
        registry.register_class("java.util.List");
        registry
    }

    #[test]
    fn primitive_tokens() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let expected = [
            ("B", "java.lang.Byte"),
            ("C", "java.lang.Character"),
            ("D", "java.lang.Double"),
            ("F", "java.lang.Float"),
            ("I", "java.lang.Integer"),
            ("J", "java.lang.Long"),
            ("S", "java.lang.Short"),
            ("Z", "java.lang.Boolean"),
        ];
        for (token, name) in expected {
            let handle = decoder.decode_field_type(token).unwrap().unwrap();
            assert_eq!(handle.name, name);
            assert!(handle.is_boxed());
        }

        // Only the leading tag matters
        let handle = decoder.decode_field_type("IJZ").unwrap().unwrap();
        assert_eq!(handle.name, "java.lang.Integer");
    }

    #[test]
    fn unknown_tokens() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        assert!(decoder.decode_field_type("").unwrap().is_none());
        assert!(decoder.decode_field_type("V").unwrap().is_none());
        assert!(decoder.decode_field_type(";").unwrap().is_none());
        assert!(decoder.decode_field_type("Q").unwrap().is_none());
    }

    #[test]
    fn object_tokens() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let list = decoder.decode_field_type("Ljava/util/List;").unwrap().unwrap();
        assert_eq!(list.name, "java.util.List");

        // Terminator already removed
        let string = decoder.decode_field_type("Ljava/lang/String").unwrap().unwrap();
        assert_eq!(string.name, "java.lang.String");

        match decoder.decode_field_type("Lcom/not/Real;") {
            Err(Error::TypeNotResolvable(name)) => assert_eq!(name, "com.not.Real"),
            other => panic!("expected TypeNotResolvable, got {:?}", other),
        }
    }

    #[test]
    fn array_tokens_default_to_marker() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        for token in ["[I", "[[J", "[Ljava/lang/String;", "[Lcom/not/Real;", "["] {
            let handle = decoder.decode_field_type(token).unwrap().unwrap();
            assert!(handle.is_array_marker(), "{}", token);
            assert_eq!(handle.name, "java.util.Arrays");
        }
    }

    #[test]
    fn array_tokens_element_aware() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry)
            .with_config(DecoderConfig::default().with_array_decoding(ArrayDecoding::ElementAware));

        let ints = decoder.decode_field_type("[I").unwrap().unwrap();
        assert_eq!(ints.name, "[I");
        assert_eq!(
            ints.element().unwrap().flavor,
            JvmFlavor::Primitive(PrimitiveKind::Int)
        );

        let lists = decoder.decode_field_type("[[Ljava/util/List;").unwrap().unwrap();
        assert_eq!(lists.name, "[[Ljava.util.List;");
        assert_eq!(lists.element().unwrap().name, "[Ljava.util.List;");

        // Leading type wins, trailing primitives are ignored
        let joined = decoder.decode_field_type("[IJ").unwrap().unwrap();
        assert_eq!(joined.name, "[I");

        // Not decodable at all
        assert!(decoder.decode_field_type("[").unwrap().unwrap().is_array_marker());

        assert!(matches!(
            decoder.decode_field_type("[Lcom/not/Real;"),
            Err(Error::TypeNotResolvable(_))
        ));
    }

    #[test]
    fn slot_offsets_follow_config() {
        let registry = registry();
        let legacy = MethodDecoder::new(&registry);
        let jvms = MethodDecoder::new(&registry).with_config(DecoderConfig::jvms());

        let instance_sync = MethodAccessFlags::SYNCHRONIZED;
        let static_sync = MethodAccessFlags::STATIC | MethodAccessFlags::SYNCHRONIZED;

        assert_eq!(legacy.slot_offset(MethodAccessFlags::empty()), 1);
        assert_eq!(legacy.slot_offset(MethodAccessFlags::STATIC), 0);
        assert_eq!(legacy.slot_offset(instance_sync), 2);
        assert_eq!(legacy.slot_offset(static_sync), 1);

        assert_eq!(jvms.slot_offset(instance_sync), 1);
        assert_eq!(jvms.slot_offset(static_sync), 0);
    }

    #[test]
    fn names() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let without_table = MethodInfo::new(0x0001, "m", "(Ljava/lang/String;Ljava/util/List;)V");
        assert_eq!(decoder.param_names(&without_table), vec!["0", "1"]);

        let table = LocalVariableTable::from_names([(0, "this"), (1, "first"), (2, "second")]);
        let instance = without_table.clone().with_local_variables(table.clone());
        assert_eq!(decoder.param_names(&instance), vec!["first", "second"]);

        let static_method = MethodInfo::new(0x0009, "m", "(Ljava/lang/String;Ljava/util/List;)V")
            .with_local_variables(table.clone());
        assert_eq!(decoder.param_names(&static_method), vec!["this", "first"]);

        // Synchronized instance method: slots 2 and 3, slot 3 is not in the table
        let synchronized = MethodInfo::new(0x0021, "m", "(Ljava/lang/String;Ljava/util/List;)V")
            .with_local_variables(table);
        assert_eq!(decoder.param_names(&synchronized), vec!["second", "1"]);
    }

    #[test]
    fn param_types_wrap_failures() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let method = MethodInfo::new(0x0001, "m", "(Ljava/util/List;Lcom/not/Real;)V");
        match decoder.param_types(&method) {
            Err(Error::ClasspathAccess { message, source }) => {
                assert_eq!(message, "Class could not be found: com.not.Real");
                assert!(matches!(*source, Error::TypeNotResolvable(_)));
            }
            other => panic!("expected ClasspathAccess, got {:?}", other),
        }

        let method = MethodInfo::new(0x0001, "m", "(a;;b)V");
        let types = decoder.param_types(&method).unwrap();
        assert_eq!(types.len(), 3);
        assert!(types.iter().all(Option::is_none));
    }

    #[test]
    fn summary() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let method = MethodInfo::new(0x0008, "of", "(Ljava/util/List;I)Ljava/util/List;")
            .with_local_variables(LocalVariableTable::from_names([(0, "items"), (1, "limit")]));
        let summary = decoder.summarize(&method).unwrap();

        assert_eq!(summary.name, "of");
        assert_eq!(summary.param_type_names, vec!["Ljava/util/List;", "I"]);
        assert_eq!(summary.param_names, vec!["items", "limit"]);
        assert_eq!(summary.param_types.len(), 2);
        assert_eq!(summary.param_types[1].as_ref().unwrap().name, "java.lang.Integer");
        assert!(!summary.precision_loss);
    }

    #[test]
    fn summary_flags_joined_tokens() {
        let registry = registry();
        let decoder = MethodDecoder::new(&registry);

        let joined = MethodInfo::new(0x0009, "add", "(IJ)J");
        let summary = decoder.summarize(&joined).unwrap();
        assert_eq!(summary.param_type_names, vec!["IJ"]);
        assert!(summary.precision_loss);

        // Malformed descriptors have nothing to compare against
        let malformed = MethodInfo::new(0x0009, "m", "(#;%)V");
        assert!(!decoder.summarize(&malformed).unwrap().precision_loss);
    }
}
