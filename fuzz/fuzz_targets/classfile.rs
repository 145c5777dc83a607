#![no_main]

use libfuzzer_sys::fuzz_target;
use sigscope::{ClassFile, DecoderConfig, TypeRegistry};

fuzz_target!(|data: &[u8]| {
    if let Ok(class) = ClassFile::from_mem(data.to_vec()) {
        let registry = TypeRegistry::new();
        let _ = registry.register_classfile(&class);
        let _ = class.method_summaries(&registry, DecoderConfig::default());
        let _ = class.method_summaries(&registry, DecoderConfig::jvms());
    }
});
