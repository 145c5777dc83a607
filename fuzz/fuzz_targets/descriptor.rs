#![no_main]

use libfuzzer_sys::fuzz_target;
use sigscope::{
    metadata::{config::ArrayDecoding, descriptor::has_precision_loss},
    DecoderConfig, MethodDecoder, MethodInfo, TypeRegistry,
};

fuzz_target!(|data: &[u8]| {
    let Ok(descriptor) = std::str::from_utf8(data) else {
        return;
    };

    let registry = TypeRegistry::new();
    let method = MethodInfo::new(0x0021, "fuzz", descriptor);
    let _ = has_precision_loss(descriptor);

    for config in [
        DecoderConfig::default(),
        DecoderConfig::default().with_array_decoding(ArrayDecoding::ElementAware),
    ] {
        let decoder = MethodDecoder::new(&registry).with_config(config);
        let tokens = decoder.param_type_names(&method);
        assert_eq!(tokens.len(), decoder.param_names(&method).len());
        if let Ok(types) = decoder.param_types(&method) {
            assert_eq!(types.len(), tokens.len());
        }
    }
});
