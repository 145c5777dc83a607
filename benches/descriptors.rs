//! Benchmarks for descriptor decoding.
//!
//! Covers the three stages of parameter decoding:
//! - Token splitting of the parameter section
//! - Grammar-correct descriptor parsing
//! - Full method summaries against a registry

extern crate sigscope;

use criterion::{criterion_group, criterion_main, Criterion};
use sigscope::{
    metadata::{
        descriptor::{param_type_names, parse_method_descriptor},
        method::LocalVariableTable,
    },
    DecoderConfig, MethodDecoder, MethodInfo, TypeRegistry,
};
use std::hint::black_box;

const SIMPLE: &str = "(Ljava/lang/String;I)V";
const WIDE: &str = "(Ljava/lang/String;Ljava/util/List;Ljava/util/Map;ILjava/lang/Object;[JZ)Ljava/lang/Object;";

/// Benchmark splitting a short descriptor into tokens.
fn bench_tokens_simple(c: &mut Criterion) {
    c.bench_function("tokens_simple", |b| {
        b.iter(|| black_box(param_type_names(black_box(SIMPLE))));
    });
}

/// Benchmark splitting a descriptor with many reference parameters.
fn bench_tokens_wide(c: &mut Criterion) {
    c.bench_function("tokens_wide", |b| {
        b.iter(|| black_box(param_type_names(black_box(WIDE))));
    });
}

/// Benchmark the strict parser on the same descriptor.
fn bench_parse_wide(c: &mut Criterion) {
    c.bench_function("parse_wide", |b| {
        b.iter(|| {
            let descriptor = parse_method_descriptor(black_box(WIDE)).unwrap();
            black_box(descriptor)
        });
    });
}

fn registry() -> TypeRegistry {
    let registry = TypeRegistry::new();
    registry.register_class("java.util.List");
    registry.register_class("java.util.Map");
    registry
}

/// Benchmark a full summary of an instance method with debug names.
fn bench_summary(c: &mut Criterion) {
    let registry = registry();
    let decoder = MethodDecoder::new(&registry);
    let method = MethodInfo::new(0x0001, "configure", WIDE).with_local_variables(
        LocalVariableTable::from_names([
            (0, "this"),
            (1, "name"),
            (2, "items"),
            (3, "options"),
            (4, "count"),
            (5, "fallback"),
        ]),
    );

    c.bench_function("summary_wide", |b| {
        b.iter(|| {
            let summary = decoder.summarize(black_box(&method)).unwrap();
            black_box(summary)
        });
    });
}

/// Benchmark element-aware array decoding.
fn bench_element_aware_arrays(c: &mut Criterion) {
    let registry = registry();
    let decoder = MethodDecoder::new(&registry).with_config(DecoderConfig::default().with_array_decoding(
        sigscope::metadata::config::ArrayDecoding::ElementAware,
    ));

    c.bench_function("decode_array_element_aware", |b| {
        b.iter(|| {
            let handle = decoder
                .decode_field_type(black_box("[[Ljava/util/List;"))
                .unwrap();
            black_box(handle)
        });
    });
}

criterion_group!(
    benches,
    bench_tokens_simple,
    bench_tokens_wide,
    bench_parse_wide,
    bench_summary,
    bench_element_aware_arrays
);
criterion_main!(benches);
