//! Benchmarks for signature parsing.
//!
//! Covers the signature kinds the type model is built from:
//! - Method signatures (simple, instance, generic)
//! - Field signatures (primitives, generic instances)
//! - Property signatures
//! - Type specification signatures

extern crate dotscribe;

use criterion::{criterion_group, criterion_main, Criterion};
use dotscribe::metadata::signatures::{
    parse_field_signature, parse_method_signature, parse_property_signature,
    parse_type_spec_signature,
};
use std::hint::black_box;

/// Signature: int Method(int a, string b, bool c)
fn bench_method_signature_primitives(c: &mut Criterion) {
    // DEFAULT, 3 params, I4 return, I4, STRING, BOOLEAN params
    let signature = [0x00, 0x03, 0x08, 0x08, 0x0E, 0x02];

    c.bench_function("sig_method_primitives", |b| {
        b.iter(|| black_box(parse_method_signature(black_box(&signature)).unwrap()));
    });
}

/// Signature: void Instance.Method<T>(T item, ref int count)
fn bench_method_signature_generic_instance(c: &mut Criterion) {
    // HASTHIS | GENERIC, 1 generic param, 2 params, VOID return, MVAR 0, BYREF I4
    let signature = [0x30, 0x01, 0x02, 0x01, 0x1E, 0x00, 0x10, 0x08];

    c.bench_function("sig_method_generic_instance", |b| {
        b.iter(|| black_box(parse_method_signature(black_box(&signature)).unwrap()));
    });
}

/// Signature: List<Dictionary<string, int[]>> field
fn bench_field_signature_nested_generic(c: &mut Criterion) {
    // FIELD, GENERICINST CLASS TypeRef#1 1 arg, GENERICINST CLASS TypeRef#2 2 args STRING SZARRAY I4
    let signature = [
        0x06, 0x15, 0x12, 0x05, 0x01, 0x15, 0x12, 0x09, 0x02, 0x0E, 0x1D, 0x08,
    ];

    c.bench_function("sig_field_nested_generic", |b| {
        b.iter(|| black_box(parse_field_signature(black_box(&signature)).unwrap()));
    });
}

/// Signature: instance string Item[int]
fn bench_property_signature_indexer(c: &mut Criterion) {
    // PROPERTY | HASTHIS, 1 param, STRING type, I4 param
    let signature = [0x28, 0x01, 0x0E, 0x08];

    c.bench_function("sig_property_indexer", |b| {
        b.iter(|| black_box(parse_property_signature(black_box(&signature)).unwrap()));
    });
}

/// Signature: int[,]
fn bench_type_spec_multi_array(c: &mut Criterion) {
    // ARRAY I4, rank 2, 0 sizes, 0 lower bounds
    let signature = [0x14, 0x08, 0x02, 0x00, 0x00];

    c.bench_function("sig_typespec_multi_array", |b| {
        b.iter(|| black_box(parse_type_spec_signature(black_box(&signature)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_method_signature_primitives,
    bench_method_signature_generic_instance,
    bench_field_signature_nested_generic,
    bench_property_signature_indexer,
    bench_type_spec_multi_array
);
criterion_main!(benches);
