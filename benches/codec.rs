//! Criterion benchmarks for the base100 codec.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use base100::{decode, decode_str, decoded_len, encode, encode_to_string, encoded_len};

const SAMPLE: &[u8] = b"the quick brown fox jumped over the lazy dog\n";

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("encode", |b| {
        let mut dst = vec![0; encoded_len(SAMPLE.len())];
        b.iter(|| encode(black_box(&mut dst[..]), black_box(SAMPLE)));
    });

    group.bench_function("encode_to_string", |b| {
        b.iter(|| encode_to_string(black_box(SAMPLE)));
    });

    group.bench_function("decode", |b| {
        let text = encode_to_string(SAMPLE).into_bytes();
        let mut dst = vec![0; decoded_len(text.len())];
        b.iter(|| decode(black_box(&mut dst[..]), black_box(&text)).unwrap());
    });

    group.bench_function("decode_str", |b| {
        let text = encode_to_string(SAMPLE);
        b.iter(|| decode_str(black_box(&text)).unwrap());
    });

    group.finish();
}

fn bench_large_input(c: &mut Criterion) {
    let input: Vec<u8> = SAMPLE.repeat(1000);
    let mut group = c.benchmark_group("codec_64k");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("encode", |b| {
        let mut dst = vec![0; encoded_len(input.len())];
        b.iter(|| encode(black_box(&mut dst[..]), black_box(&input)));
    });

    group.bench_function("decode", |b| {
        let text = encode_to_string(&input).into_bytes();
        let mut dst = vec![0; decoded_len(text.len())];
        b.iter(|| decode(black_box(&mut dst[..]), black_box(&text)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_codec, bench_large_input);
criterion_main!(benches);
