use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zipzap::{CompressedFile, Compressor, Decoder, Encoder};

const PHRASE: &str = "the quick brown fox jumps over the lazy dog. ";

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for repeats in [10, 100, 1000] {
        let text = PHRASE.repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| {
                let encoder = Encoder::new(black_box(text));
                encoder.encode(text).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for repeats in [10, 100, 1000] {
        let text = PHRASE.repeat(repeats);
        let encoder = Encoder::new(&text);
        let bits = encoder.encode(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &bits, |b, bits| {
            b.iter(|| Decoder::new(encoder.table()).decode(black_box(bits)).unwrap())
        });
    }
    group.finish();
}

fn bench_container(c: &mut Criterion) {
    let text = PHRASE.repeat(1000);
    let output = Compressor::default().compress(&text).unwrap();
    c.bench_function("container_to_bytes", |b| {
        b.iter(|| black_box(&output.file).to_bytes().unwrap())
    });
    c.bench_function("container_from_bytes", |b| {
        b.iter(|| CompressedFile::from_bytes(black_box(&output.data)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_container);
criterion_main!(benches);
