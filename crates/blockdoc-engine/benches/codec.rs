use blockdoc_engine::{parse_document, serialize_document};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.sample_size(10);

    let content = common::generate_document(100);
    group.bench_function("decode", |b| {
        b.iter(|| {
            let doc = parse_document(std::hint::black_box(content.as_bytes()));
            std::hint::black_box(doc);
        });
    });

    let doc = parse_document(content.as_bytes());
    group.bench_function("encode", |b| {
        b.iter(|| {
            let text = serialize_document(std::hint::black_box(&doc));
            std::hint::black_box(text);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
