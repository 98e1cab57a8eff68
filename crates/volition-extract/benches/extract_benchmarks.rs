//! Benchmarks for the entity extraction hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use volition_extract::EntityExtractor;

const SHORT_TEXT: &str = "내일 오후 3시 강남역에서 보자";

const MIXED_TEXT: &str = "다음 달 15일 결혼식이야. 축의금 10만 원 준비하고 \
    민수씨한테 010-1234-5678 로 연락해 줘. 초대장은 kim@example.com 으로 \
    왔고 장소는 강남역 예식장, 대학 동기 모임도 같은 날이야. \
    회비는 100,000원 입금하면 된대.";

fn bench_extract(c: &mut Criterion) {
    let extractor = EntityExtractor::new();

    c.bench_function("extract_short", |b| {
        b.iter(|| extractor.extract(black_box(SHORT_TEXT)))
    });

    c.bench_function("extract_mixed", |b| {
        b.iter(|| extractor.extract(black_box(MIXED_TEXT)))
    });

    c.bench_function("extractor_construction", |b| {
        b.iter(|| EntityExtractor::new())
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
