// Performance benchmarks for the redmap object mapper
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use redmap::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn generate_user(scalar_fields: usize, tags: usize) -> Value {
    let mut rng = rand::rng();
    let mut object = Map::new();
    for i in 0..scalar_fields {
        object.insert(format!("field{i}"), json!(rng.random_range(0..10_000)));
    }
    object.insert("name".to_string(), json!("benchmark user"));
    object.insert(
        "tags".to_string(),
        Value::Array((0..tags).map(|i| json!(format!("tag{i}"))).collect()),
    );
    object.insert(
        "metrics".to_string(),
        Value::Array(
            (0..tags)
                .map(|i| json!({ "value": format!("metric{i}"), "score": i }))
                .collect(),
        ),
    );
    object.insert(
        "profile".to_string(),
        json!({ "bio": "generated", "joined": rng.random_range(2000..2026) }),
    );
    Value::Object(object)
}

fn benchmark_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");

    for size in [4, 16, 64].iter() {
        let sample = generate_user(*size, 8);
        group.bench_with_input(BenchmarkId::new("redmap", size), size, |b, _| {
            b.iter(|| {
                let schema = Schema::infer(black_box(&sample)).unwrap();
                black_box(schema);
            });
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [4, 16, 64].iter() {
        let sample = generate_user(*size, 8);
        let schema = Schema::infer(&sample).unwrap();
        group.bench_with_input(BenchmarkId::new("redmap", size), size, |b, _| {
            b.iter(|| {
                let ops = redmap::encode(black_box("bench:user"), &sample, &schema).unwrap();
                black_box(ops);
            });
        });
    }

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    let rt = Runtime::new().unwrap();

    // Setup: write 1k objects through the mapper.
    let mapper = Arc::new(Mapper::new(Arc::new(MemoryStore::new())));
    let sample = generate_user(16, 8);
    rt.block_on(async {
        for i in 0..1000 {
            mapper.add(&format!("bench:user:{i}"), &sample).await.unwrap();
        }
    });

    group.bench_function("redmap_add", |b| {
        b.iter(|| {
            rt.block_on(async {
                mapper.add(black_box("bench:user:0"), &sample).await.unwrap();
            });
        });
    });

    group.bench_function("redmap_get", |b| {
        b.iter(|| {
            rt.block_on(async {
                let user = mapper.get(black_box("bench:user:500")).await.unwrap();
                black_box(user);
            });
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_infer, benchmark_encode, benchmark_roundtrip);
criterion_main!(benches);
