//! Benchmarks for the free pipeline.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use reclaim::{Heap, HeapConfig, Value};

fn bench_text_free(c: &mut Criterion) {
    let heap = Heap::new(HeapConfig::default().with_poison(false));
    c.bench_function("alloc_free_text", |b| {
        b.iter(|| {
            let id = heap.alloc_text(black_box("the quick brown fox"));
            heap.free(Value::Obj(id)).unwrap();
        });
    });
}

fn bench_record_free(c: &mut Criterion) {
    let heap = Heap::new(HeapConfig::default().with_poison(false));
    let widget = heap.define_descriptor("Widget");
    let name = heap.intern("name");
    let size = heap.intern("size");

    c.bench_function("alloc_free_record", |b| {
        b.iter(|| {
            let id = heap
                .alloc_record(widget, &[(name, Value::Int(1)), (size, Value::Int(2))])
                .unwrap();
            heap.free(Value::Obj(id)).unwrap();
        });
    });
}

fn bench_finalized_free(c: &mut Criterion) {
    let heap = Heap::new(HeapConfig::default().with_poison(false));
    c.bench_function("alloc_free_with_finalizer", |b| {
        b.iter(|| {
            let id = heap.alloc_text(black_box("finalized"));
            heap.set_finalizer(id, |_| Ok(Value::Int(1))).unwrap();
            heap.free(Value::Obj(id)).unwrap();
        });
    });
}

fn bench_batch_free(c: &mut Criterion) {
    let heap = Heap::new(HeapConfig::default().with_poison(false));
    c.bench_function("free_all_batch_64", |b| {
        b.iter(|| {
            let values: Vec<Value> = (0..64)
                .map(|i| Value::Obj(heap.alloc_sequence(&[Value::Int(i)])))
                .collect();
            heap.free_all(&values).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_text_free,
    bench_record_free,
    bench_finalized_free,
    bench_batch_free
);
criterion_main!(benches);
