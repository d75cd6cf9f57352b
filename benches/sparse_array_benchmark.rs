use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis::collections::HugeSparseArrayBuilder;

fn bench_sparse_array(c: &mut Criterion) {
    c.bench_function("sparse_set_dense_range", |b| {
        b.iter(|| {
            let builder = HugeSparseArrayBuilder::<i64>::with_zero_default();
            for i in 0..10_000u64 {
                builder.set(i, i as i64);
            }
            black_box(builder.build())
        });
    });

    c.bench_function("sparse_set_scattered_range", |b| {
        b.iter(|| {
            let builder = HugeSparseArrayBuilder::<i64>::with_zero_default();
            // One write per page over a wide index range.
            for i in 0..1_000u64 {
                builder.set(i * 4096, i as i64);
            }
            black_box(builder.build())
        });
    });

    let builder = HugeSparseArrayBuilder::<i64>::new(-1);
    for i in 0..100_000u64 {
        builder.set(i * 7, i as i64);
    }
    let array = builder.build();
    c.bench_function("sparse_get_mixed_hits", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for i in 0..100_000u64 {
                sum = sum.wrapping_add(array.get(i * 3));
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_sparse_array);
criterion_main!(benches);
