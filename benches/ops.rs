use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use lfukit::policy::lfu::LfuCache;

fn bench_put_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_put_get");
    let ops_per_iter = 1024u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));
    group.bench_function("put_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(1024, 0.25);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_eviction_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_eviction_pass");
    for factor in [0.1, 0.5, 0.9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(factor),
            &factor,
            |b, &factor| {
                b.iter_batched(
                    || {
                        let mut cache = LfuCache::new(4096, factor);
                        for i in 0..4096u64 {
                            cache.put(i, i);
                        }
                        cache
                    },
                    |mut cache| {
                        // One over-capacity put triggers a full eviction pass.
                        cache.put(std::hint::black_box(1_000_000), 0);
                        cache
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_put_get, bench_eviction_pass);
criterion_main!(benches);
