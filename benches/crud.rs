//! Insert/lookup/remove benchmarks against the standard library BTreeMap.

use std::collections::BTreeMap;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::prelude::*;

use bosk::{RbMap, SplayMap};

const SIZES: [usize; 3] = [1000, 10000, 100000];

fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(1234567890);
    (0..count).map(|_| rng.random_range(0..u64::MAX)).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    for size in SIZES {
        let keys = random_keys(size);

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |b, keys| {
            b.iter_batched(
                RbMap::new,
                |mut map| {
                    for &key in keys {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("SplayMap", size), &keys, |b, keys| {
            b.iter_batched(
                SplayMap::new,
                |mut map| {
                    for &key in keys {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter_batched(
                BTreeMap::new,
                |mut map| {
                    for &key in keys {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("RbMap", size), &size, |b, &size| {
            b.iter_batched(
                RbMap::new,
                |mut map| {
                    for key in 0..size as u64 {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("SplayMap", size), &size, |b, &size| {
            b.iter_batched(
                SplayMap::new,
                |mut map| {
                    for key in 0..size as u64 {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |b, &size| {
            b.iter_batched(
                BTreeMap::new,
                |mut map| {
                    for key in 0..size as u64 {
                        map.insert(key, key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_random");
    for size in SIZES {
        let keys = random_keys(size);

        let mut rb = RbMap::new();
        let mut sp = SplayMap::new();
        let mut bt = BTreeMap::new();
        for &key in &keys {
            rb.insert(key, key);
            sp.insert(key, key);
            bt.insert(key, key);
        }

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut found = 0;
                for key in keys {
                    if rb.get(key).is_some() {
                        found += 1;
                    }
                }
                found
            })
        });
        group.bench_with_input(BenchmarkId::new("SplayMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut found = 0;
                for key in keys {
                    if sp.get(key).is_some() {
                        found += 1;
                    }
                }
                found
            })
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut found = 0;
                for key in keys {
                    if bt.get(key).is_some() {
                        found += 1;
                    }
                }
                found
            })
        });
    }
    group.finish();
}

// A skewed workload, where most lookups hit a small hot set. This is where the
// splay tree's move-to-root behaviour pays off.
fn bench_get_skewed(c: &mut Criterion) {
    const SIZE: usize = 100000;
    const HOT: usize = 16;
    const LOOKUPS: usize = 100000;

    let keys = random_keys(SIZE);
    let mut rng = SmallRng::seed_from_u64(9876543210);
    let lookups: Vec<u64> = (0..LOOKUPS)
        .map(|_| {
            if rng.random_range(0..100) < 95 {
                keys[rng.random_range(0..HOT)]
            } else {
                keys[rng.random_range(0..SIZE)]
            }
        })
        .collect();

    let mut rb = RbMap::new();
    let mut sp = SplayMap::new();
    let mut bt = BTreeMap::new();
    for &key in &keys {
        rb.insert(key, key);
        sp.insert(key, key);
        bt.insert(key, key);
    }

    let mut group = c.benchmark_group("get_skewed");
    group.bench_function("RbMap", |b| {
        b.iter(|| {
            let mut found = 0;
            for key in &lookups {
                if rb.get(key).is_some() {
                    found += 1;
                }
            }
            found
        })
    });
    group.bench_function("SplayMap", |b| {
        b.iter(|| {
            let mut found = 0;
            for key in &lookups {
                if sp.get(key).is_some() {
                    found += 1;
                }
            }
            found
        })
    });
    group.bench_function("BTreeMap", |b| {
        b.iter(|| {
            let mut found = 0;
            for key in &lookups {
                if bt.get(key).is_some() {
                    found += 1;
                }
            }
            found
        })
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_random");
    for size in SIZES {
        let keys = random_keys(size);

        let mut rb = RbMap::new();
        let mut sp = SplayMap::new();
        let mut bt = BTreeMap::new();
        for &key in &keys {
            rb.insert(key, key);
            sp.insert(key, key);
            bt.insert(key, key);
        }

        group.bench_with_input(BenchmarkId::new("RbMap", size), &keys, |b, keys| {
            b.iter_batched(
                || rb.clone(),
                |mut map| {
                    for key in keys {
                        map.remove(key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("SplayMap", size), &keys, |b, keys| {
            b.iter_batched(
                || sp.clone(),
                |mut map| {
                    for key in keys {
                        map.remove(key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter_batched(
                || bt.clone(),
                |mut map| {
                    for key in keys {
                        map.remove(key);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_sequential,
    bench_get,
    bench_get_skewed,
    bench_remove
);
criterion_main!(benches);
