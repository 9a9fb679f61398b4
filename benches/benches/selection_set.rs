// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use towpath_selection::SelectionSet;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_set/insert");

    // Uniqueness is enforced by scanning, so insertion is O(n^2) in set
    // size. Pointer-driven selections are tiny; this tracks where the
    // quadratic behavior would start to matter.
    for len in [4_usize, 16, 64, 256] {
        let keys: Vec<u32> = (0..(len as u32)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("unique", len), &keys, |b, keys| {
            b.iter_batched(
                SelectionSet::<u32>::new,
                |mut sel| {
                    for key in keys {
                        sel.insert(*key);
                    }
                    black_box(sel);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("duplicates", len), &keys, |b, keys| {
            b.iter_batched(
                SelectionSet::<u32>::new,
                |mut sel| {
                    for key in keys {
                        sel.insert(*key);
                        sel.insert(*key);
                    }
                    black_box(sel);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_remove_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_set/remove_front");

    // unselect_all repeatedly removes the first member.
    for len in [4_usize, 64, 256] {
        let keys: Vec<u32> = (0..(len as u32)).collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("drain_by_first", len), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut sel = SelectionSet::new();
                    for key in keys {
                        sel.insert(*key);
                    }
                    sel
                },
                |mut sel| {
                    while let Some(first) = sel.first().copied() {
                        sel.remove(&first);
                    }
                    black_box(sel);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_remove_front);
criterion_main!(benches);
