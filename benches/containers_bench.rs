use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use keyed_containers::{ChainedHashTable, Container, OrderedTree, SortedArray};
use std::time::Duration;

const N: usize = 10_000;

fn lcg(mut s: u64) -> impl Iterator<Item = i32> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some((s >> 33) as i32)
    })
}

fn backends() -> [(&'static str, fn() -> Box<dyn Container>); 3] {
    [
        ("hash_table", || Box::new(ChainedHashTable::new(N as i32))),
        ("ordered_tree", || Box::new(OrderedTree::new())),
        ("sorted_array", || Box::new(SortedArray::new(10, 2.0))),
    ]
}

fn bench_add(c: &mut Criterion) {
    for (name, make) in backends() {
        c.bench_function(&format!("{name}_add_10k_random"), |b| {
            b.iter_batched(
                make,
                |mut m| {
                    for (i, k) in lcg(1).take(N).enumerate() {
                        m.add(k, i as i32);
                    }
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

// Sorted keys are the tree's worst case: every insert walks the whole spine.
fn bench_add_sorted(c: &mut Criterion) {
    for (name, make) in backends() {
        c.bench_function(&format!("{name}_add_2k_ascending"), |b| {
            b.iter_batched(
                make,
                |mut m| {
                    for k in 0..2_000 {
                        m.add(k, k);
                    }
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_find(c: &mut Criterion) {
    for (name, make) in backends() {
        let mut m = make();
        let keys: Vec<i32> = lcg(7).take(N).collect();
        for (i, &k) in keys.iter().enumerate() {
            m.add(k, i as i32);
        }
        let mut hits = keys.iter().cycle();
        c.bench_function(&format!("{name}_find_hit"), |b| {
            b.iter(|| black_box(m.find(*hits.next().unwrap())))
        });
        let mut misses = lcg(0xdead_beef);
        c.bench_function(&format!("{name}_find_miss"), |b| {
            b.iter(|| black_box(m.find(misses.next().unwrap())))
        });
    }
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add, bench_add_sorted, bench_find
}
criterion_main!(benches);
