use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cow_trie::Trie;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_keys(count: usize, len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect()
}

fn build(keys: &[String]) -> Trie {
    keys.iter()
        .enumerate()
        .fold(Trie::new(), |trie, (i, key)| trie.put(key, i as u64))
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    for &size in &[100usize, 1_000, 10_000] {
        let keys = random_keys(size, 12);
        group.bench_with_input(BenchmarkId::new("build", size), &keys, |b, keys| {
            b.iter(|| build(black_box(keys)))
        });

        let base = build(&keys);
        group.bench_with_input(BenchmarkId::new("single_on_existing", size), &base, |b, base| {
            b.iter(|| base.put(black_box("benchmark-key"), 1u64))
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let keys = random_keys(10_000, 12);
    let trie = build(&keys);

    c.bench_function("get_hit", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(trie.get::<u64>(&keys[i]))
        })
    });

    c.bench_function("get_type_mismatch", |b| {
        b.iter(|| black_box(trie.get::<u32>(&keys[0])))
    });
}

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(10_000, 12);
    let trie = build(&keys);

    c.bench_function("remove_existing", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            trie.remove(black_box(&keys[i]))
        })
    });
}

criterion_group!(benches, bench_put, bench_get, bench_remove);
criterion_main!(benches);
