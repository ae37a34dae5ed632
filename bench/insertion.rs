use criterion::{criterion_group, criterion_main, Criterion};
use merkle_sum_trie::MerkleSumTrie;
use sha2::Sha256;

pub fn generate_random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    for byte in key.iter_mut() {
        *byte = rand::random();
    }
    key
}

pub fn generate_random_value() -> Vec<u8> {
    let mut value = Vec::with_capacity(32);
    for _ in 0..32 {
        value.push(rand::random());
    }
    value
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie Insertion");

    group.bench_function("100 random keys", |b| {
        b.iter(|| {
            let mut tree = MerkleSumTrie::<32, Sha256>::new();
            for _ in 0..100 {
                let key = generate_random_key();
                tree = tree
                    .insert(&key, generate_random_value(), rand::random::<u32>() as u64)
                    .unwrap();
            }
            tree
        })
    });

    group.finish();
}

fn bench_deletion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie Deletion");

    let mut tree = MerkleSumTrie::<32, Sha256>::new();
    let mut keys = Vec::with_capacity(100);
    for _ in 0..100 {
        let key = generate_random_key();
        tree = tree
            .insert(&key, generate_random_value(), rand::random::<u32>() as u64)
            .unwrap();
        keys.push(key);
    }

    group.bench_function("100 random keys", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for key in &keys {
                tree = tree.delete(key).unwrap();
            }
            tree
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insertion, bench_deletion);
criterion_main!(benches);
