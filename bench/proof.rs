use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_sum_trie::{verify_merkle_proof, MerkleSumTrie};
use sha2::Sha256;

pub fn generate_random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    for byte in key.iter_mut() {
        *byte = rand::random();
    }
    key
}

type Entry = ([u8; 32], Vec<u8>, u64);

fn setup_tree(num_leaves: usize) -> (MerkleSumTrie<32, Sha256>, Vec<Entry>) {
    let mut tree = MerkleSumTrie::<32, Sha256>::new();
    let mut entries = Vec::with_capacity(num_leaves);

    for _ in 0..num_leaves {
        let key = generate_random_key();
        let value = generate_random_key().to_vec();
        let sum = rand::random::<u32>() as u64;
        tree = tree.insert(&key, value.clone(), sum).unwrap();
        entries.push((key, value, sum));
    }

    (tree, entries)
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie Proof Generation");

    let (tree, entries) = setup_tree(100);

    group.bench_function("100 proofs", |b| {
        b.iter(|| {
            for (key, _, _) in &entries {
                black_box(tree.merkle_proof(key));
            }
        })
    });

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trie Proof Verification");

    let (tree, entries) = setup_tree(100);
    let root_hash = tree.root_hash();
    let proofs: Vec<_> = entries
        .iter()
        .map(|(key, _, _)| tree.merkle_proof(key))
        .collect();

    group.bench_function("100 proofs", |b| {
        b.iter(|| {
            for ((key, value, sum), proof) in entries.iter().zip(proofs.iter()) {
                assert!(black_box(verify_merkle_proof::<32, Sha256>(
                    root_hash, key, value, *sum, proof,
                )));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_proof_generation, bench_proof_verification);
criterion_main!(benches);
