use std::{fmt::Display, marker::PhantomData};

use super::{Hasher, Sum};

/// A leaf holds exactly one entry of the map: a full-width `key`, an opaque
/// `value` and a non-negative `sum`.
///
/// The key is deliberately absent from the digest preimage: a leaf is bound
/// to its key by its position on the authenticated path, so two leaves with
/// equal `(value, sum)` hash identically and are told apart structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    key: [u8; HASH_SIZE],
    value: Vec<u8>,
    sum: Sum,
    node_hash: [u8; HASH_SIZE],
    _phantom: PhantomData<H>,
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Leaf<HASH_SIZE, H> {
    /// Creates a new [`Leaf`]. This function performs a hash.
    pub fn new(key: [u8; HASH_SIZE], value: Vec<u8>, sum: Sum) -> Self {
        let node_hash = H::hash(
            [value.as_slice(), sum.to_le_bytes().as_slice()]
                .concat()
                .as_slice(),
        );
        Self {
            key,
            value,
            sum,
            node_hash,
            _phantom: PhantomData,
        }
    }

    /// Returns the key of the node.
    pub fn key(&self) -> &[u8; HASH_SIZE] {
        &self.key
    }

    /// Returns the value of the node.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the sum of the node.
    pub fn sum(&self) -> Sum {
        self.sum
    }

    /// Returns the hash of the node. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.node_hash
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Leaf<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Leaf {{ key: {}, sum: {}, hash: {}, value: {:?} }}",
            hex::encode(self.key().as_slice()),
            self.sum(),
            hex::encode(self.hash().as_slice()),
            self.value()
        )
    }
}

#[cfg(test)]
mod test {
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn test_leaf_hash() {
        assert_eq!(
            super::Leaf::<32, Sha256>::new([0; 32], vec![1, 2, 3], 1).hash(),
            hex!("d7f6298fe9c4afd54edacd3320a3270f2e0c66d1006b3bde71844789c4c28546")
        );
    }

    #[test]
    fn test_leaf_hash_full_width_value() {
        assert_eq!(
            super::Leaf::<32, Sha256>::new(
                [0; 32],
                vec![
                    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22,
                    23, 24, 25, 26, 27, 28, 29, 30, 31, 32
                ],
                1
            )
            .hash(),
            hex!("e38e68c57a16a6e6ecb857fdef900099ac2a53b1c1b0f6803fe7c07f1569ea31")
        );
    }

    #[test]
    fn test_leaf_hash_ignores_key() {
        let a = super::Leaf::<32, Sha256>::new([0x01; 32], vec![9, 9], 4);
        let b = super::Leaf::<32, Sha256>::new([0x02; 32], vec![9, 9], 4);
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_leaf_sum_and_value() {
        let leaf = super::Leaf::<32, Sha256>::new([0; 32], vec![1, 2, 3], 7);
        assert_eq!(leaf.sum(), 7);
        assert_eq!(leaf.value(), &[1, 2, 3]);
    }

    #[test]
    fn test_leaf_display() {
        assert_eq!(
            format!("{}", super::Leaf::<32, Sha256>::new([0x11; 32], vec![1, 2, 3], 1)),
            "Leaf { key: 1111111111111111111111111111111111111111111111111111111111111111, sum: 1, hash: d7f6298fe9c4afd54edacd3320a3270f2e0c66d1006b3bde71844789c4c28546, value: [1, 2, 3] }"
        );
    }
}
