use std::fmt::Display;

use super::Sum;

/// A digest/sum pair standing in for a full node. Proof siblings travel in
/// this form: reconstructing a root needs nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputedNode<const HASH_SIZE: usize> {
    node_hash: [u8; HASH_SIZE],
    sum: Sum,
}

impl<const HASH_SIZE: usize> ComputedNode<HASH_SIZE> {
    pub fn new(node_hash: [u8; HASH_SIZE], sum: Sum) -> Self {
        Self { node_hash, sum }
    }

    /// The stand-in for an empty subtree: all-zero digest, zero sum.
    pub fn empty() -> Self {
        Self {
            node_hash: [0; HASH_SIZE],
            sum: 0,
        }
    }

    /// Whether this is the empty-subtree stand-in.
    pub fn is_empty(&self) -> bool {
        self.node_hash == [0; HASH_SIZE] && self.sum == 0
    }

    /// Returns the hash of the node.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.node_hash
    }

    /// Returns the sum of the node.
    pub fn sum(&self) -> Sum {
        self.sum
    }
}

impl<const HASH_SIZE: usize> Display for ComputedNode<HASH_SIZE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Computed {{ sum: {}, hash: {} }}",
            self.sum(),
            hex::encode(self.hash().as_slice())
        )
    }
}

#[cfg(test)]
mod test {
    use super::ComputedNode;
    use hex_literal::hex;

    #[test]
    fn test_computed_node_new() {
        let computed_node = ComputedNode::new(
            hex!("77f128dd25fabe3451422a670b3de6867df9b9fefe9abe75cdfb96448c81c256"),
            3,
        );
        assert_eq!(
            computed_node.hash(),
            hex!("77f128dd25fabe3451422a670b3de6867df9b9fefe9abe75cdfb96448c81c256")
        );
        assert_eq!(computed_node.sum(), 3);
        assert!(!computed_node.is_empty());
    }

    #[test]
    fn test_computed_node_empty() {
        let empty = ComputedNode::<32>::empty();
        assert_eq!(empty.hash(), [0; 32]);
        assert_eq!(empty.sum(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_computed_node_display() {
        let computed_node = ComputedNode::<32>::new([0; 32], 1);
        assert_eq!(
            format!("{}", computed_node),
            "Computed { sum: 1, hash: 0000000000000000000000000000000000000000000000000000000000000000 }"
        );
    }
}
