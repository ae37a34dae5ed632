use std::fmt::Display;
use std::sync::Arc;

use super::{Hasher, Node, Sum};

/// An interior node with two child slots. An absent child stands for an
/// empty subtree and contributes an all-zero digest and a zero sum to the
/// branch preimage.
///
/// Branches hold the sum of all their descendants. A branch never has two
/// absent children, and a branch whose only child is a lone leaf does not
/// exist in a canonical tree (the leaf takes its place).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    left: Option<Arc<Node<HASH_SIZE, H>>>,
    right: Option<Arc<Node<HASH_SIZE, H>>>,
    sum: Sum,
    node_hash: [u8; HASH_SIZE],
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Branch<HASH_SIZE, H> {
    /// Creates a new [`Branch`] from two live children. This function
    /// performs a hash and an addition.
    pub fn new(left: Node<HASH_SIZE, H>, right: Node<HASH_SIZE, H>) -> Self {
        Self::from_children(Some(Arc::new(left)), Some(Arc::new(right)))
    }

    /// Creates a new [`Branch`] from two child slots, either of which may be
    /// absent.
    pub fn from_children(
        left: Option<Arc<Node<HASH_SIZE, H>>>,
        right: Option<Arc<Node<HASH_SIZE, H>>>,
    ) -> Self {
        let sum = left.as_deref().map_or(0, Node::sum) + right.as_deref().map_or(0, Node::sum);
        let left_hash = left.as_deref().map_or([0; HASH_SIZE], Node::hash);
        let right_hash = right.as_deref().map_or([0; HASH_SIZE], Node::hash);
        let node_hash = H::hash(
            [
                left_hash.as_slice(),
                right_hash.as_slice(),
                sum.to_le_bytes().as_slice(),
            ]
            .concat()
            .as_slice(),
        );

        Self {
            left,
            right,
            sum,
            node_hash,
        }
    }

    /// Returns the hash of the node. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        self.node_hash
    }

    /// Returns the sum of the node.
    pub fn sum(&self) -> Sum {
        self.sum
    }

    /// Returns the left and right children of this branch.
    pub fn children(&self) -> (Option<&Node<HASH_SIZE, H>>, Option<&Node<HASH_SIZE, H>>) {
        (self.left(), self.right())
    }

    /// Returns the left child of this branch, if present.
    pub fn left(&self) -> Option<&Node<HASH_SIZE, H>> {
        self.left.as_deref()
    }

    /// Returns the right child of this branch, if present.
    pub fn right(&self) -> Option<&Node<HASH_SIZE, H>> {
        self.right.as_deref()
    }

    /// Child slots as shared references, for rebuilding paths without
    /// deep-copying the untouched side.
    pub(crate) fn child_links(
        &self,
    ) -> (
        Option<&Arc<Node<HASH_SIZE, H>>>,
        Option<&Arc<Node<HASH_SIZE, H>>>,
    ) {
        (self.left.as_ref(), self.right.as_ref())
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Branch<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Branch {{ sum: {}, hash: {} }}",
            self.sum(),
            hex::encode(self.hash().as_slice())
        )
    }
}
