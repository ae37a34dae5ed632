mod branch;
mod computed;
mod leaf;

use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::fmt::Display;

pub use branch::Branch;
pub use computed::ComputedNode;
pub use leaf::Leaf;

impl Hasher<32> for Sha256 {
    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

pub type Sum = u64;

/// Simple hash trait required to hash the nodes in the tree
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
pub trait Hasher<const HASH_SIZE: usize> {
    fn hash(data: &[u8]) -> [u8; HASH_SIZE];
}

/// A materialised node of the trie.
///
/// An empty subtree is never allocated: it is the absence of a child and
/// contributes an all-zero digest and a zero sum wherever it appears in a
/// preimage.
///
/// # Type Parameters
/// * `HASH_SIZE` - The size of the hash digest in bytes
/// * `H` - The hasher implementation used for this node
#[derive(Clone, PartialEq, Eq)]
pub enum Node<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    /// A leaf node containing a key, a value and a sum
    Leaf(Leaf<HASH_SIZE, H>),
    /// An interior node with two child slots
    Branch(Branch<HASH_SIZE, H>),
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Debug for Node<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(leaf) => write!(
                f,
                "Leaf {{ key: {:?}, sum: {}, hash: {:?}, value: {:?} }}",
                leaf.key(),
                leaf.sum(),
                leaf.hash(),
                leaf.value()
            ),
            Self::Branch(branch) => write!(
                f,
                "Branch {{ sum: {}, hash: {:?} }}",
                branch.sum(),
                branch.hash()
            ),
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Display for Node<HASH_SIZE, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(leaf) => write!(f, "{leaf}"),
            Self::Branch(branch) => write!(f, "{branch}"),
        }
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Node<HASH_SIZE, H> {
    /// Creates a [`Node::Branch`] from 2 [`Node`]
    pub fn new_branch(left: Node<HASH_SIZE, H>, right: Node<HASH_SIZE, H>) -> Self {
        Self::Branch(Branch::<HASH_SIZE, H>::new(left, right))
    }

    /// Creates a [`Node::Leaf`] from a `key`, a `value` and a `sum`
    pub fn new_leaf(key: [u8; HASH_SIZE], value: Vec<u8>, sum: Sum) -> Self {
        Self::Leaf(Leaf::<HASH_SIZE, H>::new(key, value, sum))
    }

    /// Returns the hash of the node. NO HASHING IS DONE HERE.
    pub fn hash(&self) -> [u8; HASH_SIZE] {
        match self {
            Self::Leaf(leaf) => leaf.hash(),
            Self::Branch(branch) => branch.hash(),
        }
    }

    /// Returns the sum of a [`Node`]. NO OPERATION IS DONE HERE.
    pub fn sum(&self) -> Sum {
        match self {
            Self::Leaf(leaf) => leaf.sum(),
            Self::Branch(branch) => branch.sum(),
        }
    }
}
