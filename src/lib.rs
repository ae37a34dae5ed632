//! Merkle sum sparse merkle trie implementation
//!
//! This crate provides an authenticated key/value map whose root digest
//! commits simultaneously to the full set of entries and to the arithmetic
//! sum of their 64-bit weights.
//!
//! The trie is a persistent value: every mutating operation returns a new
//! handle sharing all unchanged subtrees with its input, so arbitrarily many
//! readers can hold old roots while a writer publishes new ones.
//!
//! The tree supports:
//! - Compact sparse storage (only paths leading to live leaves are materialised)
//! - Sum aggregation at each level
//! - Inclusion proofs verifiable offline against a root digest
//! - Flexible hash functions through the [`Hasher`] trait

mod error;
mod node;
mod proof;
mod tree;

pub use error::TreeError;
pub use node::{Branch, ComputedNode, Hasher, Leaf, Node, Sum};
pub use proof::{verify_merkle_proof, CompressedProof, Proof};
pub use tree::{bit_index, MerkleSumTrie};

#[cfg(test)]
mod tests;
