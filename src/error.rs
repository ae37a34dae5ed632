//! Error types for the merkle sum trie.

use thiserror::Error;

/// Error type for tree operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Key is not present in the tree
    #[error("key not found")]
    KeyNotFound,
    /// Two distinct keys traverse the same full-width bit path
    #[error("key collision")]
    KeyCollision,
    /// Total sum of the tree does not fit in 64 bits
    #[error("sum overflow")]
    SumOverflow,
    /// Serialized proof bytes do not describe a valid proof
    #[error("invalid proof encoding")]
    InvalidProofEncoding,
}
