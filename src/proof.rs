//! Merkle inclusion proofs and their compressed wire form.
//!
//! A proof is the list of sibling digest/sum pairs along a key's
//! authenticated path, ordered from the leaf up to the root. Reconstructing
//! the root from a claimed leaf and the siblings, then comparing it to a
//! trusted root digest, verifies the claim offline.
//!
//! Deeply diverging keys produce proofs that are mostly empty siblings, so a
//! proof can be compressed into a bitmap plus the non-empty nodes.

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use crate::{
    node::{ComputedNode, Hasher, Leaf},
    tree::bit_index,
    Sum, TreeError,
};

/// A merkle proof for a given key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof<const HASH_SIZE: usize> {
    nodes: Vec<ComputedNode<HASH_SIZE>>,
}

impl<const HASH_SIZE: usize> Proof<HASH_SIZE> {
    /// Creates a new proof from a list of siblings, leaf-ward first.
    pub fn new(nodes: Vec<ComputedNode<HASH_SIZE>>) -> Self {
        Self { nodes }
    }

    /// Returns the siblings in the proof, leaf-ward first.
    pub fn nodes(&self) -> &[ComputedNode<HASH_SIZE>] {
        &self.nodes
    }

    /// Root digest this proof commits the given leaf to.
    ///
    /// Sibling `i` (leaf-ward first) sits at bit depth `n - 1 - i`, so the
    /// walk consumes the first `n` key bits from the deepest upward. Returns
    /// `None` when the running sum overflows 64 bits.
    pub fn root<H: Hasher<HASH_SIZE> + Clone>(
        &self,
        leaf: &Leaf<HASH_SIZE, H>,
    ) -> Option<[u8; HASH_SIZE]> {
        let mut hash = leaf.hash();
        let mut sum = leaf.sum();
        for (i, sibling) in self.nodes.iter().enumerate() {
            let depth = self.nodes.len() - 1 - i;
            if bit_index(depth, leaf.key()) == 0 {
                sum = sum.checked_add(sibling.sum())?;
                hash = H::hash(
                    [
                        hash.as_slice(),
                        sibling.hash().as_slice(),
                        sum.to_le_bytes().as_slice(),
                    ]
                    .concat()
                    .as_slice(),
                );
            } else {
                sum = sibling.sum().checked_add(sum)?;
                hash = H::hash(
                    [
                        sibling.hash().as_slice(),
                        hash.as_slice(),
                        sum.to_le_bytes().as_slice(),
                    ]
                    .concat()
                    .as_slice(),
                );
            }
        }
        Some(hash)
    }

    /// Verifies that `(key, value, sum)` is committed to by `root_hash`.
    pub fn verify<H: Hasher<HASH_SIZE> + Clone>(
        &self,
        root_hash: [u8; HASH_SIZE],
        key: &[u8; HASH_SIZE],
        value: &[u8],
        sum: Sum,
    ) -> bool {
        let leaf = Leaf::<HASH_SIZE, H>::new(*key, value.to_vec(), sum);
        self.root(&leaf) == Some(root_hash)
    }

    /// Compresses the proof by eliding empty siblings into a bitmap.
    pub fn compress(&self) -> CompressedProof<HASH_SIZE> {
        let mut bits = BitVec::with_capacity(self.nodes.len());
        let mut nodes = Vec::new();
        for node in &self.nodes {
            if node.is_empty() {
                bits.push(true);
            } else {
                bits.push(false);
                nodes.push(node.clone());
            }
        }
        CompressedProof::new(nodes, bits)
    }
}

/// Verify a merkle proof for a given key.
///
/// # Arguments
///
/// * `root_hash` - The trusted root digest of the tree
/// * `key` - The key of the entry to verify the proof for
/// * `value` - The claimed value bytes
/// * `sum` - The claimed sum
/// * `proof` - The proof to verify
///
/// # Returns
///
/// Returns `true` iff the reconstructed root equals `root_hash`.
pub fn verify_merkle_proof<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    root_hash: [u8; HASH_SIZE],
    key: &[u8; HASH_SIZE],
    value: &[u8],
    sum: Sum,
    proof: &Proof<HASH_SIZE>,
) -> bool {
    proof.verify::<H>(root_hash, key, value, sum)
}

/// A compressed merkle proof for a given key.
/// Empty siblings are not stored; a set bit marks their position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedProof<const HASH_SIZE: usize> {
    nodes: Vec<ComputedNode<HASH_SIZE>>,
    bits: BitVec<u8, Lsb0>,
}

impl<const HASH_SIZE: usize> CompressedProof<HASH_SIZE> {
    /// Creates a new compressed proof from the non-empty siblings and the
    /// empty-position bitmap.
    pub fn new(nodes: Vec<ComputedNode<HASH_SIZE>>, bits: BitVec<u8, Lsb0>) -> Self {
        Self { nodes, bits }
    }

    /// Returns the non-empty siblings.
    pub fn nodes(&self) -> &[ComputedNode<HASH_SIZE>] {
        &self.nodes
    }

    /// Returns the empty-position bitmap.
    pub fn bits(&self) -> &BitVec<u8, Lsb0> {
        &self.bits
    }

    /// Decompresses the proof, restoring the elided empty siblings.
    pub fn decompress(&self) -> Result<Proof<HASH_SIZE>, TreeError> {
        if self.nodes.len() != self.bits.count_zeros() {
            return Err(TreeError::InvalidProofEncoding);
        }
        let mut nodes = Vec::with_capacity(self.bits.len());
        let mut next_node = 0;
        for bit in self.bits.iter() {
            if *bit {
                nodes.push(ComputedNode::empty());
            } else {
                nodes.push(self.nodes[next_node].clone());
                next_node += 1;
            }
        }
        Ok(Proof::new(nodes))
    }

    /// Encodes the proof into a byte vector: node count (u16 LE), bit count
    /// (u16 LE), then `digest ‖ sum` per node and the raw bitmap bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::new();
        encoded.extend_from_slice(&(self.nodes.len() as u16).to_le_bytes());
        encoded.extend_from_slice(&(self.bits.len() as u16).to_le_bytes());
        for node in self.nodes.iter() {
            encoded.extend_from_slice(&node.hash());
            encoded.extend_from_slice(&node.sum().to_le_bytes());
        }
        encoded.extend_from_slice(self.bits.as_raw_slice());
        encoded
    }

    /// Decodes a proof from a byte vector. Malformed input is reported, not
    /// panicked on.
    pub fn decode(data: &[u8]) -> Result<Self, TreeError> {
        let nb_nodes = read_u16(data, 0)? as usize;
        let nb_bits = read_u16(data, 2)? as usize;
        let mut nodes = Vec::with_capacity(nb_nodes);
        let mut index = 4;
        for _ in 0..nb_nodes {
            let hash_bytes = data
                .get(index..index + HASH_SIZE)
                .ok_or(TreeError::InvalidProofEncoding)?;
            let mut hash = [0u8; HASH_SIZE];
            hash.copy_from_slice(hash_bytes);
            index += HASH_SIZE;
            let sum_bytes: [u8; 8] = data
                .get(index..index + 8)
                .and_then(|bytes| bytes.try_into().ok())
                .ok_or(TreeError::InvalidProofEncoding)?;
            index += 8;
            nodes.push(ComputedNode::new(hash, u64::from_le_bytes(sum_bytes)));
        }
        let raw = data.get(index..).ok_or(TreeError::InvalidProofEncoding)?;
        let mut bits = BitVec::<u8, Lsb0>::from_slice(raw);
        if nb_bits > bits.len() {
            return Err(TreeError::InvalidProofEncoding);
        }
        bits.truncate(nb_bits);
        Ok(Self::new(nodes, bits))
    }
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, TreeError> {
    let bytes: [u8; 2] = data
        .get(at..at + 2)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(TreeError::InvalidProofEncoding)?;
    Ok(u16::from_le_bytes(bytes))
}
