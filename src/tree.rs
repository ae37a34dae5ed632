//! Core merkle sum trie implementation

use std::sync::Arc;

use crate::{
    node::{Branch, ComputedNode, Hasher, Leaf, Node},
    proof::Proof,
    Sum, TreeError,
};

/// Merkle sum sparse merkle trie.
///
/// A persistent authenticated map from fixed-width keys to `(value, sum)`
/// pairs. The root digest commits to the entry set and to the total of all
/// leaf sums at once. Mutating operations return a new trie that shares
/// every untouched subtree with the input, so old roots stay valid and
/// readable for as long as someone holds them.
///
/// Keys are dispatched bit by bit, most significant bit of byte 0 first. A
/// subtree holding a single entry is represented by that leaf alone, hoisted
/// to the highest slot where it is the only occupant; once two entries share
/// a prefix, branches are materialised at every bit level down to the point
/// where their keys diverge.
///
/// * `HASH_SIZE` - size of the hash digest in bytes.
/// * `H` - Hasher that will be used to hash nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleSumTrie<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> {
    root: Option<Arc<Node<HASH_SIZE, H>>>,
}

/// Get the bit at the given index in the key.
///
/// Bit ordering is MSB-first within each byte: index 0 is the most
/// significant bit of byte 0 and is dispatched at the root.
pub fn bit_index(index: usize, key: &[u8]) -> u8 {
    (key[index / 8] >> (7 - (index % 8))) & 1
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> Default
    for MerkleSumTrie<HASH_SIZE, H>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone> MerkleSumTrie<HASH_SIZE, H> {
    /// Creates a new empty trie.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Max depth of the tree, equal to the key width in bits.
    pub const fn max_depth() -> usize {
        HASH_SIZE * 8
    }

    /// Root node of the tree, absent when the tree is empty.
    pub fn root(&self) -> Option<&Node<HASH_SIZE, H>> {
        self.root.as_deref()
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Digest the tree commits to: all zero bytes for the empty tree.
    pub fn root_hash(&self) -> [u8; HASH_SIZE] {
        self.root.as_deref().map_or([0; HASH_SIZE], Node::hash)
    }

    /// Sum of all entries in the tree.
    pub fn total_sum(&self) -> Sum {
        self.root.as_deref().map_or(0, Node::sum)
    }

    /// Looks up the `(value, sum)` pair stored under `key`.
    pub fn get(&self, key: &[u8; HASH_SIZE]) -> Option<(&[u8], Sum)> {
        let mut node = self.root.as_deref()?;
        let mut depth = 0;
        loop {
            match node {
                Node::Leaf(leaf) => {
                    return (leaf.key() == key).then(|| (leaf.value(), leaf.sum()))
                }
                Node::Branch(branch) => {
                    node = if bit_index(depth, key) == 0 {
                        branch.left()?
                    } else {
                        branch.right()?
                    };
                    depth += 1;
                }
            }
        }
    }

    /// Inserts `(value, sum)` under `key`, replacing any existing entry for
    /// that key. Returns the updated trie; `self` is untouched.
    pub fn insert(
        &self,
        key: &[u8; HASH_SIZE],
        value: Vec<u8>,
        sum: Sum,
    ) -> Result<Self, TreeError> {
        let replaced = self.get(key).map_or(0, |(_, sum)| sum);
        self.total_sum()
            .checked_sub(replaced)
            .and_then(|rest| rest.checked_add(sum))
            .ok_or(TreeError::SumOverflow)?;
        let root = insert_at(self.root.as_ref(), 0, Leaf::new(*key, value, sum))?;
        Ok(Self { root: Some(root) })
    }

    /// Removes the entry under `key`. Returns the updated trie; `self` is
    /// untouched. Reports [`TreeError::KeyNotFound`] when the key is absent.
    pub fn delete(&self, key: &[u8; HASH_SIZE]) -> Result<Self, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::KeyNotFound)?;
        Ok(Self {
            root: delete_at(root, 0, key)?,
        })
    }

    /// Collects the siblings along the authenticated path of `key`, ordered
    /// from the leaf up to the root. Walks to the leaf when the key is
    /// present, or to the empty slot where it would live when it is not.
    pub fn merkle_proof(&self, key: &[u8; HASH_SIZE]) -> Proof<HASH_SIZE> {
        let mut siblings = Vec::new();
        let mut node = self.root.as_deref();
        let mut depth = 0;
        while let Some(Node::Branch(branch)) = node {
            let (next, sibling) = if bit_index(depth, key) == 0 {
                (branch.left(), branch.right())
            } else {
                (branch.right(), branch.left())
            };
            siblings.push(match sibling {
                Some(node) => ComputedNode::new(node.hash(), node.sum()),
                None => ComputedNode::empty(),
            });
            node = next;
            depth += 1;
        }
        siblings.reverse();
        Proof::new(siblings)
    }
}

/// First bit index at or after `from` where the two keys differ.
fn divergence_depth<const HASH_SIZE: usize>(
    a: &[u8; HASH_SIZE],
    b: &[u8; HASH_SIZE],
    from: usize,
) -> Option<usize> {
    (from..HASH_SIZE * 8).find(|&index| bit_index(index, a) != bit_index(index, b))
}

fn insert_at<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    node: Option<&Arc<Node<HASH_SIZE, H>>>,
    depth: usize,
    leaf: Leaf<HASH_SIZE, H>,
) -> Result<Arc<Node<HASH_SIZE, H>>, TreeError> {
    match node.map(|node| node.as_ref()) {
        None => Ok(Arc::new(Node::Leaf(leaf))),
        Some(Node::Leaf(existing)) => {
            if existing.key() == leaf.key() {
                return Ok(Arc::new(Node::Leaf(leaf)));
            }
            let key = *leaf.key();
            let split = divergence_depth(&key, existing.key(), depth)
                .ok_or(TreeError::KeyCollision)?;
            let branch = if bit_index(split, &key) == 0 {
                Branch::new(Node::Leaf(leaf), Node::Leaf(existing.clone()))
            } else {
                Branch::new(Node::Leaf(existing.clone()), Node::Leaf(leaf))
            };
            // Wrap the divergence branch in the chain of one-sided branches
            // leading back up to the current depth.
            let mut node = Arc::new(Node::Branch(branch));
            for d in (depth..split).rev() {
                let link = if bit_index(d, &key) == 0 {
                    Branch::from_children(Some(node), None)
                } else {
                    Branch::from_children(None, Some(node))
                };
                node = Arc::new(Node::Branch(link));
            }
            Ok(node)
        }
        Some(Node::Branch(branch)) => {
            let key = *leaf.key();
            let (left, right) = branch.child_links();
            let rebuilt = if bit_index(depth, &key) == 0 {
                let left = insert_at(left, depth + 1, leaf)?;
                Branch::from_children(Some(left), right.cloned())
            } else {
                let right = insert_at(right, depth + 1, leaf)?;
                Branch::from_children(left.cloned(), Some(right))
            };
            Ok(Arc::new(Node::Branch(rebuilt)))
        }
    }
}

fn delete_at<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    node: &Arc<Node<HASH_SIZE, H>>,
    depth: usize,
    key: &[u8; HASH_SIZE],
) -> Result<Option<Arc<Node<HASH_SIZE, H>>>, TreeError> {
    match node.as_ref() {
        Node::Leaf(leaf) => {
            if leaf.key() == key {
                Ok(None)
            } else {
                Err(TreeError::KeyNotFound)
            }
        }
        Node::Branch(branch) => {
            let (left, right) = branch.child_links();
            let (left, right) = if bit_index(depth, key) == 0 {
                let child = left.ok_or(TreeError::KeyNotFound)?;
                (delete_at(child, depth + 1, key)?, right.cloned())
            } else {
                let child = right.ok_or(TreeError::KeyNotFound)?;
                (left.cloned(), delete_at(child, depth + 1, key)?)
            };
            Ok(collapse(left, right))
        }
    }
}

/// Canonicalises a rebuilt branch: a lone leaf child takes the branch's
/// place, a lone branch child keeps its one-sided link (the subtree below
/// still holds several entries), and two absent children dissolve entirely.
fn collapse<const HASH_SIZE: usize, H: Hasher<HASH_SIZE> + Clone>(
    left: Option<Arc<Node<HASH_SIZE, H>>>,
    right: Option<Arc<Node<HASH_SIZE, H>>>,
) -> Option<Arc<Node<HASH_SIZE, H>>> {
    match (left, right) {
        (None, None) => None,
        (Some(node), None) | (None, Some(node))
            if matches!(node.as_ref(), Node::Leaf(_)) =>
        {
            Some(node)
        }
        (left, right) => Some(Arc::new(Node::Branch(Branch::from_children(left, right)))),
    }
}

#[cfg(test)]
mod test {
    use super::{bit_index, MerkleSumTrie};
    use sha2::Sha256;

    #[test]
    fn test_bit_index_msb_first() {
        let mut key = [0u8; 32];
        key[0] = 0b1000_0000;
        assert_eq!(bit_index(0, &key), 1);
        assert_eq!(bit_index(1, &key), 0);
        let mut key = [0u8; 32];
        key[31] = 0b0000_0001;
        assert_eq!(bit_index(255, &key), 1);
        assert_eq!(bit_index(254, &key), 0);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(MerkleSumTrie::<32, Sha256>::max_depth(), 256);
    }
}
