//! The trie instantiated with a 64-byte digest, exercising the [`Hasher`]
//! seam end to end.

use hex_literal::hex;
use sha2::{Digest, Sha512};

use crate::{Hasher, MerkleSumTrie};

impl Hasher<64> for Sha512 {
    fn hash(data: &[u8]) -> [u8; 64] {
        let mut hasher = Sha512::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

type WideTrie = MerkleSumTrie<64, Sha512>;

#[test]
fn test_empty_tree() {
    let tree = WideTrie::new();
    assert_eq!(tree.root_hash(), [0; 64]);
    assert_eq!(tree.total_sum(), 0);
    assert_eq!(WideTrie::max_depth(), 512);
}

#[test]
fn test_leaves_insertion() {
    let tree = WideTrie::new().insert(&[1; 64], vec![1; 64], 1).unwrap();
    assert_eq!(
        tree.root_hash(),
        hex!("fa6bce5a4a6ed88c69c3f80ada9922cf0ce3eef5f4b480da89e240e7ea86ff4e7427c4562116a3f8502cd21983d63050960b8e0b5f5f54fa1d48e19205b37668")
    );

    let tree = tree.insert(&[2; 64], vec![2; 64], 2).unwrap();
    assert_eq!(
        tree.root_hash(),
        hex!("8b4e4ca22cd3417a7b8150d4a8ef2333e90bb48838a2283be6434246f39949a888e0b1eb71c07d2d61eccc9ef3c455b27ee770e0b16d105c29ab2ba876f5e9e0")
    );

    let tree = tree.insert(&[3; 64], vec![3; 64], 3).unwrap();
    assert_eq!(
        tree.root_hash(),
        hex!("67900fa23cd7edade748b765eb0a89e34e5e09bd1e667b517d049a53043315a3ff6c408c7eedc2f4611bd2f1373c51526901a032c81fdad980e53c7a1a862e4a")
    );
    assert_eq!(tree.total_sum(), 6);
}

#[test]
fn test_history_independant() {
    let mut tree = WideTrie::new();
    for index in [3u8, 2, 1] {
        tree = tree
            .insert(&[index; 64], vec![index; 64], index as u64)
            .unwrap();
    }
    assert_eq!(
        tree.root_hash(),
        hex!("67900fa23cd7edade748b765eb0a89e34e5e09bd1e667b517d049a53043315a3ff6c408c7eedc2f4611bd2f1373c51526901a032c81fdad980e53c7a1a862e4a")
    );
}

#[test]
fn test_merkle_proof() {
    let mut tree = WideTrie::new();
    for index in [1u8, 2, 3] {
        tree = tree
            .insert(&[index; 64], vec![index; 64], index as u64)
            .unwrap();
    }
    let proof = tree.merkle_proof(&[2; 64]);
    assert!(proof.verify::<Sha512>(tree.root_hash(), &[2; 64], &[2; 64], 2));
    assert!(!proof.verify::<Sha512>(tree.root_hash(), &[2; 64], &[2; 64], 3));

    let tree = tree.delete(&[2; 64]).unwrap();
    assert_eq!(tree.get(&[2; 64]), None);
    assert_eq!(tree.total_sum(), 4);
}
