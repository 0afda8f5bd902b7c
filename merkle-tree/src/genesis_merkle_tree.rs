use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
    result,
};

use alloy_primitives::{Address, B256};
use indexmap::IndexSet;
use merkle_mine_verify::verify;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    csv_entry::read_addresses,
    error::{MerkleTreeError, MerkleTreeError::MerkleValidationError},
    merkle_tree::MerkleTree,
    utils::recipient_leaf,
};

pub type Result<T> = result::Result<T, MerkleTreeError>;

/// Merkle tree over the genesis recipients of a MerkleMine distribution.
/// Contains all the information necessary to verify claims against the
/// root stored on-chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisMerkleTree {
    /// The merkle root, which is stored on-chain as `genesisRoot`
    pub merkle_root: B256,
    /// Stored on-chain as `totalGenesisRecipients`
    pub num_leaves: u64,
    pub recipients: Vec<Address>,
    #[serde(skip)]
    tree: MerkleTree,
    #[serde(skip)]
    leaf_index: HashMap<B256, usize>,
}

impl GenesisMerkleTree {
    pub fn new(recipients: Vec<Address>) -> Result<Self> {
        // Combine duplicate recipients, while retaining original order
        let mut unique: IndexSet<Address> = IndexSet::with_capacity(recipients.len());
        for recipient in recipients {
            if !unique.insert(recipient) {
                warn!("duplicate recipient {} found, combining", recipient);
            }
        }
        if unique.is_empty() {
            return Err(MerkleTreeError::EmptyTree);
        }
        let recipients: Vec<Address> = unique.into_iter().collect();

        let mut leaves: Vec<B256> = recipients.iter().map(recipient_leaf).collect();
        leaves.sort();

        let raw_leaves: Vec<[u8; 32]> = leaves.iter().map(|leaf| leaf.0).collect();
        let tree = MerkleTree::new(&raw_leaves);
        let merkle_root = tree
            .get_root()
            .map(B256::from)
            .ok_or(MerkleTreeError::EmptyTree)?;

        let leaf_index = leaves
            .iter()
            .enumerate()
            .map(|(i, leaf)| (*leaf, i))
            .collect();

        let tree = GenesisMerkleTree {
            merkle_root,
            num_leaves: recipients.len() as u64,
            recipients,
            tree,
            leaf_index,
        };

        info!(
            "created merkle tree with {} leaves and root {}",
            tree.num_leaves, tree.merkle_root
        );
        Ok(tree)
    }

    /// Build a merkle tree from a csv of recipient addresses
    pub fn new_from_csv(path: &PathBuf) -> Result<Self> {
        Self::new(read_addresses(path)?)
    }

    /// Load a serialized merkle tree from file path. The tree is rebuilt from
    /// its recipients and must reproduce the stored root and leaf count.
    pub fn new_from_file(path: &PathBuf) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let stored: GenesisMerkleTree = serde_json::from_reader(reader)?;

        let tree = Self::new(stored.recipients)?;
        if tree.num_leaves != stored.num_leaves {
            return Err(MerkleValidationError(format!(
                "Tree has {} leaves but file records {}",
                tree.num_leaves, stored.num_leaves
            )));
        }
        if tree.merkle_root != stored.merkle_root {
            return Err(MerkleValidationError(format!(
                "Rebuilt root {} does not match stored root {}",
                tree.merkle_root, stored.merkle_root
            )));
        }
        Ok(tree)
    }

    /// Write a merkle tree to a filepath
    pub fn write_to_file(&self, path: &PathBuf) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    pub fn contains(&self, recipient: &Address) -> bool {
        self.leaf_index.contains_key(&recipient_leaf(recipient))
    }

    pub fn get_proof(&self, recipient: &Address) -> Option<Vec<B256>> {
        let index = *self.leaf_index.get(&recipient_leaf(recipient))?;
        let proof = self.tree.find_proof(index)?;
        Some(proof.into_iter().map(B256::from).collect())
    }

    pub fn verify_proof(&self, recipient: &Address, proof: &[B256]) -> bool {
        let proof: Vec<[u8; 32]> = proof.iter().map(|hash| hash.0).collect();
        verify(&proof, self.merkle_root.0, recipient_leaf(recipient).0)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn test_recipients() -> Vec<Address> {
        vec![
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
        ]
    }

    #[test]
    fn test_verify_new_merkle_tree() {
        let tree = GenesisMerkleTree::new(test_recipients()).unwrap();
        assert_eq!(tree.num_leaves, 3);
        for recipient in test_recipients() {
            let proof = tree.get_proof(&recipient).unwrap();
            assert!(tree.verify_proof(&recipient, &proof), "verify failed");
        }
    }

    #[test]
    fn test_root_independent_of_input_order() {
        let mut reversed = test_recipients();
        reversed.reverse();
        let a = GenesisMerkleTree::new(test_recipients()).unwrap();
        let b = GenesisMerkleTree::new(reversed).unwrap();
        assert_eq!(a.merkle_root, b.merkle_root);
    }

    #[test]
    fn test_new_merkle_tree_duplicate_recipients() {
        let mut recipients = test_recipients();
        recipients.push(recipients[0]);
        let tree = GenesisMerkleTree::new(recipients).unwrap();
        assert_eq!(tree.num_leaves, 3);
        assert_eq!(tree.recipients, test_recipients());
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert!(matches!(
            GenesisMerkleTree::new(vec![]),
            Err(MerkleTreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_unknown_recipient_has_no_proof() {
        let tree = GenesisMerkleTree::new(test_recipients()).unwrap();
        let outsider = address!("90F79bf6EB2c4f870365E785982E1f101E93b906");
        assert!(!tree.contains(&outsider));
        assert_eq!(tree.get_proof(&outsider), None);
    }

    #[test]
    fn test_corrupted_proof_fails() {
        let tree = GenesisMerkleTree::new(test_recipients()).unwrap();
        let recipient = test_recipients()[1];
        let mut proof = tree.get_proof(&recipient).unwrap();
        proof[0] = B256::repeat_byte(0x11);
        assert!(!tree.verify_proof(&recipient, &proof));
    }

    #[test]
    fn test_write_merkle_tree_to_file() {
        let tree = GenesisMerkleTree::new(test_recipients()).unwrap();
        let path = std::env::temp_dir().join("merkle_mine_tree_test.json");

        tree.write_to_file(&path).unwrap();
        let read = GenesisMerkleTree::new_from_file(&path).unwrap();

        assert_eq!(read.merkle_root, tree.merkle_root);
        assert_eq!(read.num_leaves, 3);
        assert!(read.get_proof(&test_recipients()[0]).is_some());
    }

    #[test]
    fn test_tampered_file_is_rejected() {
        let mut tree = GenesisMerkleTree::new(test_recipients()).unwrap();
        tree.merkle_root = B256::ZERO;
        let path = std::env::temp_dir().join("merkle_mine_tree_tampered.json");

        tree.write_to_file(&path).unwrap();
        assert!(matches!(
            GenesisMerkleTree::new_from_file(&path),
            Err(MerkleValidationError(_))
        ));
    }

    #[test]
    fn test_new_from_csv() {
        let tree =
            GenesisMerkleTree::new_from_csv(&PathBuf::from("./test_fixtures/test_csv.csv")).unwrap();
        assert_eq!(tree.recipients, test_recipients());
    }
}
