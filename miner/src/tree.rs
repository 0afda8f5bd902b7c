use alloy::primitives::{Address, Bytes, B256};
use merkle_mine_tree::{genesis_merkle_tree::GenesisMerkleTree, utils::encode_batch_proofs};

use crate::error::ProofError;

/// The Merkle tree operations the claim flow relies on.
pub trait RecipientTree {
    fn leaf_count(&self) -> u64;
    fn root(&self) -> B256;
    fn contains(&self, recipient: &Address) -> bool;
    /// `None` when the recipient is not a leaf.
    fn proof(&self, recipient: &Address) -> Option<Vec<B256>>;
    fn verify(&self, recipient: &Address, proof: &[B256]) -> bool;
    /// Packed proofs for every recipient, in order. Fails on the first recipient
    /// that is not a leaf.
    fn batch_proofs(&self, recipients: &[Address]) -> Result<Bytes, ProofError>;
}

impl RecipientTree for GenesisMerkleTree {
    fn leaf_count(&self) -> u64 {
        self.num_leaves
    }

    fn root(&self) -> B256 {
        self.merkle_root
    }

    fn contains(&self, recipient: &Address) -> bool {
        GenesisMerkleTree::contains(self, recipient)
    }

    fn proof(&self, recipient: &Address) -> Option<Vec<B256>> {
        self.get_proof(recipient)
    }

    fn verify(&self, recipient: &Address, proof: &[B256]) -> bool {
        self.verify_proof(recipient, proof)
    }

    fn batch_proofs(&self, recipients: &[Address]) -> Result<Bytes, ProofError> {
        let proofs = recipients
            .iter()
            .map(|recipient| {
                self.get_proof(recipient)
                    .ok_or(ProofError::NotIncluded(*recipient))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(encode_batch_proofs(&proofs))
    }
}
