use alloy::primitives::{Address, B256, U256};
use tracing::{info, warn};

use crate::{
    chain::{ClaimStatus, DistributorReader},
    error::{ConsistencyError, ProofError},
    tree::RecipientTree,
    Result,
};

/// Offline proof check, usable without a chain connection.
pub fn validate_proof<T: RecipientTree>(
    tree: &T,
    recipient: &Address,
) -> std::result::Result<(), ProofError> {
    let proof = tree
        .proof(recipient)
        .ok_or(ProofError::NotIncluded(*recipient))?;
    validate_proof_with(tree, recipient, &proof)
}

pub fn validate_proof_with<T: RecipientTree>(
    tree: &T,
    recipient: &Address,
    proof: &[B256],
) -> std::result::Result<(), ProofError> {
    if !tree.contains(recipient) {
        return Err(ProofError::NotIncluded(*recipient));
    }
    if !tree.verify(recipient, proof) {
        return Err(ProofError::ProofInvalid(*recipient));
    }
    Ok(())
}

/// Reconciles a local genesis tree with a MerkleMine contract and checks
/// recipient proofs before any gas is spent on them.
pub struct ProofValidator<'a, T, R> {
    tree: &'a T,
    distributor: R,
}

impl<'a, T: RecipientTree, R: DistributorReader + Sync> ProofValidator<'a, T, R> {
    pub fn new(tree: &'a T, distributor: R) -> Self {
        Self { tree, distributor }
    }

    pub fn distributor(&self) -> &R {
        &self.distributor
    }

    /// One-time check that the contract was deployed with this tree and can
    /// honor at least one allocation. Run it before processing any claims.
    pub async fn check_consistency(&self) -> Result<()> {
        let local_count = self.tree.leaf_count();
        let remote_count = self.distributor.total_genesis_recipients().await?;
        if U256::from(local_count) != remote_count {
            return Err(ConsistencyError::LeafCountMismatch {
                local: local_count,
                remote: remote_count,
            }
            .into());
        }

        let local_root = self.tree.root();
        let remote_root = self.distributor.genesis_root().await?;
        if local_root != remote_root {
            return Err(ConsistencyError::RootMismatch {
                local: local_root,
                remote: remote_root,
            }
            .into());
        }
        info!(
            "Validated locally generated Merkle root {} with Merkle root stored in MerkleMine contract",
            local_root
        );

        if !self.distributor.started().await? {
            return Err(ConsistencyError::NotStarted.into());
        }

        let tokens_per_allocation = self.distributor.tokens_per_allocation().await?;
        let balance = self.distributor.token_balance().await?;
        if balance < tokens_per_allocation {
            return Err(ConsistencyError::InsufficientBalance {
                tokens_per_allocation,
                balance,
            }
            .into());
        }

        info!(
            "MerkleMine contract {} is started with balance {} (tokens per allocation {})",
            self.distributor.address(),
            balance,
            tokens_per_allocation
        );
        Ok(())
    }

    /// Checks the tree's own proof for `recipient`. Does not touch the chain.
    pub fn validate_proof(&self, recipient: &Address) -> std::result::Result<(), ProofError> {
        validate_proof(self.tree, recipient)
    }

    /// Checks a caller-supplied proof for `recipient` against the local root.
    pub fn validate_proof_with(
        &self,
        recipient: &Address,
        proof: &[B256],
    ) -> std::result::Result<(), ProofError> {
        validate_proof_with(self.tree, recipient, proof)
    }

    /// Read failures are logged and reported as [`ClaimStatus::Unknown`].
    pub async fn has_claimed(&self, recipient: &Address) -> ClaimStatus {
        match self.distributor.generated(*recipient).await {
            Ok(generated) => ClaimStatus::from(generated),
            Err(e) => {
                warn!("Failed to check generation for address {}: {}", recipient, e);
                ClaimStatus::Unknown
            }
        }
    }
}
