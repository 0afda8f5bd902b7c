use alloy::{
    primitives::{Address, U256},
    sol_types::SolCall,
};
use tracing::{error, info, warn};

use crate::{
    chain::{ClaimReceipt, ClaimTransaction, ClaimTransport},
    contracts::IMultiMerkleMine,
    error::MinerError,
    signer::ClaimSigner,
    tree::RecipientTree,
    Result,
};

pub const GAS_PER_RECIPIENT: u64 = 170_000;
/// Kept below the block gas limit so a full batch still fits in a block.
pub const GAS_LIMIT_CEILING: u64 = 7_900_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitterConfig {
    pub gas_per_recipient: u64,
    pub gas_limit_ceiling: u64,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            gas_per_recipient: GAS_PER_RECIPIENT,
            gas_limit_ceiling: GAS_LIMIT_CEILING,
        }
    }
}

/// Linear gas estimate for a batch, saturating at the configured ceiling.
pub fn gas_limit(recipient_count: usize, config: &SubmitterConfig) -> u64 {
    config
        .gas_per_recipient
        .saturating_mul(recipient_count as u64)
        .min(config.gas_limit_ceiling)
}

/// Builds, signs and sends one `multiGenerate` transaction per batch.
pub struct BatchSubmitter<'a, T, C, S> {
    tree: &'a T,
    transport: C,
    signer: S,
    merkle_mine: Address,
    multi_merkle_mine: Address,
    config: SubmitterConfig,
}

impl<'a, T, C, S> BatchSubmitter<'a, T, C, S>
where
    T: RecipientTree,
    C: ClaimTransport + Sync,
    S: ClaimSigner,
{
    pub fn new(
        tree: &'a T,
        transport: C,
        signer: S,
        merkle_mine: Address,
        multi_merkle_mine: Address,
        config: SubmitterConfig,
    ) -> Self {
        Self {
            tree,
            transport,
            signer,
            merkle_mine,
            multi_merkle_mine,
            config,
        }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Submits one transaction claiming for every recipient. If the node rejects it
    /// as an underpriced replacement, it is re-signed with the next nonce and sent
    /// once more. A reverted receipt is never retried.
    pub async fn submit_batch(
        &self,
        recipients: &[Address],
        gas_price: u128,
    ) -> Result<ClaimReceipt> {
        let mut tx = self.build_transaction(recipients, gas_price).await?;

        let receipt = match self.sign_and_send(&tx, recipients).await {
            Err(MinerError::SubmitRejected { source, .. }) if source.is_underpriced_replacement() => {
                warn!(
                    "Nonce {} already taken ({}), resubmitting transaction with nonce {}",
                    tx.nonce,
                    source,
                    tx.nonce + 1
                );
                tx.nonce += 1;
                self.sign_and_send(&tx, recipients).await?
            }
            result => result?,
        };

        info!(
            "Finished submitting batch of {} recipients in tx {}",
            recipients.len(),
            receipt.transaction_hash
        );
        Ok(receipt)
    }

    async fn build_transaction(
        &self,
        recipients: &[Address],
        gas_price: u128,
    ) -> Result<ClaimTransaction> {
        if recipients.is_empty() {
            return Err(MinerError::EmptyBatch);
        }

        let merkle_proofs = self.tree.batch_proofs(recipients)?;

        let data = IMultiMerkleMine::multiGenerateCall {
            merkleMineContract: self.merkle_mine,
            recipients: recipients.to_vec(),
            merkleProofs: merkle_proofs,
        }
        .abi_encode();

        let gas_limit = gas_limit(recipients.len(), &self.config);
        info!(
            "Gas limit {} for batch of {} recipients",
            gas_limit,
            recipients.len()
        );

        let nonce = self.transport.pending_nonce(self.signer.address()).await?;
        let chain_id = self.transport.chain_id().await?;

        Ok(ClaimTransaction {
            nonce,
            gas_price,
            gas_limit,
            to: self.multi_merkle_mine,
            value: U256::ZERO,
            data: data.into(),
            chain_id,
        })
    }

    async fn sign_and_send(
        &self,
        tx: &ClaimTransaction,
        recipients: &[Address],
    ) -> Result<ClaimReceipt> {
        let signed = self.signer.sign_transaction(tx)?;

        let tx_hash = self
            .transport
            .broadcast(&signed)
            .await
            .map_err(|source| MinerError::SubmitRejected {
                nonce: tx.nonce,
                recipients: recipients.to_vec(),
                source,
            })?;
        info!("Submitted tx {}", tx_hash);

        let receipt = self
            .transport
            .wait_for_receipt(tx_hash)
            .await
            .map_err(|source| MinerError::ReceiptUnavailable {
                tx_hash,
                recipients: recipients.to_vec(),
                source,
            })?;
        if !receipt.success {
            error!("Failed to generate allocation in tx {}", receipt.transaction_hash);
            return Err(MinerError::ExecutionFailed {
                tx_hash: receipt.transaction_hash,
                recipients: recipients.to_vec(),
            });
        }
        Ok(receipt)
    }
}
