use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;

use crate::error::{ChainError, SubmitError};

/// Whether the MerkleMine contract has recorded a recipient's allocation as generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Claimed,
    NotClaimed,
    /// The chain could not be queried; not a confirmed non-claim.
    Unknown,
}

impl From<bool> for ClaimStatus {
    fn from(generated: bool) -> Self {
        if generated {
            ClaimStatus::Claimed
        } else {
            ClaimStatus::NotClaimed
        }
    }
}

/// Unsigned transaction envelope carrying a `multiGenerate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub transaction_hash: TxHash,
    /// `false` when execution reverted
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Read-only view of a MerkleMine contract and its token.
#[async_trait]
pub trait DistributorReader {
    /// Address of the MerkleMine contract itself.
    fn address(&self) -> Address;
    async fn total_genesis_recipients(&self) -> Result<U256, ChainError>;
    async fn genesis_root(&self) -> Result<B256, ChainError>;
    async fn started(&self) -> Result<bool, ChainError>;
    async fn tokens_per_allocation(&self) -> Result<U256, ChainError>;
    async fn generated(&self, recipient: Address) -> Result<bool, ChainError>;
    /// Token balance held by the MerkleMine contract.
    async fn token_balance(&self) -> Result<U256, ChainError>;
}

/// Transaction plumbing the batch submitter needs from a node.
#[async_trait]
pub trait ClaimTransport {
    /// Transaction count of `address`, including pending transactions.
    async fn pending_nonce(&self, address: Address) -> Result<u64, ChainError>;
    async fn chain_id(&self) -> Result<u64, ChainError>;
    /// Returns once the node has accepted the transaction into its pool.
    async fn broadcast(&self, raw: &Bytes) -> Result<TxHash, SubmitError>;
    /// Blocks until the transaction is included.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ClaimReceipt, ChainError>;
}
