use alloy::primitives::{Address, TxHash, B256, U256};
use thiserror::Error;

/// Local tree and remote MerkleMine state disagree, or the contract cannot pay out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Number of candidate accounts {local} != totalGenesisRecipients {remote}")]
    LeafCountMismatch { local: u64, remote: U256 },

    #[error("Locally generated Merkle root {local} does not match Merkle root stored in MerkleMine contract {remote}")]
    RootMismatch { local: B256, remote: B256 },

    #[error("Generation period has not started for MerkleMine contract")]
    NotStarted,

    #[error("Tokens per allocation is {tokens_per_allocation} but MerkleMine contract only has balance of {balance}")]
    InsufficientBalance {
        tokens_per_allocation: U256,
        balance: U256,
    },
}

/// A single recipient is not eligible to be claimed for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("The recipient address {0} was not included in the genesis state")]
    NotIncluded(Address),

    #[error("Local verification of Merkle proof failed for {0}")]
    ProofInvalid(Address),
}

impl ProofError {
    pub fn recipient(&self) -> Address {
        match self {
            ProofError::NotIncluded(r) | ProofError::ProofInvalid(r) => *r,
        }
    }
}

/// A read or receipt call to the chain failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Rpc Error: {0}")]
    Rpc(String),

    #[error("Contract call {call} failed: {message}")]
    Call { call: &'static str, message: String },
}

const UNDERPRICED_REPLACEMENT: &str = "replacement transaction underpriced";

/// The network refused a signed transaction before accepting it into its pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Another transaction already occupies the nonce at an equal or higher price.
    #[error("{0}")]
    UnderpricedReplacement(String),

    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

impl SubmitError {
    /// Classifies a node's rejection message.
    pub fn from_rpc_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains(UNDERPRICED_REPLACEMENT) {
            SubmitError::UnderpricedReplacement(message)
        } else {
            SubmitError::Rejected(message)
        }
    }

    pub fn is_underpriced_replacement(&self) -> bool {
        matches!(self, SubmitError::UnderpricedReplacement(_))
    }
}

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("Consistency check failed: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("Signer Error: {0}")]
    Signer(String),

    #[error("Cannot submit an empty batch")]
    EmptyBatch,

    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,

    #[error("Failed to generate allocation for {} recipients in tx {tx_hash}", .recipients.len())]
    ExecutionFailed {
        tx_hash: TxHash,
        recipients: Vec<Address>,
    },

    /// The transaction was accepted by the node but its receipt could not be read.
    #[error("Receipt for tx {tx_hash} with {} recipients unavailable: {source}", .recipients.len())]
    ReceiptUnavailable {
        tx_hash: TxHash,
        recipients: Vec<Address>,
        #[source]
        source: ChainError,
    },

    #[error("Submission of batch of {} recipients with nonce {nonce} failed: {source}", .recipients.len())]
    SubmitRejected {
        nonce: u64,
        recipients: Vec<Address>,
        #[source]
        source: SubmitError,
    },
}
