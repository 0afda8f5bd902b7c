//! Client for MerkleMine token distributions.
//!
//! A MerkleMine contract stores the Merkle root of its genesis recipients. Anyone can
//! generate a recipient's allocation by presenting a proof of inclusion; the
//! MultiMerkleMine contract accepts many such proofs in one transaction.
//!
//! The flow is a strict pipeline:
//!
//! 1. [`ProofValidator::check_consistency`] confirms once that the local tree matches the
//!    contract and that the contract can pay out.
//! 2. [`ProofValidator::validate_proof`] rejects ineligible recipients locally.
//! 3. [`BatchSubmitter::submit_batch`] signs and sends one `multiGenerate` transaction,
//!    retrying once with the next nonce if the first is rejected as an underpriced
//!    replacement.
//!
//! [`ClaimPipeline`] strings the three together over a full recipient list.

pub mod chain;
pub mod contracts;
pub mod error;
pub mod pipeline;
pub mod rpc;
pub mod signer;
pub mod submitter;
pub mod tree;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chain::{ClaimReceipt, ClaimStatus, ClaimTransaction, ClaimTransport, DistributorReader};
pub use error::{ChainError, ConsistencyError, MinerError, ProofError, SubmitError};
pub use pipeline::{ClaimPipeline, ClaimReport};
pub use signer::{ClaimSigner, LocalClaimSigner};
pub use submitter::{gas_limit, BatchSubmitter, SubmitterConfig};
pub use tree::RecipientTree;
pub use validator::ProofValidator;

pub type Result<T> = std::result::Result<T, MinerError>;
