use std::{fs, path::Path, str::FromStr};

use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    network::TxSignerSync,
    primitives::{Address, Bytes, TxKind},
    signers::local::PrivateKeySigner,
};

use crate::{chain::ClaimTransaction, error::MinerError, Result};

/// Turns a fully formed claim transaction into a broadcast-ready payload.
/// Implementations must be deterministic for a given transaction and key.
pub trait ClaimSigner {
    fn address(&self) -> Address;
    fn sign_transaction(&self, tx: &ClaimTransaction) -> Result<Bytes>;
}

/// Signs EIP-155 legacy transactions with an in-memory private key.
#[derive(Debug, Clone)]
pub struct LocalClaimSigner {
    signer: PrivateKeySigner,
}

impl LocalClaimSigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Reads a hex encoded private key, with or without `0x`, from `path`.
    pub fn from_key_file(path: &Path) -> Result<Self> {
        let key = fs::read_to_string(path)
            .map_err(|e| MinerError::Signer(format!("reading {}: {e}", path.display())))?;
        Self::from_str(key.trim())
    }
}

impl FromStr for LocalClaimSigner {
    type Err = MinerError;

    fn from_str(key: &str) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(key)
            .map_err(|e| MinerError::Signer(format!("invalid private key: {e}")))?;
        Ok(Self::new(signer))
    }
}

impl ClaimSigner for LocalClaimSigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    fn sign_transaction(&self, tx: &ClaimTransaction) -> Result<Bytes> {
        let mut legacy = TxLegacy {
            chain_id: Some(tx.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value,
            input: tx.data.clone(),
        };
        let signature = self
            .signer
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| MinerError::Signer(e.to_string()))?;
        let envelope = TxEnvelope::from(legacy.into_signed(signature));
        Ok(envelope.encoded_2718().into())
    }
}
