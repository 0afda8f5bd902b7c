//! alloy-backed implementations of the chain seams.

use std::fmt::Display;

use alloy::{
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::TransactionReceipt,
};
use async_trait::async_trait;
use tracing::debug;

use crate::{
    chain::{ClaimReceipt, ClaimTransport, DistributorReader},
    contracts::{
        IMerkleMine::{self, IMerkleMineInstance},
        IERC20::{self, IERC20Instance},
    },
    error::{ChainError, SubmitError},
};

fn call_error(call: &'static str) -> impl FnOnce(alloy::contract::Error) -> ChainError {
    move |e| ChainError::Call {
        call,
        message: e.to_string(),
    }
}

fn rpc_error(e: impl Display) -> ChainError {
    ChainError::Rpc(e.to_string())
}

fn claim_receipt(receipt: TransactionReceipt) -> ClaimReceipt {
    ClaimReceipt {
        transaction_hash: receipt.transaction_hash,
        success: receipt.status(),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    }
}

/// Handles to a MerkleMine contract and the token it distributes, resolved once.
pub struct RpcDistributor<P> {
    merkle_mine: IMerkleMineInstance<P>,
    token: IERC20Instance<P>,
}

impl<P: Provider + Clone> RpcDistributor<P> {
    /// Looks up the distributed token and builds both contract handles.
    pub async fn connect(provider: P, merkle_mine: Address) -> Result<Self, ChainError> {
        let merkle_mine = IMerkleMine::new(merkle_mine, provider.clone());
        let token_address = merkle_mine
            .token()
            .call()
            .await
            .map_err(call_error("token"))?;
        debug!("MerkleMine {} distributes token {}", merkle_mine.address(), token_address);

        Ok(Self {
            merkle_mine,
            token: IERC20::new(token_address, provider),
        })
    }

    pub fn token_address(&self) -> Address {
        *self.token.address()
    }
}

#[async_trait]
impl<P: Provider + Clone> DistributorReader for RpcDistributor<P> {
    fn address(&self) -> Address {
        *self.merkle_mine.address()
    }

    async fn total_genesis_recipients(&self) -> Result<U256, ChainError> {
        self.merkle_mine
            .totalGenesisRecipients()
            .call()
            .await
            .map_err(call_error("totalGenesisRecipients"))
    }

    async fn genesis_root(&self) -> Result<B256, ChainError> {
        self.merkle_mine
            .genesisRoot()
            .call()
            .await
            .map_err(call_error("genesisRoot"))
    }

    async fn started(&self) -> Result<bool, ChainError> {
        self.merkle_mine
            .started()
            .call()
            .await
            .map_err(call_error("started"))
    }

    async fn tokens_per_allocation(&self) -> Result<U256, ChainError> {
        self.merkle_mine
            .tokensPerAllocation()
            .call()
            .await
            .map_err(call_error("tokensPerAllocation"))
    }

    async fn generated(&self, recipient: Address) -> Result<bool, ChainError> {
        self.merkle_mine
            .generated(recipient)
            .call()
            .await
            .map_err(call_error("generated"))
    }

    async fn token_balance(&self) -> Result<U256, ChainError> {
        self.token
            .balanceOf(*self.merkle_mine.address())
            .call()
            .await
            .map_err(call_error("balanceOf"))
    }
}

/// Raw transaction submission and receipt watching over an alloy provider.
pub struct RpcClaimTransport<P> {
    provider: P,
}

impl<P: Provider> RpcClaimTransport<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider> ClaimTransport for RpcClaimTransport<P> {
    async fn pending_nonce(&self, address: Address) -> Result<u64, ChainError> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(rpc_error)
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }

    async fn broadcast(&self, raw: &Bytes) -> Result<TxHash, SubmitError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| SubmitError::from_rpc_message(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ClaimReceipt, ChainError> {
        if let Some(receipt) = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(rpc_error)?
        {
            return Ok(claim_receipt(receipt));
        }

        debug!("tx {} not yet included, watching for receipt", tx_hash);
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(rpc_error)?;
        Ok(claim_receipt(receipt))
    }
}
