use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy::primitives::{address, keccak256, Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;
use merkle_mine_tree::genesis_merkle_tree::GenesisMerkleTree;

use crate::{
    chain::{ClaimReceipt, ClaimTransaction, ClaimTransport, DistributorReader},
    error::{ChainError, SubmitError},
    signer::ClaimSigner,
    Result,
};

pub const MERKLE_MINE: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const MULTI_MERKLE_MINE: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
pub const CALLER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub fn test_recipients() -> Vec<Address> {
    vec![
        address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
        address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    ]
}

pub fn test_tree() -> GenesisMerkleTree {
    GenesisMerkleTree::new(test_recipients()).unwrap()
}

pub fn many_recipients(n: u8) -> GenesisMerkleTree {
    GenesisMerkleTree::new((1..=n).map(Address::with_last_byte).collect()).unwrap()
}

pub struct MockDistributor {
    pub total_genesis_recipients: U256,
    pub genesis_root: B256,
    pub started: bool,
    pub tokens_per_allocation: U256,
    pub balance: U256,
    pub generated: HashSet<Address>,
    pub fail_reads: bool,
    /// `generated` lookups for these recipients fail
    pub unreadable: HashSet<Address>,
    reads: AtomicUsize,
}

impl MockDistributor {
    /// A started, funded contract deployed with `tree`.
    pub fn matching(tree: &GenesisMerkleTree) -> Self {
        Self {
            total_genesis_recipients: U256::from(tree.num_leaves),
            genesis_root: tree.merkle_root,
            started: true,
            tokens_per_allocation: U256::from(10),
            balance: U256::from(1_000),
            generated: HashSet::new(),
            fail_reads: false,
            unreadable: HashSet::new(),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read<T>(&self, value: T) -> std::result::Result<T, ChainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(ChainError::Rpc("connection reset".to_string()));
        }
        Ok(value)
    }
}

#[async_trait]
impl DistributorReader for MockDistributor {
    fn address(&self) -> Address {
        MERKLE_MINE
    }

    async fn total_genesis_recipients(&self) -> std::result::Result<U256, ChainError> {
        self.read(self.total_genesis_recipients)
    }

    async fn genesis_root(&self) -> std::result::Result<B256, ChainError> {
        self.read(self.genesis_root)
    }

    async fn started(&self) -> std::result::Result<bool, ChainError> {
        self.read(self.started)
    }

    async fn tokens_per_allocation(&self) -> std::result::Result<U256, ChainError> {
        self.read(self.tokens_per_allocation)
    }

    async fn generated(&self, recipient: Address) -> std::result::Result<bool, ChainError> {
        if self.unreadable.contains(&recipient) {
            return Err(ChainError::Rpc("request timed out".to_string()));
        }
        self.read(self.generated.contains(&recipient))
    }

    async fn token_balance(&self) -> std::result::Result<U256, ChainError> {
        self.read(self.balance)
    }
}

/// Signs by writing the nonce out as the payload.
#[derive(Default)]
pub struct MockSigner {
    signed: Mutex<Vec<ClaimTransaction>>,
}

impl MockSigner {
    pub fn signed(&self) -> Vec<ClaimTransaction> {
        self.signed.lock().unwrap().clone()
    }
}

impl ClaimSigner for MockSigner {
    fn address(&self) -> Address {
        CALLER
    }

    fn sign_transaction(&self, tx: &ClaimTransaction) -> Result<Bytes> {
        self.signed.lock().unwrap().push(tx.clone());
        Ok(Bytes::copy_from_slice(&tx.nonce.to_be_bytes()))
    }
}

/// Accepts every broadcast once the queued rejections are used up.
pub struct MockTransport {
    nonce: u64,
    chain_id: u64,
    rejections: Mutex<VecDeque<SubmitError>>,
    failed_receipts: Mutex<HashSet<TxHash>>,
    lost_receipts: Mutex<HashSet<TxHash>>,
    broadcasts: Mutex<Vec<Bytes>>,
}

impl MockTransport {
    pub fn new(nonce: u64, chain_id: u64) -> Self {
        Self {
            nonce,
            chain_id,
            rejections: Mutex::new(VecDeque::new()),
            failed_receipts: Mutex::new(HashSet::new()),
            lost_receipts: Mutex::new(HashSet::new()),
            broadcasts: Mutex::new(Vec::new()),
        }
    }

    pub fn hash_for_nonce(nonce: u64) -> TxHash {
        keccak256(nonce.to_be_bytes())
    }

    /// The next broadcast fails with `rejection`.
    pub fn reject_next(&self, rejection: SubmitError) {
        self.rejections.lock().unwrap().push_back(rejection);
    }

    pub fn fail_receipt(&self, tx_hash: TxHash) {
        self.failed_receipts.lock().unwrap().insert(tx_hash);
    }

    /// Receipt reads for `tx_hash` fail after the broadcast is accepted.
    pub fn lose_receipt(&self, tx_hash: TxHash) {
        self.lost_receipts.lock().unwrap().insert(tx_hash);
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcasts.lock().unwrap().len()
    }
}

#[async_trait]
impl ClaimTransport for MockTransport {
    async fn pending_nonce(&self, address: Address) -> std::result::Result<u64, ChainError> {
        assert_eq!(address, CALLER);
        Ok(self.nonce)
    }

    async fn chain_id(&self) -> std::result::Result<u64, ChainError> {
        Ok(self.chain_id)
    }

    async fn broadcast(&self, raw: &Bytes) -> std::result::Result<TxHash, SubmitError> {
        self.broadcasts.lock().unwrap().push(raw.clone());
        if let Some(rejection) = self.rejections.lock().unwrap().pop_front() {
            return Err(rejection);
        }
        Ok(keccak256(raw))
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> std::result::Result<ClaimReceipt, ChainError> {
        if self.lost_receipts.lock().unwrap().contains(&tx_hash) {
            return Err(ChainError::Rpc("connection reset".to_string()));
        }
        let success = !self.failed_receipts.lock().unwrap().contains(&tx_hash);
        Ok(ClaimReceipt {
            transaction_hash: tx_hash,
            success,
            block_number: Some(1),
            gas_used: 21_000,
        })
    }
}
