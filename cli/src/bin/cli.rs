mod instructions;

use std::path::PathBuf;

use alloy::{
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use instructions::*;
use merkle_mine_tree::{csv_entry::read_addresses, genesis_merkle_tree::GenesisMerkleTree};
use merkle_miner::{
    rpc::{RpcClaimTransport, RpcDistributor},
    BatchSubmitter, ClaimPipeline, ClaimSigner, ClaimStatus, LocalClaimSigner, ProofValidator,
    SubmitterConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// RPC url
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// MerkleMine contract address
    #[clap(long, env, default_value_t = Address::ZERO)]
    pub merkle_mine: Address,

    /// MultiMerkleMine contract address
    #[clap(long, env, default_value_t = Address::ZERO)]
    pub multi_merkle_mine: Address,

    /// File holding the caller's hex encoded private key
    #[clap(long, env)]
    pub private_key_path: Option<PathBuf>,
}

impl Args {
    fn get_provider(&self) -> Result<impl Provider + Clone> {
        let url: Url = self
            .rpc_url
            .parse()
            .with_context(|| format!("invalid rpc url {}", self.rpc_url))?;
        Ok(ProviderBuilder::new().connect_http(url))
    }

    fn get_signer(&self) -> Result<LocalClaimSigner> {
        let path = self
            .private_key_path
            .as_ref()
            .context("--private-key-path is required to sign transactions")?;
        Ok(LocalClaimSigner::from_key_file(path)?)
    }
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Merkle tree, given a CSV of recipient addresses
    CreateMerkleTree(CreateMerkleTreeArgs),
    /// Check that the local tree matches the MerkleMine contract and that it can pay out
    Check(CheckArgs),
    /// Verify a recipient's proof locally
    Validate(ValidateArgs),
    /// Show whether a recipient's allocation has been generated
    Status(StatusArgs),
    /// Generate allocations for recipients in batches through MultiMerkleMine
    Claim(ClaimArgs),
}

#[derive(Parser, Debug)]
pub struct CreateMerkleTreeArgs {
    /// CSV path
    #[clap(long, env)]
    pub csv_path: PathBuf,

    /// Merkle tree out path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    #[clap(long)]
    pub recipient: Address,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    #[clap(long)]
    pub recipient: Address,
}

#[derive(Parser, Debug)]
pub struct ClaimArgs {
    /// Merkle tree path
    #[clap(long, env)]
    pub merkle_tree_path: PathBuf,

    /// CSV of recipients to claim for. Defaults to every recipient in the tree
    #[clap(long, env)]
    pub recipients_path: Option<PathBuf>,

    /// Recipients per transaction
    #[clap(long, env, default_value_t = 40)]
    pub batch_size: usize,

    /// Gas price in wei
    #[clap(long, env)]
    pub gas_price: u128,

    #[clap(long, env, default_value_t = merkle_miner::submitter::GAS_PER_RECIPIENT)]
    pub gas_per_recipient: u64,

    #[clap(long, env, default_value_t = merkle_miner::submitter::GAS_LIMIT_CEILING)]
    pub gas_limit_ceiling: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match &args.command {
        Commands::CreateMerkleTree(merkle_tree_args) => {
            process_create_merkle_tree(merkle_tree_args)
        }
        Commands::Check(check_args) => process_check(&args, check_args).await,
        Commands::Validate(validate_args) => process_validate(validate_args),
        Commands::Status(status_args) => process_status(&args, status_args).await,
        Commands::Claim(claim_args) => process_claim(&args, claim_args).await,
    }
}
