use crate::*;

pub async fn process_status(args: &Args, status_args: &StatusArgs) -> Result<()> {
    let merkle_tree = GenesisMerkleTree::new_from_file(&status_args.merkle_tree_path)
        .context("failed to load merkle tree from file")?;

    let distributor = RpcDistributor::connect(args.get_provider()?, args.merkle_mine).await?;
    let validator = ProofValidator::new(&merkle_tree, distributor);

    match validator.has_claimed(&status_args.recipient).await {
        ClaimStatus::Claimed => println!("{}: allocation generated", status_args.recipient),
        ClaimStatus::NotClaimed => println!("{}: not generated", status_args.recipient),
        ClaimStatus::Unknown => println!("{}: unknown, rpc call failed", status_args.recipient),
    }
    Ok(())
}
