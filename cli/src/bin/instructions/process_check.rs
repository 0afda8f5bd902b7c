use crate::*;

pub async fn process_check(args: &Args, check_args: &CheckArgs) -> Result<()> {
    let merkle_tree = GenesisMerkleTree::new_from_file(&check_args.merkle_tree_path)
        .context("failed to load merkle tree from file")?;

    let distributor = RpcDistributor::connect(args.get_provider()?, args.merkle_mine).await?;
    let token = distributor.token_address();
    let validator = ProofValidator::new(&merkle_tree, distributor);
    validator.check_consistency().await?;

    println!(
        "MerkleMine {} distributing token {} matches local tree with root {}",
        args.merkle_mine, token, merkle_tree.merkle_root
    );
    Ok(())
}
