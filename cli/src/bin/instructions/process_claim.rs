use crate::*;

pub async fn process_claim(args: &Args, claim_args: &ClaimArgs) -> Result<()> {
    let merkle_tree = GenesisMerkleTree::new_from_file(&claim_args.merkle_tree_path)
        .context("failed to load merkle tree from file")?;

    let recipients = match &claim_args.recipients_path {
        Some(path) => read_addresses(path)?,
        None => merkle_tree.recipients.clone(),
    };

    let signer = args.get_signer()?;
    info!(
        "Claiming for {} recipients from caller {}",
        recipients.len(),
        signer.address()
    );

    let provider = args.get_provider()?;
    let distributor = RpcDistributor::connect(provider.clone(), args.merkle_mine).await?;
    let submitter = BatchSubmitter::new(
        &merkle_tree,
        RpcClaimTransport::new(provider),
        signer,
        args.merkle_mine,
        args.multi_merkle_mine,
        SubmitterConfig {
            gas_per_recipient: claim_args.gas_per_recipient,
            gas_limit_ceiling: claim_args.gas_limit_ceiling,
        },
    );
    let pipeline = ClaimPipeline::new(ProofValidator::new(&merkle_tree, distributor), submitter);

    let report = pipeline
        .run(&recipients, claim_args.batch_size, claim_args.gas_price)
        .await?;

    for batch in &report.batches {
        println!(
            "generated {} allocations in tx {}",
            batch.recipients.len(),
            batch.receipt.transaction_hash
        );
    }
    for ineligible in &report.ineligible {
        println!("skipped {}: {}", ineligible.recipient(), ineligible);
    }
    println!(
        "done: {} submitted, {} already generated, {} ineligible, {} with unknown status",
        report.submitted(),
        report.already_claimed.len(),
        report.ineligible.len(),
        report.unknown_status.len()
    );
    Ok(())
}
