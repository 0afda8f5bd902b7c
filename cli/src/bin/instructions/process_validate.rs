use merkle_miner::validator::validate_proof;

use crate::*;

pub fn process_validate(validate_args: &ValidateArgs) -> Result<()> {
    let merkle_tree = GenesisMerkleTree::new_from_file(&validate_args.merkle_tree_path)
        .context("failed to load merkle tree from file")?;

    validate_proof(&merkle_tree, &validate_args.recipient)?;
    println!("Validated Merkle proof locally for {}", validate_args.recipient);
    Ok(())
}
