use crate::*;

pub fn process_create_merkle_tree(merkle_tree_args: &CreateMerkleTreeArgs) -> Result<()> {
    let merkle_tree = GenesisMerkleTree::new_from_csv(&merkle_tree_args.csv_path)?;
    merkle_tree.write_to_file(&merkle_tree_args.merkle_tree_path)?;

    println!(
        "created merkle tree with {} recipients and root {} at {}",
        merkle_tree.num_leaves,
        merkle_tree.merkle_root,
        merkle_tree_args.merkle_tree_path.display()
    );
    Ok(())
}
