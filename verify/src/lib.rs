use alloy_primitives::keccak256;

/// Hash of an ordered pair of nodes, smaller node first.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a);
        buf[32..].copy_from_slice(b);
    } else {
        buf[..32].copy_from_slice(b);
        buf[32..].copy_from_slice(a);
    }
    keccak256(buf).0
}

/// Returns true if a `leaf` can be proved to be a part of a Merkle tree
/// defined by `root`. For this, a `proof` must be provided, containing
/// sibling hashes on the branch from the leaf to the root of the tree. Each
/// pair of leaves and each pair of pre-images are assumed to be sorted.
/// Same scheme as the MerkleMine contract's `MerkleProof.verifyProof`.
pub fn verify(proof: &[[u8; 32]], root: [u8; 32], leaf: [u8; 32]) -> bool {
    let computed_hash = proof
        .iter()
        .fold(leaf, |computed_hash, proof_element| {
            hash_pair(&computed_hash, proof_element)
        });
    // Check if the computed hash (root) is equal to the provided root
    computed_hash == root
}
