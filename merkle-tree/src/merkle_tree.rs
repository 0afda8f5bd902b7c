use merkle_mine_verify::hash_pair;

/// Layered sorted-pair Merkle tree over pre-hashed leaves.
///
/// Layer 0 holds the leaves in the order given. A node without a sibling is
/// promoted to the next layer unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: &[[u8; 32]]) -> Self {
        let mut layers = vec![leaves.to_vec()];

        while layers.last().map_or(false, |layer| layer.len() > 1) {
            let next = layers[layers.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next);
        }

        Self { layers }
    }

    pub fn get_root(&self) -> Option<[u8; 32]> {
        self.layers.last().and_then(|layer| layer.first()).copied()
    }

    pub fn num_leaves(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// Sibling hashes from the leaf at `index` up to (excluding) the root.
    pub fn find_proof(&self, index: usize) -> Option<Vec<[u8; 32]>> {
        if index >= self.num_leaves() {
            return None;
        }

        let mut proof = Vec::new();
        let mut index = index;
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            if let Some(hash) = layer.get(sibling) {
                proof.push(*hash);
            }
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;
    use merkle_mine_verify::verify;

    use super::*;

    fn leaves(n: u8) -> Vec<[u8; 32]> {
        (0..n).map(|i| keccak256([i]).0).collect()
    }

    #[test]
    fn test_empty_tree_has_no_root() {
        let tree = MerkleTree::new(&[]);
        assert_eq!(tree.get_root(), None);
        assert_eq!(tree.find_proof(0), None);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let leaves = leaves(1);
        let tree = MerkleTree::new(&leaves);
        assert_eq!(tree.get_root(), Some(leaves[0]));
        assert_eq!(tree.find_proof(0), Some(vec![]));
    }

    #[test]
    fn test_odd_node_is_promoted() {
        let leaves = leaves(3);
        let tree = MerkleTree::new(&leaves);
        let expected = hash_pair(&hash_pair(&leaves[0], &leaves[1]), &leaves[2]);
        assert_eq!(tree.get_root(), Some(expected));
        // the promoted leaf skips the layer it has no sibling in
        assert_eq!(tree.find_proof(2).unwrap().len(), 1);
    }

    #[test]
    fn test_every_proof_verifies() {
        for n in 1..=9 {
            let leaves = leaves(n);
            let tree = MerkleTree::new(&leaves);
            let root = tree.get_root().unwrap();
            for (i, leaf) in leaves.iter().enumerate() {
                let proof = tree.find_proof(i).unwrap();
                assert!(verify(&proof, root, *leaf), "leaf {i} of {n}");
            }
        }
    }
}
