use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

/// Leaf value of a recipient, as the MerkleMine contract computes it:
/// `keccak256(abi.encodePacked(recipient))`.
pub fn recipient_leaf(recipient: &Address) -> B256 {
    keccak256(recipient.as_slice())
}

/// Packs per-recipient proofs into the single `bytes` argument of
/// `multiGenerate`. Each proof is a 32-byte big-endian length (in bytes)
/// followed by its sibling hashes.
pub fn encode_batch_proofs(proofs: &[Vec<B256>]) -> Bytes {
    let total = proofs.iter().map(|p| 32 * (p.len() + 1)).sum();
    let mut out = Vec::with_capacity(total);
    for proof in proofs {
        let len = U256::from(proof.len() * 32);
        out.extend_from_slice(&len.to_be_bytes::<32>());
        for sibling in proof {
            out.extend_from_slice(sibling.as_slice());
        }
    }
    Bytes::from(out)
}

/// Inverse of [`encode_batch_proofs`]. Returns `None` on a malformed buffer.
pub fn decode_batch_proofs(data: &[u8]) -> Option<Vec<Vec<B256>>> {
    let mut proofs = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        if rest.len() < 32 {
            return None;
        }
        let len: usize = U256::from_be_slice(&rest[..32]).try_into().ok()?;
        rest = &rest[32..];
        if len % 32 != 0 || rest.len() < len {
            return None;
        }
        proofs.push(rest[..len].chunks(32).map(B256::from_slice).collect());
        rest = &rest[len..];
    }
    Some(proofs)
}
