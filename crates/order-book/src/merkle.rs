use swap_types::Digest32;

/// Leaves of the partial-fill Merkle tree: `Keccak-256(secret_i)` for each
/// fragment secret (spec §3 `MerkleTree`).
pub fn merkle_leaves(secrets: &[&[u8]]) -> Vec<Digest32> {
    secrets.iter().map(|s| Digest32::keccak(s)).collect()
}

fn next_level(level: &[Digest32]) -> Vec<Digest32> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    let mut i = 0;
    while i < level.len() {
        let left = level[i];
        let right = *level.get(i + 1).unwrap_or(&left); // odd node duplicated (spec §3)
        next.push(Digest32::keccak_pair(&left, &right));
        i += 2;
    }
    next
}

/// `merkle_tree(secrets)` (spec §4.6): builds the full tree bottom-up and
/// returns its root. Defined for `N >= 1`; depth is `⌈log₂ N⌉` (0 for N=1),
/// which falls out of the loop naturally rather than being computed
/// separately.
pub fn merkle_root(leaves: &[Digest32]) -> Digest32 {
    assert!(!leaves.is_empty(), "merkle_root requires at least one leaf");
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level[0]
}

/// Builds the sibling path for `index` against `leaves` — not itself named
/// in spec §4.6, but the natural prover-side counterpart to
/// `verify_merkle_proof`, needed to exercise it end-to-end.
pub fn merkle_proof(leaves: &[Digest32], mut index: usize) -> Vec<Digest32> {
    let mut level = leaves.to_vec();
    let mut proof = Vec::new();
    while level.len() > 1 {
        let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
        let sibling = *level.get(sibling_index).unwrap_or(&level[index]);
        proof.push(sibling);
        level = next_level(&level);
        index /= 2;
    }
    proof
}

/// `verify_merkle_proof(leaf, proof, root, index)` (spec §4.6): the
/// index-bit scheme — at each step, even index hashes `h ‖ sib`, odd index
/// hashes `sib ‖ h`. Kept deliberately separate from
/// `foreign-verifier::verify_sorted_pair_merkle` (spec §9).
pub fn verify_merkle_proof(leaf: Digest32, proof: &[Digest32], root: Digest32, mut index: u64) -> bool {
    let mut h = leaf;
    for sibling in proof {
        h = if index % 2 == 0 {
            Digest32::keccak_pair(&h, sibling)
        } else {
            Digest32::keccak_pair(sibling, &h)
        };
        index /= 2;
    }
    h == root
}
