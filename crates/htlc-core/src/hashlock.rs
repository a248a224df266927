use swap_types::Digest32;

/// Keccak-256 of the raw preimage bytes (spec §4.1).
pub fn compute_hash_lock(secret: &[u8]) -> Digest32 {
    Digest32::keccak(secret)
}

/// Pure comparison: does `secret` hash to `lock`?
pub fn verify_hash(lock: Digest32, secret: &[u8]) -> bool {
    compute_hash_lock(secret) == lock
}
