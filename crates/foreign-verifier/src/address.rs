use swap_types::{Address, Digest32};

const BRIDGE_DOMAIN: &[u8] = b"sui_bridge_v1";

/// `foreign_to_local_addr` (spec §4.5): deterministic one-way mapping from a
/// Chain-S (32-byte) address to a Chain-E (20-byte) address — the last 20
/// bytes of `Keccak-256(foreign32)`.
pub fn foreign_to_local_addr(foreign: Address) -> Address {
    let digest = Digest32::keccak(foreign.as_bytes());
    let mut evm = [0u8; 20];
    evm.copy_from_slice(&digest.as_bytes()[12..]);
    Address::evm(evm)
}

/// `local_to_foreign_addr` (spec §4.5): `Keccak-256(local20 ‖ "sui_bridge_v1")`.
pub fn local_to_foreign_addr(local: Address) -> Address {
    let mut buf = Vec::with_capacity(local.as_bytes().len() + BRIDGE_DOMAIN.len());
    buf.extend_from_slice(local.as_bytes());
    buf.extend_from_slice(BRIDGE_DOMAIN);
    Address::object(*Digest32::keccak(&buf).as_bytes())
}
