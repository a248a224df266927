use serde::{Deserialize, Serialize};

use htlc_core::TokenId;
use swap_types::{Address, Digest32, SwapError, SwapEvent};

use crate::merkle::verify_merkle_proof;

/// The canonical order (spec §3 `Order`). `compute_order_hash` is defined
/// over exactly the fields named in spec §4.6; `maker_traits` is carried as
/// an opaque 32-byte bit-packed field (the teacher's `OrderExtension`
/// equivalent), not interpreted by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub salt: Digest32,
    pub maker: Address,
    pub receiver: Address,
    pub maker_asset: TokenId,
    pub taker_asset: TokenId,
    pub making_amount: u64,
    pub taking_amount: u64,
    pub maker_traits: Digest32,
}

/// `compute_order_hash(order)` (spec §4.6): Keccak-256 of
/// `salt ‖ enc(maker) ‖ enc(receiver) ‖ enc(making_amount) ‖ enc(taking_amount)`,
/// field-wise in this fixed order.
pub fn compute_order_hash(order: &Order) -> Digest32 {
    let mut buf = Vec::new();
    buf.extend_from_slice(order.salt.as_bytes());
    buf.extend_from_slice(order.maker.as_bytes());
    buf.extend_from_slice(order.receiver.as_bytes());
    buf.extend_from_slice(&order.making_amount.to_be_bytes());
    buf.extend_from_slice(&order.taking_amount.to_be_bytes());
    Digest32::keccak(&buf)
}

/// An `Order` extended with Merkle-tree partial-fill bookkeeping (spec §3
/// `PartialFillOrder`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFillOrder {
    pub order: Order,
    pub merkle_root: Digest32,
    pub fill_percentage: u64,
    pub secret_index: u64,
    pub allow_partial_fills: bool,
    pub total_secrets: u64,
}

/// `compute_order_hash` for a `PartialFillOrder` additionally folds in
/// `merkle_root` and `total_secrets` (spec §4.6).
pub fn compute_partial_fill_order_hash(order: &PartialFillOrder) -> Digest32 {
    let base = compute_order_hash(&order.order);
    let mut buf = Vec::new();
    buf.extend_from_slice(base.as_bytes());
    buf.extend_from_slice(order.merkle_root.as_bytes());
    buf.extend_from_slice(&order.total_secrets.to_be_bytes());
    Digest32::keccak(&buf)
}

/// `validate_partial_fill` (spec §4.6): pure precondition check, shared by
/// `execute_partial_fill` and by callers that only want to dry-run it.
pub fn validate_partial_fill(
    order: &PartialFillOrder,
    secret: &[u8],
    proof: &[Digest32],
    idx: u64,
    fill_bp: u64,
) -> Result<(), SwapError> {
    if !order.allow_partial_fills {
        return Err(SwapError::PartialFillsNotAllowed);
    }
    if fill_bp > 10_000 {
        return Err(SwapError::InvalidFillPercentage { basis_points: fill_bp });
    }
    if idx >= order.total_secrets {
        return Err(SwapError::SecretIndexOutOfBounds {
            index: idx,
            total: order.total_secrets,
        });
    }
    let leaf = Digest32::keccak(secret);
    if !verify_merkle_proof(leaf, proof, order.merkle_root, idx) {
        return Err(SwapError::InvalidMerkleProof);
    }
    Ok(())
}

/// `execute_partial_fill` (spec §4.6). Deliberately does **not** reject an
/// accumulator that would exceed 10_000 bp after this fill — spec §9 open
/// question 1, pinned by §8 scenario S4 and left exactly as specified.
pub fn execute_partial_fill(
    order: &mut PartialFillOrder,
    secret: &[u8],
    proof: &[Digest32],
    idx: u64,
    fill_bp: u64,
    executor: Address,
) -> Result<SwapEvent, SwapError> {
    validate_partial_fill(order, secret, proof, idx, fill_bp)?;

    let fill_amount = (order.order.making_amount as u128 * fill_bp as u128 / 10_000) as u64;
    order.fill_percentage += fill_bp;
    order.secret_index = idx;

    let event = SwapEvent::PartialFillExecuted {
        order_hash: compute_partial_fill_order_hash(order),
        secret_index: idx,
        fill_percentage: fill_bp,
        fill_amount,
        executor,
    };
    tracing::info!(idx, fill_bp, fill_amount, "partial fill executed");
    Ok(event)
}
