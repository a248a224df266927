//! Canonical order encoding and Merkle-tree partial fills (spec §4.6).

pub mod merkle;
pub mod order;

pub use merkle::{merkle_leaves, merkle_proof, merkle_root, verify_merkle_proof};
pub use order::{
    compute_order_hash, compute_partial_fill_order_hash, execute_partial_fill, validate_partial_fill,
    Order, PartialFillOrder,
};
