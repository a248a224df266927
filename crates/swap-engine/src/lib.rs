//! Integration facade: wires the escrow, factory, coordinator, verifier and
//! order-book crates into one bidirectional atomic-swap engine (SPEC_FULL
//! §A). Every type a caller needs is re-exported here so downstream users
//! depend on one crate instead of the six component crates individually.

pub use escrow_factory::{Factory, Resolver};
pub use foreign_verifier::{foreign_to_local_addr, local_to_foreign_addr, Checkpoint, TxProof, ValidatorSignature, Verifier};
pub use htlc_core::{
    at_least, compute_hash_lock, construct_time_locks, phase_at, verify_hash, Escrow, EscrowSide,
    EscrowState, Immutables, Phase, Side, TimeLocks, TokenId,
};
pub use order_book::{
    compute_order_hash, compute_partial_fill_order_hash, execute_partial_fill, merkle_leaves,
    merkle_proof, merkle_root, validate_partial_fill, verify_merkle_proof, Order, PartialFillOrder,
};
pub use swap_coordinator::{
    BidirectionalMap, Coordinator, CoordinatorEntry, LocalEscrowData, LocalSwapRegistry, StatusTag,
    COORDINATION_TIMEOUT,
};
pub use swap_types::{Address, Balance, Digest32, Native, Principal, Result, SwapError, SwapEvent};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a process-wide `tracing_subscriber::fmt` subscriber, env-filter
/// driven (SPEC_FULL §B "Logging"). Idempotent, so every integration test
/// can call it without caring whether another test already has.
pub fn init_test_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
