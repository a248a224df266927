//! Hash-time-lock primitives and the per-side escrow state machine.
//!
//! This crate knows nothing about factories, coordinators, or foreign
//! checkpoints — it is the pure core shared by both chains' escrows
//! (spec §4.1-§4.2).

pub mod escrow;
pub mod hashlock;
pub mod timelock;

pub use escrow::{validate_immutables, Escrow, EscrowSide, EscrowState, Immutables, TokenId};
pub use hashlock::{compute_hash_lock, verify_hash};
pub use timelock::{at_least, construct_time_locks, phase_at, Phase, Side, TimeLocks};
