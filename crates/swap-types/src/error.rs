use thiserror::Error;

use crate::digest::Digest32;

/// The closed error set from spec §7. Every fallible operation across the
/// workspace returns this one type — shared the way
/// `chronx_core::ChronxError` is consumed by every crate in that workspace —
/// rather than each crate inventing its own error enum, because §7 specifies
/// one closed set for the whole system.
///
/// Each variant carries the identifying context (escrow id, order hash,
/// amounts) the caller needs to act on the failure; nothing here is
/// retryable except where the doc comment says so.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("time-locks are not strictly monotone")]
    InvalidTimeLocks,

    #[error("invalid escrow immutables: {reason}")]
    InvalidImmutables { reason: String },

    #[error("caller {caller:?} is not authorized for this operation")]
    Unauthorized { caller: String },

    #[error("escrow {escrow_id} already reached a terminal state")]
    EscrowCompleted { escrow_id: Digest32 },

    #[error("secret does not hash to the escrow's hash_lock")]
    InvalidSecret,

    #[error("required time-lock phase has not opened yet")]
    TimeLockNotExpired,

    #[error("escrow {escrow_id} has not been funded")]
    NotFunded { escrow_id: Digest32 },

    #[error("escrow {escrow_id} is already funded")]
    AlreadyFunded { escrow_id: Digest32 },

    #[error("secret already coordinated for foreign escrow {foreign_escrow_id}")]
    SecretAlreadyCoordinated { foreign_escrow_id: Digest32 },

    #[error("secret already consumed locally")]
    SecretAlreadyUsed,

    #[error("no mapping registered for foreign escrow {foreign_escrow_id}")]
    UnknownForeignEscrow { foreign_escrow_id: Digest32 },

    #[error("merkle proof failed to reconstruct the expected root")]
    InvalidMerkleProof,

    #[error("order does not allow partial fills")]
    PartialFillsNotAllowed,

    #[error("fill percentage {basis_points} is out of the [0, 10000] basis-point range")]
    InvalidFillPercentage { basis_points: u64 },

    #[error("secret index {index} is out of bounds for {total} total secrets")]
    SecretIndexOutOfBounds { index: u64, total: u64 },

    #[error("checkpoint {checkpoint_hash} has not been verified")]
    CheckpointNotVerified { checkpoint_hash: Digest32 },

    #[error("signed stake {signed} * 10000 < total stake {total} * 6667")]
    InsufficientStake { signed: u128, total: u128 },

    #[error("order hash mismatch: expected {expected}, computed {computed}")]
    InvalidOrderHash {
        expected: Digest32,
        computed: Digest32,
    },

    // -- ambient, not in the closed set of spec §7 but required for the
    //    balance-primitive collaborator interface (spec §6) and digest
    //    parsing to fail cleanly instead of panicking.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },

    #[error("invalid hex digest encoding")]
    InvalidDigestEncoding,

    #[error("bidirectional mapping conflict: {foreign_escrow_id} already maps elsewhere")]
    MappingConflict { foreign_escrow_id: Digest32 },

    #[error("emergency reset not yet available: coordination timeout has not elapsed")]
    CoordinationTimeoutNotElapsed,
}

pub type Result<T> = std::result::Result<T, SwapError>;
