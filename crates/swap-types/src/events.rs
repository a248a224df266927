use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::digest::Digest32;

/// The wire-level events from spec §6. Each operation that the spec requires
/// to "emit" an event constructs the corresponding variant rather than just
/// logging a string, so tests can assert on the exact payload (SPEC_FULL §C.1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapEvent {
    EscrowCreated {
        escrow_id: Digest32,
        maker: Address,
        taker: Address,
        amount: u64,
        hash_lock: Digest32,
        foreign_order_hash: Digest32,
    },
    Deposited {
        escrow_id: Digest32,
        depositor: Address,
        amount: u64,
        safety_deposit: u64,
    },
    /// `secret` is the raw preimage bytes — the cross-chain side channel.
    /// It is never hashed or otherwise post-processed before emission
    /// (spec §9 "Emitted secrets").
    Withdrawn {
        escrow_id: Digest32,
        secret: Vec<u8>,
        to: Address,
        amount: u64,
    },
    Cancelled {
        escrow_id: Digest32,
        to: Address,
        amount: u64,
    },
    SrcEscrowCreated {
        factory_id: Digest32,
        escrow_id: Digest32,
        creator: Address,
    },
    DstEscrowCreated {
        factory_id: Digest32,
        escrow_id: Digest32,
        creator: Address,
        src_cancellation_timestamp: u64,
    },
    SrcEscrowDeployed {
        resolver_id: Digest32,
        escrow_id: Digest32,
        deployer: Address,
        foreign_order_hash: Digest32,
    },
    /// `secret` is the raw preimage bytes relayed from the foreign chain,
    /// unhashed, mirroring `Withdrawn`'s convention above.
    SecretCoordinated {
        foreign_escrow_id: Digest32,
        local_order_hash: Digest32,
        secret: Vec<u8>,
        coordinator: Address,
        timestamp: u64,
    },
    CrossChainSwapCompleted {
        order_hash: Digest32,
        src_chain: String,
        dst_chain: String,
        src_amount: u64,
        dst_amount: u64,
    },
    PartialFillExecuted {
        order_hash: Digest32,
        secret_index: u64,
        fill_percentage: u64,
        fill_amount: u64,
        executor: Address,
    },
}
