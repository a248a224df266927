use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use swap_types::{Address, Digest32, SwapError};

/// The closed status vocabulary a `CoordinatorEntry` moves through (spec
/// §4.4). Declared as an enum rather than the spec's literal tagged strings
/// so an invalid status can't be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTag {
    SecretCoordinated,
    SecretAvailableCrossChain,
    MappingRegistered,
    LocalWithdrawalComplete,
    Cancelled,
    EmergencyReset,
    BidirectionalCompleted,
    ForeignEscrowInitiated,
}

/// One row per foreign escrow id, process-wide on each chain (spec §3).
/// `secret` is the raw preimage bytes as relayed from the foreign chain —
/// spec §3 describes it as "32 bytes" for the common case, but
/// `htlc-core`'s hashlock is defined over arbitrary-length preimages (spec
/// §8 S1 itself relays a 26-byte ASCII secret), so this carries the bytes
/// the relay actually observed rather than a fixed-size digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorEntry {
    pub secret: Vec<u8>,
    pub coordinated_at: u64,
    pub coordinator_addr: Address,
    pub status: StatusTag,
    pub consumed: bool,
}

/// The bijection between a Chain-E order hash and a Chain-S escrow id (spec
/// §3 `BidirectionalMap`). Registration is idempotent when both sides
/// already agree, and rejected when either side already maps elsewhere
/// (P9, P4).
#[derive(Default)]
pub struct BidirectionalMap {
    foreign_to_local: HashMap<Digest32, Digest32>,
    local_to_foreign: HashMap<Digest32, Digest32>,
}

impl BidirectionalMap {
    pub fn new() -> Self {
        BidirectionalMap::default()
    }

    /// `register_mapping` (spec §4.4 op 2). No-op if the same pair is
    /// already registered; errors with `MappingConflict` if either endpoint
    /// already maps to something else.
    pub fn register(
        &mut self,
        foreign_escrow_id: Digest32,
        local_order_hash: Digest32,
    ) -> Result<bool, SwapError> {
        if let Some(existing) = self.foreign_to_local.get(&foreign_escrow_id) {
            return if *existing == local_order_hash {
                Ok(false)
            } else {
                Err(SwapError::MappingConflict { foreign_escrow_id })
            };
        }
        if let Some(existing) = self.local_to_foreign.get(&local_order_hash) {
            if *existing != foreign_escrow_id {
                return Err(SwapError::MappingConflict { foreign_escrow_id });
            }
        }
        self.foreign_to_local.insert(foreign_escrow_id, local_order_hash);
        self.local_to_foreign.insert(local_order_hash, foreign_escrow_id);
        Ok(true)
    }

    pub fn by_foreign(&self, foreign_escrow_id: Digest32) -> Option<Digest32> {
        self.foreign_to_local.get(&foreign_escrow_id).copied()
    }

    pub fn by_local(&self, local_order_hash: Digest32) -> Option<Digest32> {
        self.local_to_foreign.get(&local_order_hash).copied()
    }
}
