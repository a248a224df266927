use std::collections::HashMap;

use htlc_core::{compute_hash_lock, TokenId};
use swap_types::{Address, Digest32, SwapError};

use crate::entry::StatusTag;

/// One row of locally-initiated escrow data for the E→S mirror direction
/// (spec §4.4 "Reverse direction"). Named after the teacher's
/// `EthereumEscrowData` row, generalised to either chain being "local".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalEscrowData {
    pub order_hash: Digest32,
    pub secret_hash: Digest32,
    pub maker: Address,
    pub taker: Address,
    pub token: TokenId,
    pub amount: u64,
    pub safety_deposit: u64,
    pub active: bool,
}

/// The E→S mirror of the forward-direction coordinator operations: a swap
/// initiated locally, whose secret is revealed locally and consumed on the
/// foreign chain.
#[derive(Default)]
pub struct LocalSwapRegistry {
    escrows: HashMap<Digest32, LocalEscrowData>,
    revealed_preimages: HashMap<Digest32, Digest32>,
    secret_used_on_foreign: HashMap<Digest32, bool>,
    status: HashMap<Digest32, StatusTag>,
}

impl LocalSwapRegistry {
    pub fn new() -> Self {
        LocalSwapRegistry::default()
    }

    /// `initiate_local_to_foreign_swap`: records the row and requires the
    /// caller to have attached at least the safety deposit.
    #[allow(clippy::too_many_arguments)]
    pub fn initiate_local_to_foreign_swap(
        &mut self,
        order_hash: Digest32,
        secret_hash: Digest32,
        maker: Address,
        taker: Address,
        token: TokenId,
        amount: u64,
        safety_deposit: u64,
        attached_value: u64,
    ) -> Result<(), SwapError> {
        if attached_value < safety_deposit {
            return Err(SwapError::InsufficientBalance {
                have: attached_value,
                need: safety_deposit,
            });
        }
        self.escrows.insert(
            order_hash,
            LocalEscrowData {
                order_hash,
                secret_hash,
                maker,
                taker,
                token,
                amount,
                safety_deposit,
                active: true,
            },
        );
        self.status
            .insert(order_hash, StatusTag::ForeignEscrowInitiated);
        tracing::info!(%order_hash, "local-to-foreign swap initiated");
        Ok(())
    }

    /// `link_local_order_to_foreign_escrow`: records which foreign escrow
    /// this local row corresponds to. The bijection bookkeeping itself is
    /// shared with the forward direction via `Coordinator::register_mapping`;
    /// this just marks this row's status.
    pub fn link_local_order_to_foreign_escrow(&mut self, order_hash: Digest32) -> Result<(), SwapError> {
        if !self.escrows.contains_key(&order_hash) {
            return Err(SwapError::UnknownForeignEscrow {
                foreign_escrow_id: order_hash,
            });
        }
        self.status.insert(order_hash, StatusTag::MappingRegistered);
        Ok(())
    }

    /// `reveal_local_secret`: publishes the preimage once it is checked
    /// against the row's stored `secret_hash`, for the foreign chain's
    /// relay to pick up.
    pub fn reveal_local_secret(
        &mut self,
        order_hash: Digest32,
        secret_preimage: &[u8],
    ) -> Result<(), SwapError> {
        let row = self
            .escrows
            .get(&order_hash)
            .ok_or(SwapError::UnknownForeignEscrow {
                foreign_escrow_id: order_hash,
            })?;
        if compute_hash_lock(secret_preimage) != row.secret_hash {
            return Err(SwapError::InvalidSecret);
        }
        self.revealed_preimages
            .insert(order_hash, Digest32::keccak(secret_preimage));
        tracing::info!(%order_hash, "local secret revealed for foreign consumption");
        Ok(())
    }

    /// `complete_foreign_withdrawal_from_local_secret`: marks the preimage
    /// consumed on the foreign chain and deactivates the local row.
    pub fn complete_foreign_withdrawal_from_local_secret(
        &mut self,
        order_hash: Digest32,
    ) -> Result<(), SwapError> {
        let row = self
            .escrows
            .get_mut(&order_hash)
            .ok_or(SwapError::UnknownForeignEscrow {
                foreign_escrow_id: order_hash,
            })?;
        let secret = *self
            .revealed_preimages
            .get(&order_hash)
            .ok_or(SwapError::UnknownForeignEscrow {
                foreign_escrow_id: order_hash,
            })?;
        if self.secret_used_on_foreign.get(&secret).copied().unwrap_or(false) {
            return Err(SwapError::SecretAlreadyUsed);
        }
        self.secret_used_on_foreign.insert(secret, true);
        row.active = false;
        self.status
            .insert(order_hash, StatusTag::BidirectionalCompleted);
        tracing::info!(%order_hash, "foreign withdrawal completed from local secret");
        Ok(())
    }

    pub fn get(&self, order_hash: Digest32) -> Option<&LocalEscrowData> {
        self.escrows.get(&order_hash)
    }

    pub fn status(&self, order_hash: Digest32) -> Option<StatusTag> {
        self.status.get(&order_hash).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::Evm([b; 20])
    }

    #[test]
    fn full_local_to_foreign_lifecycle() {
        let mut registry = LocalSwapRegistry::new();
        let secret = b"e-to-s-secret";
        let secret_hash = compute_hash_lock(secret);
        let order_hash = Digest32::keccak(b"order");

        registry
            .initiate_local_to_foreign_swap(
                order_hash,
                secret_hash,
                addr(1),
                addr(2),
                TokenId("native".into()),
                1_000,
                10,
                10,
            )
            .unwrap();
        registry.link_local_order_to_foreign_escrow(order_hash).unwrap();
        registry.reveal_local_secret(order_hash, secret).unwrap();
        registry
            .complete_foreign_withdrawal_from_local_secret(order_hash)
            .unwrap();

        assert!(!registry.get(order_hash).unwrap().active);
        assert_eq!(registry.status(order_hash), Some(StatusTag::BidirectionalCompleted));

        let err = registry
            .complete_foreign_withdrawal_from_local_secret(order_hash)
            .unwrap_err();
        assert_eq!(err, SwapError::SecretAlreadyUsed);
    }

    #[test]
    fn initiate_requires_sufficient_attached_value() {
        let mut registry = LocalSwapRegistry::new();
        let err = registry
            .initiate_local_to_foreign_swap(
                Digest32::keccak(b"order"),
                Digest32::keccak(b"hash"),
                addr(1),
                addr(2),
                TokenId("native".into()),
                1_000,
                10,
                5,
            )
            .unwrap_err();
        assert!(matches!(err, SwapError::InsufficientBalance { .. }));
    }

    #[test]
    fn reveal_rejects_wrong_preimage() {
        let mut registry = LocalSwapRegistry::new();
        let order_hash = Digest32::keccak(b"order");
        registry
            .initiate_local_to_foreign_swap(
                order_hash,
                compute_hash_lock(b"right"),
                addr(1),
                addr(2),
                TokenId("native".into()),
                1_000,
                10,
                10,
            )
            .unwrap();
        let err = registry.reveal_local_secret(order_hash, b"wrong").unwrap_err();
        assert_eq!(err, SwapError::InvalidSecret);
    }
}
