use std::collections::HashMap;

use htlc_core::{compute_hash_lock, Escrow};
use swap_types::{Address, Balance, Digest32, Native, SwapError, SwapEvent};

use crate::entry::{BidirectionalMap, CoordinatorEntry, StatusTag};

/// Default emergency-reset timeout in seconds (spec §4.4 op 6): a row may
/// only be force-cleared an hour after its secret was coordinated.
pub const COORDINATION_TIMEOUT: u64 = 3_600;

/// The cross-chain secret-relay coordinator (spec §4.4), identical in shape
/// on both chains. No teacher analogue exists for this subsystem — the
/// teacher's factory only tracks its own local deployments — so the
/// bijection/one-shot-consumption logic here is built directly against
/// spec §4.4's operation list, with the `HashMap`-of-rows storage shape
/// carried over from the teacher's `LookupMap` convention.
///
/// `live_secrets` holds the raw preimage bytes actually relayed, keyed by
/// foreign escrow id; the other per-secret maps are keyed by the secret's
/// `compute_hash_lock` commitment rather than by the preimage itself, since
/// the preimage is not fixed-size (spec §8 S1 relays a 26-byte secret).
#[derive(Default)]
pub struct Coordinator {
    owner: Option<Address>,
    live_secrets: HashMap<Digest32, Vec<u8>>,
    secret_coordinated: HashMap<Digest32, bool>,
    secret_timestamp: HashMap<Digest32, u64>,
    secret_coordinator: HashMap<Digest32, Address>,
    coordination_status: HashMap<Digest32, StatusTag>,
    revealed_secrets: HashMap<Digest32, bool>,
    mapping: BidirectionalMap,
}

impl Coordinator {
    pub fn new(owner: Address) -> Self {
        Coordinator {
            owner: Some(owner),
            ..Default::default()
        }
    }

    fn assert_owner(&self, caller: Address) -> Result<(), SwapError> {
        if self.owner != Some(caller) {
            return Err(SwapError::Unauthorized {
                caller: format!("{caller:?}"),
            });
        }
        Ok(())
    }

    fn is_coordinated(&self, commitment: Digest32) -> bool {
        self.secret_coordinated.get(&commitment).copied().unwrap_or(false)
    }

    fn is_revealed(&self, commitment: Digest32) -> bool {
        self.revealed_secrets.get(&commitment).copied().unwrap_or(false)
    }

    /// `coordinate_secret_from_foreign` (spec §4.4 op 1). Permissionless —
    /// correctness relies on the hashlock, not on who relays. `revealed_secret`
    /// is the raw preimage bytes, not its hash — it is the same value that
    /// will later be handed to `Escrow::withdraw`.
    pub fn coordinate_secret_from_foreign(
        &mut self,
        foreign_escrow_id: Digest32,
        revealed_secret: Vec<u8>,
        local_order_hash: Digest32,
        coordinator_addr: Address,
        now: u64,
    ) -> Result<SwapEvent, SwapError> {
        if revealed_secret.is_empty() || foreign_escrow_id.is_zero() {
            return Err(SwapError::InvalidSecret);
        }
        let commitment = compute_hash_lock(&revealed_secret);
        if self.is_coordinated(commitment) {
            return Err(SwapError::SecretAlreadyCoordinated { foreign_escrow_id });
        }

        self.live_secrets.insert(foreign_escrow_id, revealed_secret.clone());
        self.secret_coordinated.insert(commitment, true);
        self.secret_timestamp.insert(commitment, now);
        self.secret_coordinator.insert(commitment, coordinator_addr);
        self.coordination_status
            .insert(foreign_escrow_id, StatusTag::SecretCoordinated);

        self.mapping.register(foreign_escrow_id, local_order_hash)?;

        let event = SwapEvent::SecretCoordinated {
            foreign_escrow_id,
            local_order_hash,
            secret: revealed_secret,
            coordinator: coordinator_addr,
            timestamp: now,
        };
        tracing::info!(%foreign_escrow_id, "secret coordinated from foreign chain");
        Ok(event)
    }

    /// `register_mapping` (spec §4.4 op 2), usable standalone when the
    /// mapping is known before any secret is revealed.
    pub fn register_mapping(
        &mut self,
        foreign_escrow_id: Digest32,
        local_order_hash: Digest32,
    ) -> Result<(), SwapError> {
        let inserted = self.mapping.register(foreign_escrow_id, local_order_hash)?;
        if inserted {
            self.coordination_status
                .insert(foreign_escrow_id, StatusTag::MappingRegistered);
        }
        Ok(())
    }

    /// `get_coordinated_secret` (spec §4.4 op 3). Returns the row as a
    /// `CoordinatorEntry` (spec §3) plus the derived `available` flag
    /// (`secret_coordinated ∧ ¬revealed`).
    pub fn get_coordinated_secret(
        &self,
        foreign_escrow_id: Digest32,
    ) -> Result<(CoordinatorEntry, bool), SwapError> {
        let secret = self
            .live_secrets
            .get(&foreign_escrow_id)
            .ok_or(SwapError::UnknownForeignEscrow { foreign_escrow_id })?
            .clone();
        let commitment = compute_hash_lock(&secret);

        let available = self.is_coordinated(commitment) && !self.is_revealed(commitment);
        let entry = CoordinatorEntry {
            secret,
            coordinated_at: self.secret_timestamp.get(&commitment).copied().unwrap_or(0),
            coordinator_addr: self.secret_coordinator[&commitment],
            status: self
                .coordination_status
                .get(&foreign_escrow_id)
                .copied()
                .unwrap_or(StatusTag::SecretCoordinated),
            consumed: self.is_revealed(commitment),
        };

        Ok((entry, available))
    }

    /// `withdraw_with_coordinated_secret` (spec §4.4 op 4). Enforces the
    /// one-shot local-consumption invariant (P3) before handing the secret
    /// to the local escrow's own hashlock check.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw_with_coordinated_secret<T>(
        &mut self,
        escrow: &mut Escrow<T>,
        foreign_escrow_id: Digest32,
        caller: Address,
        now: u64,
        src_chain: &str,
        dst_chain: &str,
        dst_amount: u64,
    ) -> Result<(Balance<T>, Balance<Native>, SwapEvent, SwapEvent), SwapError> {
        let secret = self
            .live_secrets
            .get(&foreign_escrow_id)
            .ok_or(SwapError::UnknownForeignEscrow { foreign_escrow_id })?
            .clone();
        let commitment = compute_hash_lock(&secret);

        if !self.is_coordinated(commitment) {
            return Err(SwapError::UnknownForeignEscrow { foreign_escrow_id });
        }
        if self.is_revealed(commitment) {
            return Err(SwapError::SecretAlreadyUsed);
        }
        self.revealed_secrets.insert(commitment, true);

        let (principal, safety, withdrawn) = escrow.withdraw(caller, &secret, now)?;

        self.coordination_status
            .insert(foreign_escrow_id, StatusTag::LocalWithdrawalComplete);

        let completed = SwapEvent::CrossChainSwapCompleted {
            order_hash: escrow.immutables.order_hash,
            src_chain: src_chain.to_string(),
            dst_chain: dst_chain.to_string(),
            src_amount: escrow.immutables.amount,
            dst_amount,
        };
        tracing::info!(%foreign_escrow_id, "cross-chain swap completed");
        Ok((principal, safety, withdrawn, completed))
    }

    /// `batch_coordinate_secrets` (spec §4.4 op 5). Already-coordinated
    /// entries are skipped silently, matching §7's documented exception to
    /// "never silently swallow".
    pub fn batch_coordinate_secrets(
        &mut self,
        entries: Vec<(Digest32, Vec<u8>, Digest32)>,
        coordinator_addr: Address,
        now: u64,
    ) -> Vec<SwapEvent> {
        let mut events = Vec::new();
        for (foreign_escrow_id, secret, local_order_hash) in entries {
            match self.coordinate_secret_from_foreign(
                foreign_escrow_id,
                secret,
                local_order_hash,
                coordinator_addr,
                now,
            ) {
                Ok(event) => events.push(event),
                Err(SwapError::SecretAlreadyCoordinated { .. }) => continue,
                Err(_) => continue,
            }
        }
        events
    }

    /// `emergency_reset` (spec §4.4 op 6) — owner-only, the only
    /// destructive operation, gated by the 1-hour coordination timeout.
    pub fn emergency_reset(
        &mut self,
        caller: Address,
        foreign_escrow_id: Digest32,
        now: u64,
    ) -> Result<(), SwapError> {
        self.assert_owner(caller)?;
        let secret = self
            .live_secrets
            .get(&foreign_escrow_id)
            .ok_or(SwapError::UnknownForeignEscrow { foreign_escrow_id })?
            .clone();
        let commitment = compute_hash_lock(&secret);
        let coordinated_at = self.secret_timestamp.get(&commitment).copied().unwrap_or(0);
        if now <= coordinated_at + COORDINATION_TIMEOUT {
            return Err(SwapError::CoordinationTimeoutNotElapsed);
        }

        self.live_secrets.remove(&foreign_escrow_id);
        self.secret_coordinated.remove(&commitment);
        self.secret_timestamp.remove(&commitment);
        self.secret_coordinator.remove(&commitment);
        self.coordination_status
            .insert(foreign_escrow_id, StatusTag::EmergencyReset);

        tracing::warn!(%foreign_escrow_id, "coordinator entry emergency-reset");
        Ok(())
    }
}
