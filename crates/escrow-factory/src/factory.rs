use std::collections::HashMap;

use htlc_core::{Escrow, EscrowSide, Immutables};
use swap_types::{Address, Digest32, SwapError, SwapEvent};

/// Owns creation of escrows for one principal token kind `T` and emits the
/// deployment events the other chain observes (spec §4.3). Grounded on
/// `escrow-factory::create_src_escrow`/`create_dst_escrow`, which likewise
/// just validate the deposit and delegate to a freshly instantiated escrow
/// contract — here a `htlc_core::Escrow` value instead of a spawned NEAR
/// account.
pub struct Factory<T> {
    factory_id: Digest32,
    escrows: HashMap<Digest32, Escrow<T>>,
    deployment_count: u64,
}

impl<T> Factory<T> {
    pub fn new(factory_id: Digest32) -> Self {
        Factory {
            factory_id,
            escrows: HashMap::new(),
            deployment_count: 0,
        }
    }

    pub fn escrow_count(&self) -> u64 {
        self.deployment_count
    }

    pub fn get_escrow(&self, escrow_id: Digest32) -> Option<&Escrow<T>> {
        self.escrows.get(&escrow_id)
    }

    fn insert_fresh(&mut self, escrow_id: Digest32) -> Result<(), SwapError> {
        if self.escrows.contains_key(&escrow_id) {
            return Err(SwapError::AlreadyFunded { escrow_id });
        }
        Ok(())
    }

    /// `create_src_escrow` (spec §4.3): deploys the source-side escrow and
    /// emits `SrcEscrowCreated`.
    pub fn create_src_escrow(
        &mut self,
        escrow_id: Digest32,
        creator: Address,
        immutables: Immutables,
        t0: u64,
    ) -> Result<SwapEvent, SwapError> {
        self.insert_fresh(escrow_id)?;
        let (escrow, _) = Escrow::create(escrow_id, EscrowSide::Src, immutables, t0)?;
        self.escrows.insert(escrow_id, escrow);
        self.deployment_count += 1;

        let event = SwapEvent::SrcEscrowCreated {
            factory_id: self.factory_id,
            escrow_id,
            creator,
        };
        tracing::info!(escrow_id = %escrow_id, %creator, "src escrow created by factory");
        Ok(event)
    }

    /// `create_dst_escrow` (spec §4.3): deploys the destination-side escrow
    /// and emits `DstEscrowCreated`, carrying the matching source escrow's
    /// cancellation deadline so the destination chain can reason about the
    /// overall swap's worst-case lifetime.
    pub fn create_dst_escrow(
        &mut self,
        escrow_id: Digest32,
        creator: Address,
        immutables: Immutables,
        t0: u64,
        src_cancellation_timestamp: u64,
    ) -> Result<SwapEvent, SwapError> {
        self.insert_fresh(escrow_id)?;
        let (escrow, _) = Escrow::create(escrow_id, EscrowSide::Dst, immutables, t0)?;
        self.escrows.insert(escrow_id, escrow);
        self.deployment_count += 1;

        let event = SwapEvent::DstEscrowCreated {
            factory_id: self.factory_id,
            escrow_id,
            creator,
            src_cancellation_timestamp,
        };
        tracing::info!(escrow_id = %escrow_id, %creator, "dst escrow created by factory");
        Ok(event)
    }

    pub fn deposit(
        &mut self,
        escrow_id: Digest32,
        caller: Address,
        principal: swap_types::Balance<T>,
        safety: swap_types::Balance<swap_types::Native>,
    ) -> Result<SwapEvent, SwapError> {
        let escrow = self
            .escrows
            .get_mut(&escrow_id)
            .ok_or(SwapError::NotFunded { escrow_id })?;
        escrow.deposit(caller, principal, safety)
    }

    pub fn withdraw(
        &mut self,
        escrow_id: Digest32,
        caller: Address,
        secret: &[u8],
        now: u64,
    ) -> Result<
        (
            swap_types::Balance<T>,
            swap_types::Balance<swap_types::Native>,
            SwapEvent,
        ),
        SwapError,
    > {
        let escrow = self
            .escrows
            .get_mut(&escrow_id)
            .ok_or(SwapError::NotFunded { escrow_id })?;
        escrow.withdraw(caller, secret, now)
    }

    pub fn cancel(
        &mut self,
        escrow_id: Digest32,
        caller: Address,
        now: u64,
    ) -> Result<
        (
            swap_types::Balance<T>,
            swap_types::Balance<swap_types::Native>,
            SwapEvent,
        ),
        SwapError,
    > {
        let escrow = self
            .escrows
            .get_mut(&escrow_id)
            .ok_or(SwapError::NotFunded { escrow_id })?;
        escrow.cancel(caller, now)
    }
}
