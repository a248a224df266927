use htlc_core::{Escrow, Immutables};
use swap_types::{Address, Balance, Digest32, Native, SwapError, SwapEvent};

use crate::factory::Factory;

/// An owner-gated wrapper around [`Factory`] (spec §4.3). Grounded on
/// `near-contracts/resolver::{deploy_src, deploy_dst, withdraw, cancel}`,
/// which forward to the factory but additionally check `owner_id ==
/// env::predecessor_account_id()` before deployment or deposit. `withdraw`
/// and `cancel` stay permissionless — "anyone with the secret" per spec
/// §4.3 — so they are not gated here, just forwarded.
pub struct Resolver<T> {
    resolver_id: Digest32,
    owner: Address,
    factory: Factory<T>,
}

impl<T> Resolver<T> {
    pub fn new(resolver_id: Digest32, owner: Address, factory: Factory<T>) -> Self {
        Resolver {
            resolver_id,
            owner,
            factory,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn factory(&self) -> &Factory<T> {
        &self.factory
    }

    fn assert_owner(&self, caller: Address) -> Result<(), SwapError> {
        if caller != self.owner {
            return Err(SwapError::Unauthorized {
                caller: format!("{caller:?}"),
            });
        }
        Ok(())
    }

    /// `deploy_src`: owner-gated creation of the source escrow, emitting
    /// both the factory's `SrcEscrowCreated` and the resolver-level
    /// `SrcEscrowDeployed{resolver_id, escrow_id, deployer, foreign_order_hash}`
    /// named in spec §4.3.
    pub fn deploy_src(
        &mut self,
        caller: Address,
        escrow_id: Digest32,
        immutables: Immutables,
        t0: u64,
    ) -> Result<(SwapEvent, SwapEvent), SwapError> {
        self.assert_owner(caller)?;
        let foreign_order_hash = immutables.foreign_order_hash;
        let created = self
            .factory
            .create_src_escrow(escrow_id, caller, immutables, t0)?;

        let deployed = SwapEvent::SrcEscrowDeployed {
            resolver_id: self.resolver_id,
            escrow_id,
            deployer: caller,
            foreign_order_hash,
        };
        tracing::info!(escrow_id = %escrow_id, "src escrow deployed via resolver");
        Ok((created, deployed))
    }

    /// `deploy_dst`: owner-gated creation of the destination escrow.
    pub fn deploy_dst(
        &mut self,
        caller: Address,
        escrow_id: Digest32,
        immutables: Immutables,
        t0: u64,
        src_cancellation_timestamp: u64,
    ) -> Result<SwapEvent, SwapError> {
        self.assert_owner(caller)?;
        self.factory.create_dst_escrow(
            escrow_id,
            caller,
            immutables,
            t0,
            src_cancellation_timestamp,
        )
    }

    /// `deposit_to_escrow`: owner-gated, since only the resolver is trusted
    /// to have actually collected the maker's/taker's funds before forwarding
    /// the deposit.
    pub fn deposit_to_escrow(
        &mut self,
        caller: Address,
        escrow_id: Digest32,
        principal: Balance<T>,
        safety: Balance<Native>,
    ) -> Result<SwapEvent, SwapError> {
        self.assert_owner(caller)?;
        self.factory.deposit(escrow_id, caller, principal, safety)
    }

    /// Permissionless: anyone holding the secret may withdraw once the
    /// phase gate opens (spec §4.3 "Anyone with the secret may call
    /// `withdraw` after the timelock").
    pub fn withdraw(
        &mut self,
        caller: Address,
        escrow_id: Digest32,
        secret: &[u8],
        now: u64,
    ) -> Result<(Balance<T>, Balance<Native>, SwapEvent), SwapError> {
        self.factory.withdraw(escrow_id, caller, secret, now)
    }

    pub fn cancel(
        &mut self,
        caller: Address,
        escrow_id: Digest32,
        now: u64,
    ) -> Result<(Balance<T>, Balance<Native>, SwapEvent), SwapError> {
        self.factory.cancel(escrow_id, caller, now)
    }

    pub fn get_escrow(&self, escrow_id: Digest32) -> Option<&Escrow<T>> {
        self.factory.get_escrow(escrow_id)
    }

    /// The only mutating operation on the Resolver itself (spec §4.3).
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), SwapError> {
        self.assert_owner(caller)?;
        tracing::info!(old_owner = %self.owner, new_owner = %new_owner, "resolver ownership transferred");
        self.owner = new_owner;
        Ok(())
    }
}
