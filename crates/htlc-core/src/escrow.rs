use serde::{Deserialize, Serialize};
use swap_types::{Address, Balance, Digest32, Native, SwapError, SwapEvent};

use crate::hashlock::verify_hash;
use crate::timelock::{at_least, phase_at, Phase, Side, TimeLocks};

/// A ledger-native token identifier (spec §3 `token_type`). Opaque beyond
/// equality — the core never branches on which token this names, only on
/// the compile-time marker `P` an `Escrow<P>` is instantiated with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenId(pub String);

/// Which half of a swap this escrow instance is (spec §4.2's state machine
/// diagram is identical on both sides; only the withdrawal/cancellation
/// recipients differ — see `Escrow::withdraw`/`cancel`, and DESIGN.md §
/// "Open Question decisions" #3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowSide {
    Src,
    Dst,
}

impl From<EscrowSide> for Side {
    fn from(s: EscrowSide) -> Side {
        match s {
            EscrowSide::Src => Side::Src,
            EscrowSide::Dst => Side::Dst,
        }
    }
}

/// One per escrow, fixed for its life (spec §3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immutables {
    pub order_hash: Digest32,
    pub hash_lock: Digest32,
    pub maker: Address,
    pub taker: Address,
    pub token_type: TokenId,
    pub amount: u64,
    pub safety_deposit: u64,
    pub time_locks: TimeLocks,
    pub foreign_order_hash: Digest32,
}

/// Errors specific to constructing `Immutables`; folded into `SwapError` so
/// every crate keeps returning the one closed error set.
pub fn validate_immutables(immutables: &Immutables, escrow_id: Digest32) -> Result<(), SwapError> {
    if immutables.amount == 0 {
        return Err(SwapError::InvalidImmutables {
            reason: "amount is zero".into(),
        });
    }
    if immutables.hash_lock.is_zero() {
        return Err(SwapError::InvalidImmutables {
            reason: "hash_lock is zero".into(),
        });
    }
    if escrow_id.is_zero() {
        return Err(SwapError::InvalidImmutables {
            reason: "escrow_id is zero".into(),
        });
    }
    Ok(())
}

/// The four-state lifecycle from spec §4.2, derived from `is_completed` and
/// the two balances rather than stored redundantly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscrowState {
    Created,
    Funded,
    Withdrawn,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Completion {
    Withdrawn,
    Cancelled,
}

/// A single escrow instance, generic over its principal token marker `P`.
/// Holds the deposited principal and safety deposit, enforces the state
/// machine, and returns the wire event (spec §6) for every mutating call.
#[derive(Clone, Debug)]
pub struct Escrow<P> {
    pub immutables: Immutables,
    pub side: EscrowSide,
    pub escrow_id: Digest32,
    pub t0: u64,
    deposited: Balance<P>,
    safety: Balance<Native>,
    funded: bool,
    completion: Option<Completion>,
}

impl<P> Escrow<P> {
    /// `create` (spec §4.2 op 1): allocates empty balances and freezes
    /// `immutables`. `t0` is the host ledger's creation timestamp.
    pub fn create(
        escrow_id: Digest32,
        side: EscrowSide,
        immutables: Immutables,
        t0: u64,
    ) -> Result<(Self, SwapEvent), SwapError> {
        validate_immutables(&immutables, escrow_id)?;

        let escrow = Escrow {
            escrow_id,
            side,
            t0,
            deposited: Balance::zero(),
            safety: Balance::zero(),
            funded: false,
            completion: None,
            immutables: immutables.clone(),
        };

        let event = SwapEvent::EscrowCreated {
            escrow_id,
            maker: immutables.maker,
            taker: immutables.taker,
            amount: immutables.amount,
            hash_lock: immutables.hash_lock,
            foreign_order_hash: immutables.foreign_order_hash,
        };

        tracing::info!(escrow_id = %escrow_id, ?side, "escrow created");
        Ok((escrow, event))
    }

    pub fn state(&self) -> EscrowState {
        match self.completion {
            Some(Completion::Withdrawn) => EscrowState::Withdrawn,
            Some(Completion::Cancelled) => EscrowState::Cancelled,
            None if self.funded => EscrowState::Funded,
            None => EscrowState::Created,
        }
    }

    fn assert_live(&self) -> Result<(), SwapError> {
        if self.completion.is_some() {
            return Err(SwapError::EscrowCompleted {
                escrow_id: self.escrow_id,
            });
        }
        Ok(())
    }

    fn phase(&self, now: u64) -> Option<Phase> {
        phase_at(now, self.t0, &self.immutables.time_locks, self.side.into())
    }

    /// `deposit` (spec §4.2 op 2), taker-only.
    pub fn deposit(
        &mut self,
        caller: Address,
        principal: Balance<P>,
        safety: Balance<Native>,
    ) -> Result<SwapEvent, SwapError> {
        self.assert_live()?;

        if caller != self.immutables.taker {
            return Err(SwapError::Unauthorized {
                caller: format!("{caller:?}"),
            });
        }
        if self.funded {
            return Err(SwapError::AlreadyFunded {
                escrow_id: self.escrow_id,
            });
        }
        if principal.value() != self.immutables.amount {
            return Err(SwapError::NotFunded {
                escrow_id: self.escrow_id,
            });
        }
        if safety.value() != self.immutables.safety_deposit {
            return Err(SwapError::NotFunded {
                escrow_id: self.escrow_id,
            });
        }

        self.deposited.join(principal);
        self.safety.join(safety);
        self.funded = true;

        let event = SwapEvent::Deposited {
            escrow_id: self.escrow_id,
            depositor: caller,
            amount: self.immutables.amount,
            safety_deposit: self.immutables.safety_deposit,
        };
        tracing::info!(escrow_id = %self.escrow_id, "escrow funded");
        Ok(event)
    }

    /// The recipient of the principal on a successful withdrawal, per
    /// DESIGN.md's resolution of spec §9 open question 3: the source escrow
    /// pays the taker (who is revealing the secret to claim the funds the
    /// maker locked); the destination escrow pays the maker (who is
    /// revealing the secret to claim the funds the taker locked there).
    fn withdrawal_recipient(&self) -> Address {
        match self.side {
            EscrowSide::Src => self.immutables.taker,
            EscrowSide::Dst => self.immutables.maker,
        }
    }

    /// The recipient of the principal on cancellation — the mirror of
    /// `withdrawal_recipient`: whichever party originally deposited it.
    fn cancellation_recipient(&self) -> Address {
        match self.side {
            EscrowSide::Src => self.immutables.maker,
            EscrowSide::Dst => self.immutables.taker,
        }
    }

    /// `withdraw` (spec §4.2 op 3). `caller` determines which phase gate
    /// applies: the taker may withdraw once the private-withdrawal phase
    /// opens; anyone may once the public-withdrawal phase opens.
    pub fn withdraw(
        &mut self,
        caller: Address,
        secret: &[u8],
        now: u64,
    ) -> Result<(Balance<P>, Balance<Native>, SwapEvent), SwapError> {
        self.assert_live()?;
        if !self.funded {
            return Err(SwapError::NotFunded {
                escrow_id: self.escrow_id,
            });
        }

        let (private_gate, public_gate) = match self.side {
            EscrowSide::Src => (Phase::SrcPrivateWithdraw, Phase::SrcPublicWithdraw),
            EscrowSide::Dst => (Phase::DstPrivateWithdraw, Phase::DstPublicWithdraw),
        };
        let phase = self.phase(now);
        let gate = if caller == self.immutables.taker {
            private_gate
        } else {
            public_gate
        };
        if !at_least(phase, gate) {
            return Err(SwapError::TimeLockNotExpired);
        }

        if !verify_hash(self.immutables.hash_lock, secret) {
            return Err(SwapError::InvalidSecret);
        }

        self.completion = Some(Completion::Withdrawn);
        let principal = self.deposited.take();
        let safety = self.safety.take();
        let to = self.withdrawal_recipient();

        let event = SwapEvent::Withdrawn {
            escrow_id: self.escrow_id,
            secret: secret.to_vec(),
            to,
            amount: principal.value(),
        };
        tracing::info!(escrow_id = %self.escrow_id, %to, "escrow withdrawn");
        Ok((principal, safety, event))
    }

    /// `cancel` (spec §4.2 op 4). Taker may cancel once the private
    /// cancellation phase opens; anyone may once the public cancellation
    /// phase opens. On the destination side there is no public-cancel
    /// distinction (spec §3's dst ladder has only one cancellation
    /// threshold), so any caller may cancel once `DstCancel` opens.
    pub fn cancel(
        &mut self,
        caller: Address,
        now: u64,
    ) -> Result<(Balance<P>, Balance<Native>, SwapEvent), SwapError> {
        self.assert_live()?;

        let phase = self.phase(now);
        let allowed = match self.side {
            EscrowSide::Src => {
                if caller == self.immutables.taker {
                    at_least(phase, Phase::SrcCancel)
                } else {
                    at_least(phase, Phase::SrcPublicCancel)
                }
            }
            EscrowSide::Dst => at_least(phase, Phase::DstCancel),
        };
        if !allowed {
            return Err(SwapError::TimeLockNotExpired);
        }

        self.completion = Some(Completion::Cancelled);
        let principal = self.deposited.take();
        let safety = self.safety.take();
        let to = self.cancellation_recipient();

        let event = SwapEvent::Cancelled {
            escrow_id: self.escrow_id,
            to,
            amount: principal.value(),
        };
        tracing::info!(escrow_id = %self.escrow_id, %to, "escrow cancelled");
        Ok((principal, safety, event))
    }
}
