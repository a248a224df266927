use serde::{Deserialize, Serialize};
use swap_types::SwapError;

/// Seven monotone offsets in seconds, relative to the escrow's creation time
/// `t0` (spec §3). Constructed only through [`construct_time_locks`], which
/// enforces the ordering invariant — there is no public mutable-field path
/// that could produce an invalid schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLocks {
    pub src_withdrawal: u64,
    pub src_public_withdrawal: u64,
    pub src_cancellation: u64,
    pub src_public_cancellation: u64,
    pub dst_withdrawal: u64,
    pub dst_public_withdrawal: u64,
    pub dst_cancellation: u64,
}

/// Validates and constructs a [`TimeLocks`] schedule. Fails with
/// [`SwapError::InvalidTimeLocks`] if the monotonic ordering from spec §3 is
/// violated:
/// `src_withdrawal < src_public_withdrawal < src_cancellation < src_public_cancellation`
/// `dst_withdrawal < dst_public_withdrawal < dst_cancellation`
pub fn construct_time_locks(
    src_withdrawal: u64,
    src_public_withdrawal: u64,
    src_cancellation: u64,
    src_public_cancellation: u64,
    dst_withdrawal: u64,
    dst_public_withdrawal: u64,
    dst_cancellation: u64,
) -> Result<TimeLocks, SwapError> {
    let src_ok = src_withdrawal < src_public_withdrawal
        && src_public_withdrawal < src_cancellation
        && src_cancellation < src_public_cancellation;
    let dst_ok = dst_withdrawal < dst_public_withdrawal && dst_public_withdrawal < dst_cancellation;

    if !src_ok || !dst_ok {
        return Err(SwapError::InvalidTimeLocks);
    }

    Ok(TimeLocks {
        src_withdrawal,
        src_public_withdrawal,
        src_cancellation,
        src_public_cancellation,
        dst_withdrawal,
        dst_public_withdrawal,
        dst_cancellation,
    })
}

/// Which ladder of the shared [`TimeLocks`] schedule an escrow evaluates.
/// Spec §3 stores both ladders in one `TimeLocks` value (so a source and a
/// destination escrow of the same order agree on a single encoding), but
/// spec §4.2 only ever gates a given escrow instance against its own side's
/// thresholds — exactly as the teacher's `escrow-src`/`escrow-dst` contracts
/// each read only their half of the same `Timelocks` struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Src,
    Dst,
}

/// The named stages from spec §4.1. Ordered by declaration so that
/// `phase >= Phase::SrcCancel` reads naturally, matching the precondition
/// language in spec §4.2 ("requires phase ≥ SrcPrivateWithdraw").
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    SrcPrivateWithdraw,
    SrcPublicWithdraw,
    SrcCancel,
    SrcPublicCancel,
    DstPrivateWithdraw,
    DstPublicWithdraw,
    DstCancel,
    /// Reserved for a host-side deadline past the last cancellation window
    /// (e.g. the 30-day emergency-rescue delay the teacher's escrows carry).
    /// `phase_at` never produces it itself — every ladder's final stage is
    /// already the open-ended `[threshold, ∞)` interval described in §5.
    Expired,
}

/// Computes the current phase of `side`'s ladder, `now - t0` seconds after
/// creation. Returns `None` before the ladder's first threshold
/// (`src_withdrawal`/`dst_withdrawal`) has elapsed — the finality-lock
/// window in which no withdrawal or cancellation path is open yet. Every
/// gate check in `htlc-core::escrow` compares against this with
/// [`at_least`], so the pre-gate window correctly compares below every named
/// `Phase` without needing an extra enum variant.
pub fn phase_at(now: u64, t0: u64, locks: &TimeLocks, side: Side) -> Option<Phase> {
    let delta = now.saturating_sub(t0);
    match side {
        Side::Src => {
            if delta < locks.src_withdrawal {
                None
            } else if delta < locks.src_public_withdrawal {
                Some(Phase::SrcPrivateWithdraw)
            } else if delta < locks.src_cancellation {
                Some(Phase::SrcPublicWithdraw)
            } else if delta < locks.src_public_cancellation {
                Some(Phase::SrcCancel)
            } else {
                Some(Phase::SrcPublicCancel)
            }
        }
        Side::Dst => {
            if delta < locks.dst_withdrawal {
                None
            } else if delta < locks.dst_public_withdrawal {
                Some(Phase::DstPrivateWithdraw)
            } else if delta < locks.dst_cancellation {
                Some(Phase::DstPublicWithdraw)
            } else {
                Some(Phase::DstCancel)
            }
        }
    }
}

/// `phase.unwrap_or_below_everything() >= min`, without needing `Phase` to
/// carry a sentinel "below all gates" variant of its own.
pub fn at_least(phase: Option<Phase>, min: Phase) -> bool {
    matches!(phase, Some(p) if p >= min)
}
