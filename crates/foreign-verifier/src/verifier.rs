use std::collections::{HashMap, HashSet};

use swap_types::{Digest32, SwapError};

use crate::types::{Checkpoint, TxProof};

/// Verifies a [`Digest32`] merkle path where each step concatenates the two
/// elements in **sorted** byte order before hashing (spec §4.5's
/// "Bitcoin-style" sorted-pair scheme) — deliberately distinct from
/// `order-book`'s index-bit scheme (spec §9 "must not unify them").
pub fn verify_sorted_pair_merkle(leaf: Digest32, path: &[Digest32], root: Digest32) -> bool {
    let mut h = leaf;
    for sibling in path {
        h = if h.as_bytes() <= sibling.as_bytes() {
            Digest32::keccak_pair(&h, sibling)
        } else {
            Digest32::keccak_pair(sibling, &h)
        };
    }
    h == root
}

/// Stake-weighted checkpoint verification plus Merkle transaction inclusion
/// (spec §4.5). Grounded on `ligerito-beefy::verifier::verify_finality_stake`,
/// adapted from BLS aggregate signatures to per-validator Ed25519 checks.
#[derive(Default)]
pub struct Verifier {
    verified_checkpoints: HashMap<Digest32, bool>,
    verified_transactions: HashSet<Digest32>,
}

impl Verifier {
    pub fn new() -> Self {
        Verifier::default()
    }

    /// `verify_checkpoint` (spec §4.5). Recomputes on every call — a single
    /// flipped signature bit must flip the outcome on re-evaluation (P7) —
    /// and memoizes the outcome so `verify_transaction` need not resupply
    /// the signature set.
    pub fn verify_checkpoint(&mut self, checkpoint: &Checkpoint) -> bool {
        let accepted = checkpoint.has_supermajority();
        self.verified_checkpoints
            .insert(checkpoint.checkpoint_hash, accepted);
        tracing::info!(
            checkpoint_hash = %checkpoint.checkpoint_hash,
            accepted,
            "checkpoint verification evaluated"
        );
        accepted
    }

    /// Same check, surfaced as a `Result` carrying the stake context for
    /// callers that want `SwapError::InsufficientStake` rather than a bare
    /// bool.
    pub fn require_checkpoint_verified(&mut self, checkpoint: &Checkpoint) -> Result<(), SwapError> {
        if self.verify_checkpoint(checkpoint) {
            Ok(())
        } else {
            Err(SwapError::InsufficientStake {
                signed: checkpoint.signed_stake(),
                total: checkpoint.total_stake(),
            })
        }
    }

    pub fn is_checkpoint_verified(&self, checkpoint_hash: Digest32) -> bool {
        self.verified_checkpoints
            .get(&checkpoint_hash)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_transaction_verified(&self, tx_hash: Digest32) -> bool {
        self.verified_transactions.contains(&tx_hash)
    }

    /// `verify_transaction` (spec §4.5): requires the referenced checkpoint
    /// to already be verified, then runs the sorted-pair Merkle check.
    pub fn verify_transaction(&mut self, proof: &TxProof) -> Result<bool, SwapError> {
        if !self.is_checkpoint_verified(proof.checkpoint_hash) {
            return Err(SwapError::CheckpointNotVerified {
                checkpoint_hash: proof.checkpoint_hash,
            });
        }

        let included = verify_sorted_pair_merkle(proof.tx_hash, &proof.merkle_path, proof.checkpoint_hash);
        if included {
            self.verified_transactions.insert(proof.tx_hash);
        }
        tracing::info!(tx_hash = %proof.tx_hash, included, "transaction inclusion evaluated");
        Ok(included)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidatorSignature;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    fn signer() -> SigningKey {
        SigningKey::generate(&mut OsRng)
    }

    fn sig_for(key: &SigningKey, stake: u64, message: &[u8]) -> ValidatorSignature {
        let sig = key.sign(message);
        ValidatorSignature {
            ed25519_sig: sig.to_bytes(),
            public_key: key.verifying_key().to_bytes(),
            stake_weight: stake,
        }
    }

    fn unsigned(stake: u64) -> ValidatorSignature {
        // Present, but garbage signature bytes so it never verifies — models
        // a validator slot that did not sign.
        ValidatorSignature {
            ed25519_sig: [0u8; 64],
            public_key: signer().verifying_key().to_bytes(),
            stake_weight: stake,
        }
    }

    #[test]
    fn two_of_three_signing_meets_two_thirds_threshold() {
        let checkpoint_hash = Digest32::keccak(b"checkpoint");
        let k1 = signer();
        let k2 = signer();
        let checkpoint = Checkpoint {
            checkpoint_hash,
            sequence: 1,
            signatures: vec![
                sig_for(&k1, 4, checkpoint_hash.as_bytes()),
                sig_for(&k2, 3, checkpoint_hash.as_bytes()),
                unsigned(3),
            ],
        };
        let mut verifier = Verifier::new();
        assert!(verifier.verify_checkpoint(&checkpoint));
    }

    #[test]
    fn only_the_largest_holder_signing_is_rejected() {
        let checkpoint_hash = Digest32::keccak(b"checkpoint");
        let k1 = signer();
        let checkpoint = Checkpoint {
            checkpoint_hash,
            sequence: 1,
            signatures: vec![
                sig_for(&k1, 4, checkpoint_hash.as_bytes()),
                unsigned(3),
                unsigned(3),
            ],
        };
        let mut verifier = Verifier::new();
        assert!(!verifier.verify_checkpoint(&checkpoint));
    }

    #[test]
    fn flipping_a_verified_signature_bit_flips_the_result_on_re_evaluation() {
        let checkpoint_hash = Digest32::keccak(b"checkpoint");
        let k1 = signer();
        let k2 = signer();
        let mut checkpoint = Checkpoint {
            checkpoint_hash,
            sequence: 1,
            signatures: vec![
                sig_for(&k1, 4, checkpoint_hash.as_bytes()),
                sig_for(&k2, 3, checkpoint_hash.as_bytes()),
                unsigned(3),
            ],
        };
        let mut verifier = Verifier::new();
        assert!(verifier.verify_checkpoint(&checkpoint));

        checkpoint.signatures[0].ed25519_sig[0] ^= 0xFF;
        assert!(!verifier.verify_checkpoint(&checkpoint));
    }

    #[test]
    fn transaction_inclusion_requires_checkpoint_verified_first() {
        let checkpoint_hash = Digest32::keccak(b"checkpoint");
        let leaf = Digest32::keccak(b"tx-1");
        let sibling = Digest32::keccak(b"tx-2");
        let root = if leaf.as_bytes() <= sibling.as_bytes() {
            Digest32::keccak_pair(&leaf, &sibling)
        } else {
            Digest32::keccak_pair(&sibling, &leaf)
        };

        let proof = TxProof {
            tx_hash: leaf,
            checkpoint_hash: root,
            merkle_path: vec![sibling],
            sequence: 1,
        };

        let mut verifier = Verifier::new();
        let err = verifier.verify_transaction(&proof).unwrap_err();
        assert_eq!(
            err,
            SwapError::CheckpointNotVerified {
                checkpoint_hash: root
            }
        );

        let k1 = signer();
        let checkpoint = Checkpoint {
            checkpoint_hash: root,
            sequence: 1,
            signatures: vec![sig_for(&k1, 10, root.as_bytes())],
        };
        verifier.verify_checkpoint(&checkpoint);
        assert!(verifier.verify_transaction(&proof).unwrap());
    }
}
