use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};
use serde::{Deserialize, Serialize};

use swap_types::Digest32;

/// One validator's attestation over a checkpoint hash (spec §3). Mirrors
/// `ligerito-beefy::Validator` but with an Ed25519 key/signature pair
/// instead of BLS, per spec §3's "Ed25519 validator signatures".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorSignature {
    pub ed25519_sig: [u8; 64],
    pub public_key: [u8; 32],
    pub stake_weight: u64,
}

impl ValidatorSignature {
    /// Does this signature verify over `message` under its claimed key?
    /// Malformed key/signature bytes verify as `false` rather than
    /// propagating a decode error — an attacker-supplied bad encoding is
    /// exactly as disqualifying as a bad signature.
    pub fn verifies(&self, message: &[u8]) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.public_key) else {
            return false;
        };
        let sig = Signature::from_bytes(&self.ed25519_sig);
        key.verify(message, &sig).is_ok()
    }
}

/// A BFT-signed commitment to a set of Chain-S transactions (spec §3).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    pub checkpoint_hash: Digest32,
    pub sequence: u64,
    pub signatures: Vec<ValidatorSignature>,
}

impl Checkpoint {
    pub fn total_stake(&self) -> u128 {
        self.signatures.iter().map(|s| s.stake_weight as u128).sum()
    }

    /// Sum of stake belonging to signatures that actually verify over
    /// `checkpoint_hash` (spec §4.5).
    pub fn signed_stake(&self) -> u128 {
        self.signatures
            .iter()
            .filter(|s| s.verifies(self.checkpoint_hash.as_bytes()))
            .map(|s| s.stake_weight as u128)
            .sum()
    }

    /// Strictly at least two-thirds of presented stake, in basis points
    /// (spec §3, §4.5, P7).
    pub fn has_supermajority(&self) -> bool {
        self.signed_stake() * 10_000 >= self.total_stake() * 6_667
    }
}

/// A single transaction's claimed inclusion in a checkpoint (spec §3).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TxProof {
    pub tx_hash: Digest32,
    pub checkpoint_hash: Digest32,
    pub merkle_path: Vec<Digest32>,
    pub sequence: u64,
}
