use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

use crate::error::SwapError;

/// A 32-byte Keccak-256 digest. Used uniformly for `order_hash`, `hash_lock`,
/// `secret`, `escrow_id` and `foreign_order_hash` — the core never mixes hash
/// functions (spec §6: "single canonical hash = Keccak-256").
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, serde::Serialize, serde::Deserialize)]
pub struct Digest32(#[serde(with = "hex_bytes")] pub [u8; 32]);

impl Digest32 {
    pub const ZERO: Digest32 = Digest32([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Digest32(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Keccak-256 of arbitrary preimage bytes. Used both for
    /// `compute_hash_lock` (§4.1) and for the leaves of the order's
    /// partial-fill Merkle tree (§4.6).
    pub fn keccak(data: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        let out = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Digest32(bytes)
    }

    /// Keccak-256 of the concatenation of two digests, used by both Merkle
    /// schemes in the system (order-book's index-bit walk and
    /// foreign-verifier's sorted-pair walk); each caller decides the order
    /// of concatenation.
    pub fn keccak_pair(a: &Digest32, b: &Digest32) -> Self {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&a.0);
        buf[32..].copy_from_slice(&b.0);
        Digest32::keccak(&buf)
    }
}

impl fmt::Debug for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Digest32 {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| SwapError::InvalidDigestEncoding)?;
        if bytes.len() != 32 {
            return Err(SwapError::InvalidDigestEncoding);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Digest32(out))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_matches_known_vector() {
        // keccak256("") = c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470
        let got = Digest32::keccak(b"");
        assert_eq!(
            format!("{}", got),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn round_trips_through_display_and_from_str() {
        let d = Digest32::keccak(b"working_real_1754151588608");
        let s = format!("{d}");
        let parsed: Digest32 = s.parse().unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn zero_is_zero() {
        assert!(Digest32::ZERO.is_zero());
        assert!(!Digest32::keccak(b"x").is_zero());
    }
}
