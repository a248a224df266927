use std::fmt;

/// A ledger-native account identifier. Chain-E (EVM-family) addresses are 20
/// bytes; Chain-S (object-model) addresses are 32 bytes. The core never
/// interprets the bytes beyond equality and the explicit mapping functions
/// in `foreign-verifier` (spec §4.5) — it treats them as opaque identifiers
/// from their own ledger, per spec §3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// 20-byte EVM-style address (Chain-E).
    Evm([u8; 20]),
    /// 32-byte object-model address (Chain-S).
    Object([u8; 32]),
}

impl Address {
    pub fn evm(bytes: [u8; 20]) -> Self {
        Address::Evm(bytes)
    }

    pub fn object(bytes: [u8; 32]) -> Self {
        Address::Object(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Evm(b) => b,
            Address::Object(b) => b,
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Evm(b) => write!(f, "evm:0x{}", hex::encode(b)),
            Address::Object(b) => write!(f, "obj:0x{}", hex::encode(b)),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evm_and_object_addresses_are_distinguishable_even_with_same_bytes() {
        let evm = Address::Evm([1u8; 20]);
        let obj = Address::Object([1u8; 32]);
        assert_ne!(evm, obj.clone()); // different variant, always unequal
        assert_eq!(obj.as_bytes().len(), 32);
        assert_eq!(evm.as_bytes().len(), 20);
    }
}
