//! Chain-S proof verifier (spec §4.5): checkpoint stake-weighted signature
//! verification, Merkle transaction inclusion, and deterministic address
//! mapping between the two ledgers.

pub mod address;
pub mod types;
pub mod verifier;

pub use address::{foreign_to_local_addr, local_to_foreign_addr};
pub use types::{Checkpoint, TxProof, ValidatorSignature};
pub use verifier::{verify_sorted_pair_merkle, Verifier};
