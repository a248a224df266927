//! Shared primitives for the cross-chain atomic-swap engine.
//!
//! Every other crate in this workspace depends on `swap-types` for its
//! digest/address/balance vocabulary, its wire event types, and the single
//! closed `SwapError` set (spec §7).

pub mod address;
pub mod balance;
pub mod digest;
pub mod error;
pub mod events;

pub use address::Address;
pub use balance::{Balance, Native, Principal};
pub use digest::Digest32;
pub use error::{Result, SwapError};
pub use events::SwapEvent;
