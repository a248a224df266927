//! Cross-chain secret-relay coordinator (spec §4.4): the hardest
//! subsystem, living symmetrically on both chains.

pub mod coordinator;
pub mod entry;
pub mod local;

pub use coordinator::{Coordinator, COORDINATION_TIMEOUT};
pub use entry::{BidirectionalMap, CoordinatorEntry, StatusTag};
pub use local::{LocalEscrowData, LocalSwapRegistry};
