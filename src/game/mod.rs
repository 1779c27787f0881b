//! Arena core: connection bookkeeping, pairing and round synchronization.
//!
//! Plain synchronous data structures with no I/O. The actor layer in
//! `crate::server` owns a single `ArenaState` and feeds it transport events.

pub mod types;
pub mod error;
pub mod registry;
pub mod pairs;
pub mod matchmaker;
pub mod round;
pub mod state;
