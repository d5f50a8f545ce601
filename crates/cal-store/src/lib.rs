//! State store adapter for the complex asset ledger.
//!
//! The ledger platform owns the actual world state; the contract only ever
//! sees an ordered key-value view of it for the duration of one invocation.
//! This crate pins that view down as the [`StateStore`] trait and provides
//! an in-memory backend for tests, embedding, and the command-line driver.
//!
//! # Design Rules
//!
//! 1. Keys are UTF-8 strings ordered by their bytes; scans return ascending keys.
//! 2. Values are opaque bytes. The store never interprets them.
//! 3. An empty value is stored as-is; callers decide what "present" means.
//! 4. All I/O and lock errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStateStore;
pub use traits::{KeyValue, StateStore};
