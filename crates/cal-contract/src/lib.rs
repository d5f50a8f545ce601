//! Composite asset engine for the complex asset ledger.
//!
//! This crate is the heart of the ledger's asset model. It provides:
//! - [`AssetContract`]: existence checks, single and batch creation,
//!   assembly, reads, updates, retirement, and deletion of assets
//! - [`ContainmentIndex`]: reverse component index and the breadth-first
//!   search for every asset that directly or transitively contains another
//! - [`verify_chip_response`]: the challenge-response check used by
//!   asset authentication
//! - [`ContractConfig`]: strategy switches loaded from TOML
//!
//! The engine holds no state between calls. Every operation receives the
//! store handle for the current invocation and re-reads what it needs.

pub mod auth;
pub mod config;
pub mod containment;
pub mod contract;
pub mod error;

pub use auth::verify_chip_response;
pub use config::{BatchMode, ContainmentStrategy, ContractConfig};
pub use containment::{rescan_containers, ContainmentIndex};
pub use contract::AssetContract;
pub use error::{ContractError, ContractResult};
