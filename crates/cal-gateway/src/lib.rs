//! Invocation entry points for the complex asset contract.
//!
//! External callers reach the contract through two capability sets:
//!
//! - [`TransactionEvaluator`]: read-only queries, never written to the ledger
//! - [`TransactionSubmitter`]: mutating transactions
//!
//! Both take a transaction name plus string arguments and return the
//! result as JSON bytes. [`Gateway`] implements both on top of an injected
//! [`StateStore`](cal_store::StateStore) handle.

pub mod error;
pub mod gateway;
pub mod transaction;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{Gateway, TransactionEvaluator, TransactionSubmitter};
pub use transaction::{names, Transaction};
