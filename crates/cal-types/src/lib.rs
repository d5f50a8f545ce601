//! Foundation types for the complex asset ledger.
//!
//! Every other `cal-*` crate depends on `cal-types`. The crate holds the
//! identity and record shapes that are stored per key in the external state
//! store; it does not know how they are encoded or where they live.
//!
//! # Key Types
//!
//! - [`AssetId`]: the store key of an asset, immutable once created
//! - [`Asset`]: a simple part: manufacturer and part number
//! - [`ComplexAsset`]: a part that lists other parts as components
//! - [`ComponentRecords`]: component records keyed by id, in listing order

pub mod asset;
pub mod components;
pub mod error;
pub mod identity;

pub use asset::{Asset, ComplexAsset, RecordKind};
pub use components::ComponentRecords;
pub use error::TypeError;
pub use identity::AssetId;
