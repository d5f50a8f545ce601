//! Byte and text formats for the complex asset ledger.
//!
//! - [`AssetCodec`] turns [`Asset`](cal_types::Asset) and
//!   [`ComplexAsset`](cal_types::ComplexAsset) records into the bytes stored
//!   per key, and back.
//! - [`batch`] parses the delimited text payloads clients use for bulk
//!   creation and bulk deletion. Batches are write-only input, so there is no
//!   serializer for them.

pub mod batch;
pub mod codec;
pub mod error;

pub use batch::{
    parse_component_list, parse_id_list, parse_record, parse_simple_record, record_id,
    split_id_list, split_records, BatchRecord,
};
pub use codec::AssetCodec;
pub use error::{CodecError, CodecResult};
