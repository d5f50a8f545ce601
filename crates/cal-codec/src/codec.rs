use cal_types::{Asset, ComplexAsset, RecordKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CodecError, CodecResult};

/// Codec for the per-key record bytes.
///
/// Records are stored as compact JSON objects. Decoding is driven by the
/// caller's expectation of the shape; a simple asset's bytes decode as a
/// complex asset with no components, and extra fields are ignored.
pub struct AssetCodec;

impl AssetCodec {
    /// Encode any record shape.
    pub fn encode<T: Serialize>(record: &T) -> CodecResult<Vec<u8>> {
        serde_json::to_vec(record).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    pub fn decode_asset(data: &[u8]) -> CodecResult<Asset> {
        decode_as(data, RecordKind::Asset)
    }

    pub fn decode_complex(data: &[u8]) -> CodecResult<ComplexAsset> {
        decode_as(data, RecordKind::Complex)
    }
}

fn decode_as<T: DeserializeOwned>(data: &[u8], kind: RecordKind) -> CodecResult<T> {
    serde_json::from_slice(data).map_err(|e| CodecError::MalformedRecord {
        kind,
        reason: e.to_string(),
    })
}
