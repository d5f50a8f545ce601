use cal_types::{AssetId, RecordKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Stored bytes do not parse as the requested record shape.
    #[error("malformed {kind} record: {reason}")]
    MalformedRecord { kind: RecordKind, reason: String },

    /// A batch record does not have the expected comma-separated fields.
    #[error("the asset {id} information is incorrect: {reason}")]
    BatchFormat { id: AssetId, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
