use cal_codec::CodecError;
use cal_store::StoreError;
use cal_types::{AssetId, RecordKind, TypeError};

/// Errors produced by contract operations.
///
/// Every error is scoped to the single invocation that raised it. Batch
/// operations running in sequential mode may already have written earlier
/// records when they fail.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("the asset {id} already exists")]
    AlreadyExists { id: AssetId },

    #[error("the asset {id} does not exist")]
    NotFound { id: AssetId },

    #[error("the asset {id} information is incorrect: {reason}")]
    BatchFormat { id: AssetId, reason: String },

    #[error("invalid asset id: {0}")]
    InvalidId(#[from] TypeError),

    #[error("the asset {id} holds a malformed {kind} record: {reason}")]
    MalformedRecord {
        id: AssetId,
        kind: RecordKind,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ContractError {
    pub fn not_found(id: impl Into<AssetId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn already_exists(id: impl Into<AssetId>) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    /// Attach the key a codec error was raised for.
    pub fn from_codec(id: &str, err: CodecError) -> Self {
        match err {
            CodecError::MalformedRecord { kind, reason } => Self::MalformedRecord {
                id: AssetId::new(id),
                kind,
                reason,
            },
            CodecError::BatchFormat { id, reason } => Self::BatchFormat { id, reason },
            CodecError::Serialization(reason) => Self::Serialization(reason),
        }
    }

    /// Short stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "AlreadyExists",
            Self::NotFound { .. } => "NotFound",
            Self::BatchFormat { .. } => "BatchFormatError",
            Self::InvalidId(_) => "InvalidId",
            Self::MalformedRecord { .. } => "MalformedRecord",
            Self::Serialization(_) => "Serialization",
            Self::Config(_) => "Config",
            Self::Store(_) => "Store",
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
