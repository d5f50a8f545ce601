use cal_contract::ContractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error("{name} takes {expected} arguments, got {actual}")]
    ArgumentCount {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {argument} for {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        argument: &'static str,
        reason: String,
    },

    #[error("{0} modifies state and cannot be evaluated")]
    NotReadOnly(&'static str),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl GatewayError {
    /// Short stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTransaction(_) => "UnknownTransaction",
            Self::ArgumentCount { .. } => "ArgumentCount",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::NotReadOnly(_) => "NotReadOnly",
            Self::Serialization(_) => "Serialization",
            Self::Contract(e) => e.kind(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
