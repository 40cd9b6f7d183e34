use crate::registry::{InfoKey, RawType, StatField};
use thiserror::Error;

/// Failure reported by a transfer-info source for one key
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfoError {
    #[error("Unsupported info key {0}")]
    UnsupportedKey(InfoKey),

    #[error("No value recorded for info key {0}")]
    Missing(InfoKey),

    #[error("Info key {key} does not hold a {expected:?} value")]
    TypeMismatch { key: InfoKey, expected: RawType },

    #[error("Transfer info query failed: {0}")]
    Backend(String),
}

/// Failure reported by a metric sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Record rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("No transfer handle available")]
    SourceUnavailable,

    #[error("Failed to query {field}: {source}")]
    Query {
        field: StatField,
        #[source]
        source: InfoError,
    },

    #[error("Failed to emit {field}: {source}")]
    Emit {
        field: StatField,
        #[source]
        source: SinkError,
    },
}

impl DispatchError {
    /// Field whose failure aborted the dispatch, if any
    pub fn field(&self) -> Option<StatField> {
        match self {
            DispatchError::SourceUnavailable => None,
            DispatchError::Query { field, .. } | DispatchError::Emit { field, .. } => Some(*field),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
