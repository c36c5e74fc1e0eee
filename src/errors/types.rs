use thiserror::Error;

use crate::search::enumeration::EnumerationError;

#[derive(Debug, Error)]
pub enum HoundError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ERROR: Bad date range!")]
    InvalidDateRange,

    #[error("Unknown filter index: {0}")]
    UnknownFilterIndex(#[source] EnumerationError),

    #[error("Stale filter enumeration: {0}")]
    StaleEnumeration(#[source] EnumerationError),

    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("ERROR: The suggestion you want to delete does not exist!")]
    SuggestionNotFound(i64),

    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database busy: {0}")]
    StoreBusy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EnumerationError> for HoundError {
    fn from(err: EnumerationError) -> Self {
        match err {
            EnumerationError::StaleVersion { .. } => HoundError::StaleEnumeration(err),
            EnumerationError::IndexOutOfRange { .. } => HoundError::UnknownFilterIndex(err),
        }
    }
}

impl HoundError {
    /// Map a rusqlite failure, keeping lock contention distinguishable so it can be retried.
    pub fn from_sqlite(context: &str, err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                HoundError::StoreBusy(format!("{}: {}", context, err))
            }
            _ => HoundError::Database(format!("{}: {}", context, err)),
        }
    }
}
