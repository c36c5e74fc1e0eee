use super::types::HoundError;

/// Broad family an error belongs to, used by the API and CLI to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input; re-render the form with the message.
    Validation,
    NotFound,
    /// Stored state contradicts an invariant; log it and degrade.
    Inconsistency,
    /// Programming error, should never reach a user.
    Fatal,
    Infrastructure,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
    pub kind: ErrorKind,
}

impl HoundError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable, kind) = match self {
            HoundError::InvalidDateRange => ("DateRangeError", false, ErrorKind::Validation),
            HoundError::UnknownFilterIndex(_) => ("UnknownFilterIndexError", false, ErrorKind::Validation),
            HoundError::StaleEnumeration(_) => ("StaleEnumerationError", false, ErrorKind::Validation),
            HoundError::InvalidPort(_) => ("InvalidPortError", false, ErrorKind::Validation),
            HoundError::Validation(_) => ("ValidationError", false, ErrorKind::Validation),

            HoundError::RecordNotFound(_) => ("RecordNotFoundError", false, ErrorKind::NotFound),
            HoundError::SuggestionNotFound(_) => ("SuggestionNotFoundError", false, ErrorKind::NotFound),

            HoundError::DataInconsistency(_) => ("DataInconsistencyError", false, ErrorKind::Inconsistency),
            HoundError::UnknownCollection(_) => ("UnknownCollectionError", false, ErrorKind::Fatal),

            // Only lock contention is worth another attempt
            HoundError::StoreBusy(_) => ("StoreBusyError", true, ErrorKind::Infrastructure),

            HoundError::Config(_) => ("ConfigError", false, ErrorKind::Infrastructure),
            HoundError::Database(_) => ("DatabaseError", false, ErrorKind::Infrastructure),
            HoundError::Io(_) => ("IoError", false, ErrorKind::Infrastructure),
            HoundError::Json(_) => ("JsonError", false, ErrorKind::Infrastructure),
            HoundError::Yaml(_) => ("YamlError", false, ErrorKind::Infrastructure),
            HoundError::Internal(_) => ("InternalError", false, ErrorKind::Infrastructure),
        };
        ErrorClassification { error_type, retryable, kind }
    }

    pub fn is_validation(&self) -> bool {
        self.classify().kind == ErrorKind::Validation
    }
}
