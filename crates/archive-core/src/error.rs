use thiserror::Error;

/// The closed error taxonomy shared by every layer of the search and indexing core.
///
/// Variants are grouped the way the propagation policy treats them: input errors
/// surface immediately, state errors drop the offending candidate and continue,
/// resource errors are retryable by the caller, indexing errors are logged and
/// leave `indexed = false` for the next pass to retry.
#[derive(Error, Debug)]
pub enum ArchiveError {
    // --- input errors: never fatal, always surfaced to the caller ---
    #[error("query exceeds maximum length: {length} > {max}")]
    QueryTooLong { length: usize, max: usize },

    #[error("malformed filter: {reason}")]
    MalformedFilter { reason: String },

    #[error("malformed document id: {id}")]
    MalformedId { id: String },

    // --- state errors ---
    #[error("vector index unavailable: {message}")]
    IndexUnavailable { message: String },

    #[error("article store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("index/store mismatch: vector document {doc_id} has no matching article")]
    IndexStoreMismatch { doc_id: String },

    // --- resource errors: retryable by the caller ---
    #[error("query exceeded its time budget")]
    Timeout,

    #[error("request queue is full")]
    Overloaded,

    // --- ambient wrapping of lower-level failures ---
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("io error: {message}")]
    Io { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ArchiveError {
    pub fn query_too_long(length: usize, max: usize) -> Self {
        Self::QueryTooLong { length, max }
    }

    pub fn malformed_filter(reason: impl Into<String>) -> Self {
        Self::MalformedFilter {
            reason: reason.into(),
        }
    }

    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedId { id: id.into() }
    }

    pub fn index_unavailable(message: impl Into<String>) -> Self {
        Self::IndexUnavailable {
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn index_store_mismatch(doc_id: impl Into<String>) -> Self {
        Self::IndexStoreMismatch {
            doc_id: doc_id.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for the retryable resource-exhaustion error kinds.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Overloaded)
    }
}

/// The `Result` alias used throughout the core and search crates.
pub type Result<T> = std::result::Result<T, ArchiveError>;

impl From<serde_json::Error> for ArchiveError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<String> for ArchiveError {
    fn from(error: String) -> Self {
        Self::internal(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_errors_are_retryable() {
        assert!(ArchiveError::Timeout.is_retryable());
        assert!(ArchiveError::Overloaded.is_retryable());
        assert!(!ArchiveError::query_too_long(1001, 1000).is_retryable());
    }
}
