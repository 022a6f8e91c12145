//! Store error types for the list persistence boundary.
//!
//! All variants are surfaced to callers as storage failures and are never
//! retried by the core; a failed write leaves the previously persisted
//! state untouched because saves are whole-aggregate upserts.

use thiserror::Error;

/// Errors that can occur in a [`ListStore`](crate::store::ListStore)
/// implementation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot serialization failed.
    #[error("Snapshot serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot deserialization failed.
    #[error("Snapshot deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error while reading or writing a snapshot.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Implementation-specific backend failure.
    #[error("Store backend failure: {reason}")]
    Backend {
        /// Description of the backend failure
        reason: String,
    },
}

impl StoreError {
    /// Check if this error is related to serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }

    /// Check if this error is related to file I/O.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::FileIo { .. })
    }

    /// Check if this error is implementation-specific.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, StoreError::Backend { .. })
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
