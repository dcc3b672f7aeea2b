use thiserror::Error;

/// Failures reported by a [`crate::store::RealtimeStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store responded with HTTP {0}")]
    Http(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode store payload: {0}")]
    Decode(String),
    #[error("subscription cancelled by the store")]
    Cancelled,
    #[error("store credentials were revoked")]
    Unauthorized,
    #[error("store connection closed")]
    Closed,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

/// Failures reported by a [`crate::echo::KeyValueStorage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}
