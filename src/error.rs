use thiserror::Error;

/// Synchronizer error type
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("object store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("conflicting write at {0}: version token is stale")]
    ConflictingWrite(String),

    #[error("malformed document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("account name already taken: {0}")]
    DuplicateName(String),

    #[error("credential too weak: {0}")]
    WeakCredential(String),

    #[error("credential confirmation does not match")]
    Mismatch,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// All transport-level failures collapse into `StoreUnavailable`.
///
/// This includes timeouts, where the outcome of an in-flight write is
/// unknown. The synchronizer never assumes such a write succeeded; the
/// caller decides whether a retry is safe.
impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::StoreUnavailable(err.to_string())
    }
}

/// Result type alias for synchronizer results
pub type Result<T> = std::result::Result<T, SyncError>;
