// Error types for definition store operations

use thiserror::Error;

/// Errors surfaced by definition store operations
///
/// Not-found is not represented here; absence is an ordinary `Option::None`
/// result on `get` and a no-op on `delete`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The definition id cannot be used as a storage key
    #[error("invalid definition id: {reason}")]
    InvalidId { reason: String },

    /// Underlying filesystem failure
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document failed to encode or decode
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an invalid-id error
    pub fn invalid_id(reason: impl Into<String>) -> Self {
        StorageError::InvalidId {
            reason: reason.into(),
        }
    }
}
