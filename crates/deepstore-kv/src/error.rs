use thiserror::Error;

/// Errors from key-value store and encoder capabilities.
#[derive(Debug, Error)]
pub enum KvError {
    /// The backend does not expose this optional capability.
    #[error("operation not supported by this store: {0}")]
    Unsupported(&'static str),

    /// Failure reported by the underlying backend.
    #[error("backend error: {0}")]
    Backend(String),

    /// An encoder transform failed (e.g. undecodable ciphertext).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for key-value operations.
pub type KvResult<T> = Result<T, KvError>;
