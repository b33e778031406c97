use thiserror::Error;

use deepstore_kv::KvError;

/// Errors from Document Adapter operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The delimiter given at construction was empty.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    /// The logical key was empty. No I/O is performed in this case.
    #[error("invalid key: must be a non-empty string")]
    InvalidKey,

    /// The reassembled flattened value was not stored under the expected
    /// root key. The underlying store was mutated out-of-band or written
    /// by an incompatible implementation.
    #[error("unexpected data in key store: expected root key {expected:?}, but got {found:?}")]
    RootMismatch { expected: String, found: String },

    /// The flat-key index for a logical key is not valid JSON.
    #[error("corrupt flat-key index for {key:?}: {source}")]
    IndexCorrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failure propagated from the key store or encoder capability.
    #[error(transparent)]
    Kv(#[from] KvError),
}

/// Result alias for Document Adapter operations.
pub type StoreResult<T> = Result<T, StoreError>;
