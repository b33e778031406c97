//! Document storage over a flat string key-value store.
//!
//! deepstore lets callers store and retrieve arbitrary nested JSON values
//! under a single logical key, on top of any backend that can only hold
//! string values under string keys (disk, browser storage, a remote KV
//! service). Structured values are transparently flattened into one entry
//! per leaf path and reassembled on read; an optional encoder (encryption,
//! compression) is applied to every stored value.
//!
//! # Wire protocol
//!
//! For a logical key `k` holding a structured value:
//!
//! - each leaf lives at `__flat__k<delim><path>` (default delimiter `.`),
//! - the flat-key index at `__flat__k__list__` holds a JSON array of every
//!   flat key the document owns,
//! - non-string leaves are stored as `{"__enc": value}`.
//!
//! Scalars are stored directly under `k`. The presence of the index entry
//! is the sole signal that a key holds a flattened document.
//!
//! # Example
//!
//! ```
//! use deepstore::{DocumentStore, SetOptions};
//! use deepstore_kv::InMemoryKeyStore;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), deepstore::StoreError> {
//! let docs = DocumentStore::new(InMemoryKeyStore::new());
//! docs.set_item("profile", &json!({ "name": "ada", "age": 36 })).await?;
//! docs.set_item_with("profile", &json!({ "age": 37 }), SetOptions { merge: true }).await?;
//! assert_eq!(
//!     docs.get_item("profile").await?,
//!     Some(json!({ "name": "ada", "age": 37 }))
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`adapter`] — the [`DocumentStore`] itself and the protocol constants
//! - [`codec`] — the scalar wire representation
//! - [`error`] — [`StoreError`] and the [`StoreResult`] alias

pub mod adapter;
pub mod codec;
pub mod error;

pub use adapter::{
    DocumentStore, SetOptions, StoreOptions, DEFAULT_DELIMITER, FLAT_LIST, FLAT_TOKEN,
};
pub use codec::ENC_KEY;
pub use error::{StoreError, StoreResult};
