//! Capability seams consumed by the deepstore Document Adapter.
//!
//! The adapter never touches a storage medium directly. It talks to two
//! interfaces defined here:
//!
//! - [`KeyStore`] — a flat, possibly-asynchronous string key-value store
//!   (disk, browser storage, a remote KV service). `clear` is an optional
//!   capability with a default body that reports it as unsupported.
//! - [`Encoder`] — an optional symmetric string transform (encryption,
//!   compression) applied to every stored value.
//!
//! # Modules
//!
//! - [`error`] — [`KvError`] and the [`KvResult`] alias
//! - [`traits`] — the [`KeyStore`] and [`Encoder`] capability traits
//! - [`memory`] — [`InMemoryKeyStore`] for tests and embedding
//! - [`encoders`] — shipped encoder implementations

pub mod encoders;
pub mod error;
pub mod memory;
pub mod traits;

pub use encoders::Base64Encoder;
pub use error::{KvError, KvResult};
pub use memory::InMemoryKeyStore;
pub use traits::{Encoder, KeyStore};
