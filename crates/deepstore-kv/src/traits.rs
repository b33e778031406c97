use async_trait::async_trait;

use crate::error::{KvError, KvResult};

/// Flat string key-value store consumed by the Document Adapter.
///
/// All implementations must satisfy these invariants:
/// - `get` on a missing key is `Ok(None)`, never an error.
/// - `remove` on a missing key is a no-op, never an error.
/// - `set` fully replaces any previous value under the key.
/// - All I/O errors are propagated, never silently ignored. The adapter
///   adds no retry logic; retries belong to the backend.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Remove the value under `key`. Missing keys are a no-op.
    async fn remove(&self, key: &str) -> KvResult<()>;

    /// Remove every entry in the store.
    ///
    /// Optional capability. Backends opt in by overriding; the default
    /// reports the store as unable to clear.
    async fn clear(&self) -> KvResult<()> {
        Err(KvError::Unsupported("clear"))
    }
}

#[async_trait]
impl<S: KeyStore + ?Sized> KeyStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key).await
    }

    async fn clear(&self) -> KvResult<()> {
        (**self).clear().await
    }
}

/// Symmetric string transform applied to every stored value.
///
/// `decode(encode(s)) == s` must hold for every string the adapter can
/// produce. Typical implementations are encryption or compression layers.
pub trait Encoder: Send + Sync {
    fn encode(&self, value: &str) -> KvResult<String>;
    fn decode(&self, data: &str) -> KvResult<String>;
}
