//! The Document Adapter.
//!
//! [`DocumentStore`] turns a flat string key-value store into a
//! pseudo-document store: structured values (objects and arrays) are
//! flattened into one entry per leaf path, scalars are stored directly,
//! and a per-key flat-key index records which flat entries belong to which
//! logical key so they can be enumerated and removed completely. The
//! adapter stores nothing itself; all state lives in the [`KeyStore`].

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::debug;

use deepstore_flatten::{deep_merge, flatten, unflatten};
use deepstore_kv::{Encoder, KeyStore};

use crate::codec::{decode_value, encode_value};
use crate::error::{StoreError, StoreResult};

/// Prefix marking a key as the root of a flattened document. Protocol
/// constant; must match across implementations.
pub const FLAT_TOKEN: &str = "__flat__";

/// Suffix of the flat-key index entry. Protocol constant.
pub const FLAT_LIST: &str = "__list__";

/// Delimiter joining path segments unless configured otherwise.
pub const DEFAULT_DELIMITER: &str = ".";

/// Construction-time configuration for [`DocumentStore`].
pub struct StoreOptions {
    /// Optional symmetric transform applied to every stored value.
    pub encoder: Option<Box<dyn Encoder>>,
    /// Delimiter for flattened key paths. Must not be empty.
    pub delimiter: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            encoder: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// Per-write options for [`DocumentStore::set_item_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SetOptions {
    /// Deep-merge the new value into an existing flattened value instead
    /// of replacing it. Has no effect when the existing value is scalar
    /// or absent.
    pub merge: bool,
}

/// Document-storage adapter over a flat [`KeyStore`].
///
/// Holds only immutable configuration; concurrent use needs no locking at
/// this layer. Two concurrent writes to the same logical key race at the
/// granularity of individual flat entries — atomicity, if required, must
/// come from the underlying store.
pub struct DocumentStore<S> {
    store: S,
    encoder: Option<Box<dyn Encoder>>,
    delimiter: String,
}

impl<S: KeyStore> DocumentStore<S> {
    /// Create an adapter with the default delimiter and no encoder.
    pub fn new(store: S) -> Self {
        Self {
            store,
            encoder: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Create an adapter with explicit options.
    ///
    /// Fails with [`StoreError::EmptyDelimiter`] if the delimiter is
    /// empty, before any operation can run.
    pub fn with_options(store: S, options: StoreOptions) -> StoreResult<Self> {
        if options.delimiter.is_empty() {
            return Err(StoreError::EmptyDelimiter);
        }
        Ok(Self {
            store,
            encoder: options.encoder,
            delimiter: options.delimiter,
        })
    }

    /// The underlying key store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The configured path delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Fetch, decode and return the value at `key`.
    ///
    /// Returns `Ok(None)` for a key that was never written (or was
    /// removed), however the underlying store signals absence.
    pub async fn get_item(&self, key: &str) -> StoreResult<Option<Value>> {
        let key = normalize_key(key)?;

        let Some(flat_keys) = self.load_index(key).await? else {
            // No index: the key holds a scalar, or nothing at all.
            return self.read_value(key).await;
        };
        if flat_keys.is_empty() {
            // An empty document leaves no flat entries; the bare index is
            // what distinguishes it from absence.
            return Ok(Some(Value::Object(Map::new())));
        }

        let values = try_join_all(flat_keys.iter().map(|k| self.read_value(k))).await?;
        let mut flat = Map::new();
        for (flat_key, value) in flat_keys.iter().zip(values) {
            // An index entry whose flat key has vanished out-of-band
            // decodes as null rather than failing the whole read.
            flat.insert(flat_key.clone(), value.unwrap_or(Value::Null));
        }

        let mut data = unflatten(&flat, &self.delimiter);
        let root_key = self.root_key(key);
        match data.remove(&root_key) {
            Some(value) => Ok(Some(value)),
            None => Err(StoreError::RootMismatch {
                expected: root_key,
                found: data.keys().next().cloned().unwrap_or_default(),
            }),
        }
    }

    /// Encode and store `value` at `key`, replacing any previous value.
    pub async fn set_item(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.set_item_with(key, value, SetOptions::default()).await
    }

    /// Encode and store `value` at `key` with explicit [`SetOptions`].
    pub async fn set_item_with(
        &self,
        key: &str,
        value: &Value,
        options: SetOptions,
    ) -> StoreResult<()> {
        let key = normalize_key(key)?;

        let mut effective = value.clone();
        if options.merge && self.load_index(key).await?.is_some() {
            // Merge only applies over an existing flattened value; over a
            // scalar or absent key it degenerates to a plain overwrite.
            if let Some(mut existing) = self.get_item(key).await? {
                deep_merge(&mut existing, effective);
                effective = existing;
            }
        }

        // Clear the previous footprint first so no stale flat entries
        // survive a type change or a shrinking structure.
        self.remove_item(key).await?;

        if !is_structured(&effective) {
            return self.write_value(key, &effective).await;
        }

        let index_key = self.index_key(key);
        if is_empty_structured(&effective) {
            // Zero flat entries; the empty index still marks the key as
            // present-and-flattened.
            debug!(key, "storing empty document");
            self.store.set(&index_key, "[]").await?;
            return Ok(());
        }

        let mut wrapped = Map::new();
        wrapped.insert(self.root_key(key), effective);
        let flat = flatten(&Value::Object(wrapped), &self.delimiter);
        let flat_keys: Vec<String> = flat.keys().cloned().collect();
        debug!(key, entries = flat_keys.len(), "storing flattened document");

        try_join_all(flat.iter().map(|(k, v)| self.write_value(k, v))).await?;
        // The index write comes last; a reader that wins the race before
        // this point may observe a partially-written document.
        let index = Value::from(flat_keys).to_string();
        self.store.set(&index_key, &index).await?;
        Ok(())
    }

    /// Remove the value at `key` along with every flat entry it owns.
    ///
    /// Removing an absent key succeeds without error.
    pub async fn remove_item(&self, key: &str) -> StoreResult<()> {
        let key = normalize_key(key)?;

        let flat_keys = self.load_index(key).await?.unwrap_or_default();
        let root_key = self.root_key(key);
        let index_key = self.index_key(key);

        let mut keys: Vec<&str> = flat_keys.iter().map(String::as_str).collect();
        keys.push(key);
        keys.push(&root_key);
        keys.push(&index_key);
        debug!(key, entries = keys.len(), "removing document");

        try_join_all(keys.into_iter().map(|k| self.store.remove(k))).await?;
        Ok(())
    }

    /// Remove every entry from the underlying store.
    ///
    /// Fails with [`deepstore_kv::KvError::Unsupported`] when the store
    /// does not expose the capability.
    pub async fn clear(&self) -> StoreResult<()> {
        self.store.clear().await?;
        Ok(())
    }

    fn root_key(&self, key: &str) -> String {
        format!("{FLAT_TOKEN}{key}")
    }

    fn index_key(&self, key: &str) -> String {
        format!("{}{FLAT_LIST}", self.root_key(key))
    }

    /// Read the flat-key index for `key`. `Ok(None)` means the key is not
    /// flattened; malformed index JSON is surfaced, not recovered.
    async fn load_index(&self, key: &str) -> StoreResult<Option<Vec<String>>> {
        let index_key = self.index_key(key);
        match self.store.get(&index_key).await? {
            None => Ok(None),
            Some(raw) => {
                let keys = serde_json::from_str(&raw).map_err(|source| {
                    StoreError::IndexCorrupt {
                        key: key.to_string(),
                        source,
                    }
                })?;
                Ok(Some(keys))
            }
        }
    }

    async fn read_value(&self, key: &str) -> StoreResult<Option<Value>> {
        match self.store.get(key).await? {
            None => Ok(None),
            Some(raw) => Ok(Some(decode_value(&raw, self.encoder.as_deref())?)),
        }
    }

    async fn write_value(&self, key: &str, value: &Value) -> StoreResult<()> {
        let data = encode_value(value, self.encoder.as_deref())?;
        self.store.set(key, &data).await?;
        Ok(())
    }
}

impl<S> std::fmt::Debug for DocumentStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("delimiter", &self.delimiter)
            .field("has_encoder", &self.encoder.is_some())
            .finish()
    }
}

fn normalize_key(key: &str) -> StoreResult<&str> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey);
    }
    Ok(key)
}

/// Single classification point for the scalar/structured split: objects
/// and arrays are flattened, everything else is stored directly.
fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn is_empty_structured(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
