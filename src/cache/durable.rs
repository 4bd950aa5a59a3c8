//! Durable Tiered Cache
//!
//! Persisted key-value cache for entries that should outlive a single
//! process, namespaced to avoid collisions with unrelated data in the same
//! storage. Expiry is checked lazily at read time; `cleanup` sweeps the
//! whole namespace.
//!
//! Every operation honors a no-throw contract toward callers: a missing,
//! expired, or corrupt entry is a miss, a failed write is logged and
//! reported through [`WriteStatus`], and when no storage backend is
//! available the whole tier degrades to a silent no-op.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::entry::current_timestamp_ms;
use crate::cache::storage::{FileStore, StorageBackend};

/// Namespace prefix for every persisted entry of this application.
pub const DURABLE_CACHE_PREFIX: &str = "eco-tracker-cache";

// == Write Status ==
/// Outcome of a durable write. Never surfaced as an error; callers that
/// care can branch on it, everyone else ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// Entry was serialized and persisted
    Written,
    /// Persistence is unavailable in this environment
    Skipped,
    /// Serialization or the storage write failed
    Failed,
}

// == Durable Entry ==
/// Canonical serialized envelope: `{ data, created_at, expires_at }` with
/// millisecond Unix timestamps.
#[derive(Debug, Serialize, Deserialize)]
struct DurableEntry<T> {
    data: T,
    created_at: u64,
    expires_at: u64,
}

// == Durable Cache ==
/// Namespaced persisted cache over an injectable [`StorageBackend`].
pub struct DurableCache {
    backend: Option<Box<dyn StorageBackend>>,
    prefix: String,
}

impl DurableCache {
    // == Constructors ==
    /// Creates a durable cache over the given backend.
    pub fn new(backend: impl StorageBackend + 'static, prefix: impl Into<String>) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            prefix: prefix.into(),
        }
    }

    /// Creates a durable cache with no backend; every operation no-ops.
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            backend: None,
            prefix: prefix.into(),
        }
    }

    /// Opens the default filesystem-backed cache, falling back to a
    /// disabled tier when no cache directory is available.
    pub fn open(prefix: impl Into<String>) -> Self {
        match FileStore::open() {
            Some(store) => Self::new(store, prefix),
            None => {
                warn!("No cache directory available, durable cache disabled");
                Self::disabled(prefix)
            }
        }
    }

    /// Whether a storage backend is attached.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}-{}", self.prefix, key)
    }

    // == Set ==
    /// Serializes `value` with its TTL bookkeeping and persists it.
    ///
    /// Failures are logged and folded into the returned [`WriteStatus`];
    /// they are never raised to the caller.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> WriteStatus {
        let Some(backend) = &self.backend else {
            return WriteStatus::Skipped;
        };

        let now = current_timestamp_ms();
        let entry = DurableEntry {
            data: value,
            created_at: now,
            expires_at: now + ttl.as_millis() as u64,
        };

        let serialized = match serde_json::to_string(&entry) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("Failed to serialize cache entry '{}': {}", key, err);
                return WriteStatus::Failed;
            }
        };

        match backend.write(&self.storage_key(key), &serialized) {
            Ok(()) => WriteStatus::Written,
            Err(err) => {
                warn!("Failed to persist cache entry '{}': {}", key, err);
                WriteStatus::Failed
            }
        }
    }

    // == Get ==
    /// Reads and deserializes the entry under `key`.
    ///
    /// Returns `None` if the entry is missing, expired (deleted as a side
    /// effect), or unparseable (treated as a miss and best-effort removed).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let backend = self.backend.as_ref()?;
        let storage_key = self.storage_key(key);
        let raw = backend.read(&storage_key)?;

        let entry: DurableEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Dropping corrupt cache entry '{}': {}", key, err);
                backend.remove(&storage_key);
                return None;
            }
        };

        if current_timestamp_ms() > entry.expires_at {
            backend.remove(&storage_key);
            return None;
        }

        Some(entry.data)
    }

    // == Delete ==
    /// Removes the namespaced entry for `key`.
    pub fn delete(&self, key: &str) {
        if let Some(backend) = &self.backend {
            backend.remove(&self.storage_key(key));
        }
    }

    // == Clear ==
    /// Removes every key in the namespace, leaving unrelated persisted data
    /// untouched.
    pub fn clear(&self) {
        let Some(backend) = &self.backend else {
            return;
        };

        for key in backend.keys() {
            if key.starts_with(&self.prefix) {
                backend.remove(&key);
            }
        }
    }

    // == Cleanup ==
    /// Sweeps the namespace, removing expired and unparseable entries.
    ///
    /// Returns how many entries were removed.
    pub fn cleanup(&self) -> usize {
        let Some(backend) = &self.backend else {
            return 0;
        };

        let now = current_timestamp_ms();
        let mut removed = 0;

        for key in backend.keys() {
            if !key.starts_with(&self.prefix) {
                continue;
            }

            let stale = match backend.read(&key) {
                Some(raw) => match serde_json::from_str::<DurableEntry<serde_json::Value>>(&raw) {
                    Ok(entry) => now > entry.expires_at,
                    // Corrupt entries are removed along with expired ones
                    Err(_) => true,
                },
                None => false,
            };

            if stale {
                backend.remove(&key);
                removed += 1;
            }
        }

        removed
    }
}
