//! Cache Module
//!
//! Tiered caching layer: a bounded in-memory TTL cache per data role, a
//! namespaced durable cache persisted through an injectable storage
//! backend, a deterministic key generator, and a fetch wrapper that
//! memoizes async calls.

mod durable;
mod entry;
mod fetch;
mod key;
mod memory;
mod storage;


// Re-export public types
pub use durable::{DurableCache, WriteStatus, DURABLE_CACHE_PREFIX};
pub use entry::{current_timestamp_ms, CacheEntry};
pub use fetch::CachedFetcher;
pub use key::generate_key;
pub use memory::{CacheStats, MemoryCache};
pub use storage::{FileStore, StorageBackend};

use std::sync::Arc;
use tokio::sync::RwLock;

/// A memory cache shared across handlers and background tasks.
pub type SharedCache<T> = Arc<RwLock<MemoryCache<T>>>;

/// Wraps a memory cache for shared use.
pub fn shared<T>(cache: MemoryCache<T>) -> SharedCache<T> {
    Arc::new(RwLock::new(cache))
}
