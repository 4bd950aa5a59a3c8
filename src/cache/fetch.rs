//! Cache-Wrapping Fetcher
//!
//! Memoizes an asynchronous fetch function behind a shared memory cache
//! without changing how callers invoke it.

use std::time::Duration;

use futures::future::BoxFuture;

use crate::cache::SharedCache;

type KeyFn<A> = Box<dyn Fn(&A) -> String + Send + Sync>;
type FetchFn<A, T, E> = Box<dyn Fn(A) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

// == Cached Fetcher ==
/// Wraps an async fetch function so repeated calls with equal arguments hit
/// the memory cache before invoking the underlying function.
///
/// Failures propagate to the caller unchanged and are never cached, so the
/// next call retries unconditionally. Two concurrent calls that both miss
/// will both invoke the underlying function; in-flight requests are not
/// coalesced.
pub struct CachedFetcher<A, T, E> {
    cache: SharedCache<T>,
    key_fn: KeyFn<A>,
    fetch_fn: FetchFn<A, T, E>,
    ttl: Option<Duration>,
}

impl<A, T: Clone, E> CachedFetcher<A, T, E> {
    // == Constructor ==
    /// Builds a cached wrapper around `fetch_fn`.
    ///
    /// # Arguments
    /// * `cache` - Shared memory cache for this role
    /// * `key_fn` - Derives the cache key from the call arguments
    /// * `fetch_fn` - The underlying asynchronous fetch
    /// * `ttl` - Entry TTL; the cache's default TTL when `None`
    pub fn new(
        cache: SharedCache<T>,
        key_fn: impl Fn(&A) -> String + Send + Sync + 'static,
        fetch_fn: impl Fn(A) -> BoxFuture<'static, Result<T, E>> + Send + Sync + 'static,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            cache,
            key_fn: Box::new(key_fn),
            fetch_fn: Box::new(fetch_fn),
            ttl,
        }
    }

    // == Call ==
    /// Invokes the wrapped function through the cache.
    pub async fn call(&self, args: A) -> Result<T, E> {
        let key = (self.key_fn)(&args);

        // Write lock: a hit on an expired entry prunes it in place
        if let Some(hit) = self.cache.write().await.get(&key) {
            return Ok(hit);
        }

        let value = (self.fetch_fn)(args).await?;
        self.cache.write().await.set(key, value.clone(), self.ttl);

        Ok(value)
    }
}
