//! Cache Entry Module
//!
//! Defines the envelope for individual cache entries with TTL bookkeeping.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached value with creation and expiration timestamps.
///
/// Entries are owned by the cache tier that created them; the durable tier
/// stores a serialized copy rather than sharing this struct.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl.as_millis() as u64,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is still valid at exactly `expires_at`;
    /// it becomes expired once the current time passes it.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() > self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at > entry.created_at);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(42u32, Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "test",
            created_at: now.saturating_sub(1000),
            expires_at: now.saturating_sub(1),
        };

        assert!(entry.is_expired(), "Entry past its deadline should be expired");

        let entry = CacheEntry {
            value: "test",
            created_at: now,
            expires_at: now + 60_000,
        };

        assert!(!entry.is_expired(), "Entry within its deadline should be valid");
    }
}
