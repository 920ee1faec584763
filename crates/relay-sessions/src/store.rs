//! Expiring key-value session store
//!
//! The contract mirrors what a hosted KV product offers: `put` with a TTL and
//! `get` that reports expired keys as absent. There is no update-in-place and
//! no compare-and-swap; "updating" a record is read-modify-write with a fresh
//! TTL, and the resulting race is accepted (last put wins).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::trace;

use relay_types::AppResult;

/// Injectable time source so tests can drive expiry with a manual clock.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Expiring key-value store contract consumed by the session manager.
///
/// Implementations must make an expired key indistinguishable from one that
/// never existed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value and resetting
    /// the expiry to `now + ttl`.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()>;

    /// Fetch the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
}

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-process store backed by a concurrent map with per-entry absolute
/// expiry. Expired entries are dropped on read and swept from the whole map
/// on every write, so abandoned sessions do not accumulate.
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
    clock: Clock,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Build a store around an explicit time source. Tests use this to
    /// advance a manual clock past entry TTLs.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Drop every expired entry.
    ///
    /// Abandoned sessions are never read again, so lazy read-side eviction
    /// alone would let the map grow with every initiated-then-dropped flow.
    /// Each write pays for a full sweep instead.
    fn sweep_expired(&self, now: DateTime<Utc>) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            trace!(removed, "swept expired session records");
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> AppResult<()> {
        let now = (self.clock)();
        self.sweep_expired(now);
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        trace!(key, %expires_at, "storing session record");
        self.entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = (self.clock)();
        // The read guard must be released before removing an expired entry,
        // or the removal would contend on the same shard.
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Manual clock shared between the test and the store under test.
    fn manual_clock(start: DateTime<Utc>) -> (Arc<Mutex<DateTime<Utc>>>, Clock) {
        let now = Arc::new(Mutex::new(start));
        let handle = now.clone();
        let clock: Clock = Arc::new(move || *handle.lock().unwrap());
        (now, clock)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        store
            .put("k", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_missing_key_is_absent() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_key_is_absent() {
        let start = Utc::now();
        let (now, clock) = manual_clock(start);
        let store = MemoryStore::with_clock(clock);

        store
            .put("k", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        // Just before expiry the record is still there
        *now.lock().unwrap() = start + chrono::Duration::seconds(599);
        assert!(store.get("k").await.unwrap().is_some());

        // At expiry it is gone, and indistinguishable from never-written
        *now.lock().unwrap() = start + chrono::Duration::seconds(600);
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_sweeps_expired_unread_entries() {
        let start = Utc::now();
        let (now, clock) = manual_clock(start);
        let store = MemoryStore::with_clock(clock);

        // A batch of sessions that are initiated and then abandoned
        for i in 0..100 {
            store
                .put(&format!("abandoned-{i}"), "v".to_string(), Duration::from_secs(600))
                .await
                .unwrap();
        }
        assert_eq!(store.entries.len(), 100);

        // Well past expiry, a write for an unrelated key drops them all
        *now.lock().unwrap() = start + chrono::Duration::seconds(6000);
        store
            .put("fresh", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(store.entries.len(), 1);
        assert!(store.get("fresh").await.unwrap().is_some());
        assert!(store.get("abandoned-0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_entries() {
        let start = Utc::now();
        let (now, clock) = manual_clock(start);
        let store = MemoryStore::with_clock(clock);

        store
            .put("short", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();
        store
            .put("long", "v".to_string(), Duration::from_secs(3600))
            .await
            .unwrap();

        // Only the short-lived entry has expired at this point
        *now.lock().unwrap() = start + chrono::Duration::seconds(1800);
        store
            .put("other", "v".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(store.entries.len(), 2);
        assert_eq!(store.get("long").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_put_resets_ttl() {
        let start = Utc::now();
        let (now, clock) = manual_clock(start);
        let store = MemoryStore::with_clock(clock);

        store
            .put("k", "v1".to_string(), Duration::from_secs(600))
            .await
            .unwrap();

        // Rewrite at t+500 with a fresh longer TTL
        *now.lock().unwrap() = start + chrono::Duration::seconds(500);
        store
            .put("k", "v2".to_string(), Duration::from_secs(3600))
            .await
            .unwrap();

        // Old TTL would have expired here; the rewrite keeps it alive
        *now.lock().unwrap() = start + chrono::Duration::seconds(700);
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }
}
