//! Key→value cache for verification payloads.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Namespace prefixed to every cache key.
pub const CACHE_NAMESPACE: &str = "vat-checker";

/// Cache key for a normalized identifier: `vat-checker:<normalized>`.
pub fn cache_key(normalized: &str) -> String {
    format!("{CACHE_NAMESPACE}:{normalized}")
}

/// One stored payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Namespaced key.
    pub key: String,
    /// Flattened verification payload.
    pub payload: Map<String, Value>,
    /// When the entry was written.
    pub written_at: DateTime<Utc>,
    /// Lifetime in seconds; `0` never expires.
    pub ttl_seconds: u64,
}

impl CacheEntry {
    /// Whether the entry has outlived its TTL at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.ttl_seconds == 0 {
            return false;
        }
        let expiry = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.written_at.checked_add_signed(ttl));
        expiry.is_some_and(|expiry| now >= expiry)
    }
}

/// Cache store collaborator.
///
/// Shared across concurrent calls. Races are tolerated: a duplicate
/// write for the same key is last-write-wins.
pub trait CacheStore: Send + Sync {
    /// The live entry under `key`, if any.
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Store `payload` for `ttl_seconds` (`0` keeps it forever).
    fn put(&self, key: &str, payload: Map<String, Value>, ttl_seconds: u64);

    /// Store `payload` with no expiry.
    fn put_forever(&self, key: &str, payload: Map<String, Value>) {
        self.put(key, payload, 0);
    }

    /// Whether a live entry exists under `key`.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-process cache. Expired entries are dropped when next read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared entry as-is (keeps its `written_at`).
    pub fn insert_entry(&self, entry: CacheEntry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = Utc::now();
        self.entries.remove_if(key, |_, entry| entry.is_expired_at(now));
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: &str, payload: Map<String, Value>, ttl_seconds: u64) {
        self.insert_entry(CacheEntry {
            key: key.to_string(),
            payload,
            written_at: Utc::now(),
            ttl_seconds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("valid".into(), json!(true));
        m
    }

    #[test]
    fn key_is_namespaced() {
        assert_eq!(cache_key("IT00743110157"), "vat-checker:IT00743110157");
    }

    #[test]
    fn put_then_get() {
        let cache = MemoryCache::new();
        assert!(!cache.has("k"));
        cache.put("k", payload(), 60);
        let entry = cache.get("k").unwrap();
        assert_eq!(entry.key, "k");
        assert_eq!(entry.ttl_seconds, 60);
        assert_eq!(entry.payload["valid"], json!(true));
        assert!(cache.has("k"));
    }

    #[test]
    fn put_forever_has_zero_ttl() {
        let cache = MemoryCache::new();
        cache.put_forever("k", payload());
        assert_eq!(cache.get("k").unwrap().ttl_seconds, 0);
    }

    #[test]
    fn last_write_wins() {
        let cache = MemoryCache::new();
        cache.put("k", payload(), 60);
        let mut newer = payload();
        newer.insert("name".into(), json!("Acme"));
        cache.put("k", newer, 60);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().payload["name"], json!("Acme"));
    }

    #[test]
    fn expiry() {
        let written = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let entry = CacheEntry {
            key: "k".into(),
            payload: payload(),
            written_at: written,
            ttl_seconds: 60,
        };
        assert!(!entry.is_expired_at(written + TimeDelta::seconds(59)));
        assert!(entry.is_expired_at(written + TimeDelta::seconds(60)));

        let forever = CacheEntry {
            ttl_seconds: 0,
            ..entry
        };
        assert!(!forever.is_expired_at(written + TimeDelta::days(10_000)));
    }

    #[test]
    fn expired_entries_are_dropped_on_read() {
        let cache = MemoryCache::new();
        cache.insert_entry(CacheEntry {
            key: "old".into(),
            payload: payload(),
            written_at: Utc::now() - TimeDelta::hours(2),
            ttl_seconds: 3600,
        });
        assert_eq!(cache.len(), 1);
        assert!(cache.get("old").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn huge_ttl_never_expires() {
        let entry = CacheEntry {
            key: "k".into(),
            payload: payload(),
            written_at: Utc::now(),
            ttl_seconds: u64::MAX,
        };
        assert!(!entry.is_expired_at(Utc::now()));
    }
}
