//! Bounded in-memory cache for transcoded images
//!
//! Keyed by (source url, target format), bounded by total byte size with
//! least-recently-used eviction. Injected through `AppState`; there are
//! no module-level globals.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    url: String,
    format: String,
}

struct Entry {
    bytes: Arc<Vec<u8>>,
    /// Monotonic touch counter; smallest = least recently used
    last_used: u64,
}

struct Inner {
    entries: HashMap<CacheKey, Entry>,
    total_bytes: usize,
    clock: u64,
}

/// LRU byte-bounded cache
pub struct ImageCache {
    max_bytes: usize,
    inner: Mutex<Inner>,
}

impl ImageCache {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                total_bytes: 0,
                clock: 0,
            }),
        }
    }

    pub fn get(&self, url: &str, format: &str) -> Option<Arc<Vec<u8>>> {
        let key = CacheKey {
            url: url.to_string(),
            format: format.to_string(),
        };
        let mut inner = self.inner.lock();
        inner.clock += 1;
        let clock = inner.clock;
        inner.entries.get_mut(&key).map(|entry| {
            entry.last_used = clock;
            entry.bytes.clone()
        })
    }

    /// Insert a transcoded payload, evicting least-recently-used entries
    /// until the budget holds. A payload larger than the whole budget is
    /// served but never cached.
    pub fn insert(&self, url: &str, format: &str, bytes: Vec<u8>) {
        if bytes.len() > self.max_bytes {
            return;
        }

        let key = CacheKey {
            url: url.to_string(),
            format: format.to_string(),
        };
        let mut inner = self.inner.lock();
        inner.clock += 1;
        let clock = inner.clock;

        if let Some(old) = inner.entries.remove(&key) {
            inner.total_bytes -= old.bytes.len();
        }

        while inner.total_bytes + bytes.len() > self.max_bytes {
            let Some(lru_key) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            if let Some(evicted) = inner.entries.remove(&lru_key) {
                inner.total_bytes -= evicted.bytes.len();
            }
        }

        inner.total_bytes += bytes.len();
        inner.entries.insert(
            key,
            Entry {
                bytes: Arc::new(bytes),
                last_used: clock,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_after_insert() {
        let cache = ImageCache::new(1024);
        cache.insert("http://a/img.png", "webp", vec![1, 2, 3]);
        let hit = cache.get("http://a/img.png", "webp").unwrap();
        assert_eq!(*hit, vec![1, 2, 3]);
        assert!(cache.get("http://a/img.png", "jpeg").is_none());
    }

    #[test]
    fn evicts_least_recently_used_first() {
        let cache = ImageCache::new(10);
        cache.insert("a", "webp", vec![0; 4]);
        cache.insert("b", "webp", vec![0; 4]);
        // Touch "a" so that "b" is the LRU entry
        cache.get("a", "webp");
        cache.insert("c", "webp", vec![0; 4]);

        assert!(cache.get("a", "webp").is_some());
        assert!(cache.get("b", "webp").is_none());
        assert!(cache.get("c", "webp").is_some());
    }

    #[test]
    fn oversized_payload_is_not_cached() {
        let cache = ImageCache::new(8);
        cache.insert("big", "jpeg", vec![0; 64]);
        assert_eq!(cache.len(), 0);
        assert!(cache.get("big", "jpeg").is_none());
    }

    #[test]
    fn total_stays_within_budget() {
        let cache = ImageCache::new(12);
        for i in 0..10 {
            cache.insert(&format!("url-{i}"), "png", vec![0; 4]);
        }
        assert!(cache.len() <= 3);
    }
}
