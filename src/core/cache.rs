//! In-memory TTL cache for latest-rate snapshots.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::core::{Currency, RateSnapshot};

/// Default time-to-live for a cached snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct CacheEntry {
    snapshot: RateSnapshot,
    expires_at: Instant,
}

/// A concurrency-safe store of [`RateSnapshot`]s keyed by base currency.
///
/// Entries expire lazily: an expired entry is simply treated as absent on
/// read, and the next successful fetch overwrites it. There is no background
/// sweep and no explicit removal.
#[derive(Debug)]
pub struct RateCache {
    map: RwLock<HashMap<Currency, CacheEntry>>,
    ttl: Duration,
}

impl RateCache {
    /// Create a cache whose entries live for `ttl` after insertion.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// The snapshot for `base`, if present and not yet expired.
    pub async fn get(&self, base: &Currency) -> Option<RateSnapshot> {
        let guard = self.map.read().await;
        if let Some(entry) = guard.get(base)
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.snapshot.clone());
        }
        None
    }

    /// Store a snapshot under the base currency it was requested for,
    /// overwriting any existing entry and restarting the TTL clock. Last
    /// write wins under concurrency.
    pub async fn insert(&self, base: Currency, snapshot: RateSnapshot) {
        let entry = CacheEntry {
            expires_at: Instant::now() + self.ttl,
            snapshot,
        };
        let mut guard = self.map.write().await;
        guard.insert(base, entry);
    }

    /// The configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
