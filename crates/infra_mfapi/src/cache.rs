//! In-memory TTL cache
//!
//! Entries carry their own expiry instant. Expired entries are never served;
//! they are dropped on read or by [`spawn_expiry_sweeper`], which purges the
//! whole cache on a fixed period.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::debug;

use core_kernel::TtlCache;

/// Default time-to-live of a cached entry (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

/// Default period between expiry sweeps (1 hour)
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(3_600);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe key-value cache with per-entry expiry
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use core_kernel::TtlCache;
/// use infra_mfapi::MemoryTtlCache;
///
/// let cache = MemoryTtlCache::new(Duration::from_secs(60));
/// cache.set("scheme_119551", 42u32);
/// assert_eq!(cache.get("scheme_119551"), Some(42));
/// ```
#[derive(Debug)]
pub struct MemoryTtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    default_ttl: Duration,
}

impl<V> MemoryTtlCache<V> {
    /// Creates an empty cache whose entries live for `default_ttl` unless set otherwise
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // A panic while holding the lock cannot leave the map half-updated, so
    // poisoned guards are used as-is.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Default for MemoryTtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V> TtlCache<V> for MemoryTtlCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless another writer refreshed it meanwhile
        let mut entries = self.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now + DEFAULT_TTL);
        self.write().insert(key.to_string(), Entry { value, expires_at });
    }

    fn remove(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

/// Spawns a task that purges expired entries every `period`
///
/// The first sweep happens one full period after spawning. Abort the
/// returned handle to stop sweeping.
pub fn spawn_expiry_sweeper<V, C>(cache: Arc<C>, period: Duration) -> JoinHandle<()>
where
    C: TtlCache<V> + ?Sized + 'static,
    V: 'static,
{
    let period = period.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                debug!(purged, remaining = cache.len(), "Purged expired cache entries");
            }
        }
    })
}
