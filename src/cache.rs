//! src/cache.rs
//!
//! Time-bounded fetch cache with request coalescing.
//!
//! Each key maps either to a finished outcome stamped with its fetch time, or
//! to an in-flight request. Callers asking for a key that is already being
//! fetched block on that request instead of starting their own, so one key
//! is fetched at most once per expiry window regardless of caller count.
//!
//! Failures are cached too and served until they expire, which keeps a
//! failing source from being hammered by every redraw.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A fetch failure, shared by every caller coalesced onto the same request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FetchError(pub String);

struct Entry<V> {
    outcome: Result<V, FetchError>,
    fetched_at: Instant,
}

struct InFlight<V> {
    result: Mutex<Option<Result<V, FetchError>>>,
    done: Condvar,
}

impl<V: Clone> InFlight<V> {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> Result<V, FetchError> {
        let mut slot = self.result.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(result) = slot.as_ref() {
                return result.clone();
            }
            slot = self.done.wait(slot).unwrap_or_else(|e| e.into_inner());
        }
    }

    fn complete(&self, result: Result<V, FetchError>) {
        let mut slot = self.result.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(result);
        self.done.notify_all();
    }
}

enum Slot<V> {
    Ready(Entry<V>),
    Pending(Arc<InFlight<V>>),
}

pub struct FetchCache<K, V, C: Clock = SystemClock> {
    clock: C,
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V, C> FetchCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    pub fn new(clock: C, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh successful value for `key`, without fetching.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        match self.lock().get(key) {
            Some(Slot::Ready(entry)) if self.is_fresh(entry, now) => entry.outcome.clone().ok(),
            _ => None,
        }
    }

    /// Fresh outcome for `key`, fetching it with `fetch` when missing or
    /// expired. Concurrent callers for the same key share one fetch.
    pub fn get_or_fetch<F, E>(&self, key: &K, fetch: F) -> Result<V, FetchError>
    where
        F: FnOnce(&K) -> Result<V, E>,
        E: Display,
    {
        let in_flight = {
            let mut slots = self.lock();
            let now = self.clock.now();
            match slots.get(key) {
                Some(Slot::Ready(entry)) if self.is_fresh(entry, now) => {
                    return entry.outcome.clone();
                }
                Some(Slot::Pending(pending)) => {
                    let pending = pending.clone();
                    drop(slots);
                    return pending.wait();
                }
                _ => {
                    let pending = Arc::new(InFlight::new());
                    slots.insert(key.clone(), Slot::Pending(pending.clone()));
                    pending
                }
            }
        };

        let mut guard = PendingGuard {
            cache: self,
            key,
            in_flight: &in_flight,
            armed: true,
        };
        let outcome = fetch(key).map_err(|e| FetchError(e.to_string()));
        guard.armed = false;

        let fetched_at = self.clock.now();
        self.lock().insert(
            key.clone(),
            Slot::Ready(Entry {
                outcome: outcome.clone(),
                fetched_at,
            }),
        );
        in_flight.complete(outcome.clone());
        outcome
    }

    /// Drop whatever is stored for `key`. In-flight requests are left alone.
    pub fn invalidate(&self, key: &K) {
        let mut slots = self.lock();
        if matches!(slots.get(key), Some(Slot::Ready(_))) {
            slots.remove(key);
        }
    }

    /// Remove expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut slots = self.lock();
        let before = slots.len();
        slots.retain(|_, slot| match slot {
            Slot::Ready(entry) => now.saturating_duration_since(entry.fetched_at) < self.ttl,
            Slot::Pending(_) => true,
        });
        let purged = before - slots.len();
        if purged > 0 {
            debug!(purged, "cache entries expired");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) < self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Releases waiters and clears the pending slot if a fetch unwinds.
struct PendingGuard<'a, K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    cache: &'a FetchCache<K, V, C>,
    key: &'a K,
    in_flight: &'a Arc<InFlight<V>>,
    armed: bool,
}

impl<K, V, C> Drop for PendingGuard<'_, K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.cache.lock().remove(self.key);
        self.in_flight
            .complete(Err(FetchError("fetch aborted".to_string())));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::clock::ManualClock;

    fn cache() -> (FetchCache<String, u32, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (FetchCache::new(clock.clone(), DEFAULT_TTL), clock)
    }

    #[test]
    fn serves_fresh_entries_without_refetch() {
        let (cache, clock) = cache();
        let calls = AtomicUsize::new(0);
        let fetch = |_: &String| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, FetchError>(7)
        };
        let key = "a".to_string();
        assert_eq!(cache.get_or_fetch(&key, fetch), Ok(7));
        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get_or_fetch(&key, fetch), Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&key), Some(7));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get(&key), None);
        assert_eq!(cache.get_or_fetch(&key, fetch), Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_are_cached_until_expiry() {
        let (cache, clock) = cache();
        let key = "bad".to_string();
        let err = cache.get_or_fetch(&key, |_| Err::<u32, _>("boom"));
        assert_eq!(err, Err(FetchError("boom".into())));

        // cached failure wins over a would-be success
        assert_eq!(
            cache.get_or_fetch(&key, |_| Ok::<_, FetchError>(1)),
            Err(FetchError("boom".into()))
        );
        assert_eq!(cache.get(&key), None);

        clock.advance(DEFAULT_TTL);
        assert_eq!(cache.get_or_fetch(&key, |_| Ok::<_, FetchError>(1)), Ok(1));
    }

    #[test]
    fn concurrent_callers_share_one_fetch() {
        let cache = Arc::new(FetchCache::<String, u32>::new(SystemClock, DEFAULT_TTL));
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Arc::new(Mutex::new(release_rx));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let calls = calls.clone();
                let release_rx = release_rx.clone();
                thread::spawn(move || {
                    cache.get_or_fetch(&"k".to_string(), |_| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let _ = release_rx.lock().unwrap().recv();
                        Ok::<_, FetchError>(42)
                    })
                })
            })
            .collect();

        release_tx.send(()).unwrap();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn purge_and_invalidate() {
        let (cache, clock) = cache();
        cache.get_or_fetch(&"x".to_string(), |_| Ok::<_, FetchError>(1)).unwrap();
        cache.get_or_fetch(&"y".to_string(), |_| Ok::<_, FetchError>(2)).unwrap();
        cache.invalidate(&"x".to_string());
        assert_eq!(cache.len(), 1);
        clock.advance(DEFAULT_TTL);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn aborted_fetch_releases_slot() {
        let (cache, _) = cache();
        let key = "p".to_string();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.get_or_fetch(&key, |_| -> Result<u32, FetchError> { panic!("source died") })
        }));
        assert!(res.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_fetch(&key, |_| Ok::<_, FetchError>(3)), Ok(3));
    }
}
