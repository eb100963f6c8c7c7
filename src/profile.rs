//! src/profile.rs
//!
//! Profile lookups: address parsing, record resolution, and a cached service
//! shared by every thread that needs profile names.

pub mod address;
pub mod data;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::cache::FetchCache;
use crate::clock::{Clock, SystemClock};

pub use address::Address;
pub use data::{ProfileData, ProfileRecord, resolve_image_url};
pub use source::{DirectorySource, NoSource, ProfileSource};

pub const DEFAULT_IPFS_GATEWAY: &str = "https://api.universalprofile.cloud/ipfs/";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid address {0}")]
    InvalidAddress(String),

    #[error("no profile record for {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed profile record: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct ProfileService<C: Clock = SystemClock> {
    source: Arc<dyn ProfileSource>,
    cache: FetchCache<Address, ProfileData, C>,
    gateway: String,
}

impl<C: Clock> ProfileService<C> {
    pub fn new(source: Arc<dyn ProfileSource>, clock: C, ttl: Duration, gateway: &str) -> Self {
        Self {
            source,
            cache: FetchCache::new(clock, ttl),
            gateway: gateway.to_string(),
        }
    }

    /// Resolve a profile, going to the source only when the cache has nothing
    /// fresh. `None` means `address` is not a valid address. A failed lookup
    /// yields the error placeholder until it expires.
    pub fn profile(&self, address: &str) -> Option<ProfileData> {
        let address: Address = address.parse().ok()?;
        let resolved = self.cache.get_or_fetch(&address, |a| {
            self.source
                .fetch(a)
                .map(|record| ProfileData::resolve(a, &record, &self.gateway))
        });
        Some(match resolved {
            Ok(data) => data,
            Err(e) => {
                warn!(address = %address, error = %e, "profile lookup failed");
                ProfileData::failed(&address)
            }
        })
    }

    /// Fresh, successfully resolved profile only. Never touches the source.
    pub fn cached(&self, address: &str) -> Option<ProfileData> {
        let address: Address = address.parse().ok()?;
        self.cache.get(&address)
    }

    /// Forget whatever is cached for `address`. False if it is not an address.
    pub fn invalidate(&self, address: &str) -> bool {
        match address.parse::<Address>() {
            Ok(address) => {
                self.cache.invalidate(&address);
                true
            }
            Err(_) => false,
        }
    }

    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::DEFAULT_TTL;
    use crate::clock::ManualClock;

    const ADDR: &str = "0xAbCdEf0123456789abcdef0123456789abcdef01";

    struct Counting {
        inner: DirectorySource,
        calls: AtomicUsize,
    }

    impl ProfileSource for Counting {
        fn fetch(&self, address: &Address) -> Result<ProfileRecord, ProfileError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(address)
        }
    }

    #[test]
    fn resolves_from_directory_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path()
                .join("0xabcdef0123456789abcdef0123456789abcdef01.json"),
            r#"{"name":"Ada","profileImage":[{"url":"ipfs://QmA"}]}"#,
        )
        .unwrap();
        let source = Arc::new(Counting {
            inner: DirectorySource::new(dir.path()),
            calls: AtomicUsize::new(0),
        });
        let clock = ManualClock::new();
        let svc = ProfileService::new(source.clone(), clock.clone(), DEFAULT_TTL, "https://gw");

        assert_eq!(svc.cached(ADDR), None);
        let p = svc.profile(ADDR).unwrap();
        assert_eq!(p.name, "Ada");
        assert_eq!(p.profile_image.as_deref(), Some("https://gw/QmA"));
        assert_eq!(svc.profile(&ADDR.to_lowercase()).unwrap(), p);
        assert_eq!(svc.cached(ADDR), Some(p));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        assert!(svc.invalidate(ADDR));
        assert_eq!(svc.cached(ADDR), None);
        svc.profile(ADDR).unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(!svc.invalidate("0x12"));

        clock.advance(DEFAULT_TTL);
        assert_eq!(svc.cached(ADDR), None);
    }

    #[test]
    fn missing_record_yields_cached_error_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let svc = ProfileService::new(
            Arc::new(DirectorySource::new(dir.path())),
            ManualClock::new(),
            DEFAULT_TTL,
            DEFAULT_IPFS_GATEWAY,
        );
        let p = svc.profile(ADDR).unwrap();
        assert!(p.failed);
        assert_eq!(p.name, "Error (0xabcd)");
        assert_eq!(svc.cached(ADDR), None);
        assert!(svc.profile("not-an-address").is_none());
    }
}
