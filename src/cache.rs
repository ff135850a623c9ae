use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::result::TrustError;
use crate::trust::TrustLookup;

#[derive(Debug, Clone, Copy)]
struct CachedDecision {
    allowed: bool,
    stored_at: Instant,
}

/// Time-bounded memo of trust decisions, keyed by `(host, origin_host)`.
///
/// Safe for concurrent use from many in-flight requests. Only definitive
/// booleans are stored; a failed lookup surfaces to its own request and
/// leaves the cache untouched.
#[derive(Debug)]
pub struct TrustCache {
    entries: DashMap<(String, String), CachedDecision>,
    ttl: Duration,
}

impl TrustCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached decision for `(host, origin_host)`, dropping the
    /// entry when its TTL has passed.
    pub fn get(&self, host: &str, origin_host: &str) -> Option<bool> {
        let key = (host.to_owned(), origin_host.to_owned());
        match self.entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.allowed),
            Some(entry) => {
                drop(entry);
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, host: &str, origin_host: &str, allowed: bool) {
        self.entries.insert(
            (host.to_owned(), origin_host.to_owned()),
            CachedDecision {
                allowed,
                stored_at: Instant::now(),
            },
        );
    }

    /// Resolves trust through the cache, invoking `lookup` only on a miss.
    pub async fn is_trusted(
        &self,
        scheme: &str,
        host: &str,
        origin_host: &str,
        lookup: &dyn TrustLookup,
    ) -> Result<bool, TrustError> {
        if let Some(allowed) = self.get(host, origin_host) {
            debug!(host, origin_host, allowed, "trust cache hit");
            return Ok(allowed);
        }

        let allowed = lookup.lookup(scheme, host, origin_host).await?;
        self.insert(host, origin_host, allowed);
        debug!(host, origin_host, allowed, "trust decision cached");
        Ok(allowed)
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;
