use std::sync::Arc;

use async_trait::async_trait;

use crate::oracle::OracleConfig;
use crate::result::TrustError;

/// Caller-supplied trust override: `(host, origin_host) -> bool`.
pub type TrustPredicateFn = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Capability that performs the uncached "does `host` trust `origin_host`"
/// lookup. [`OracleClient`](crate::OracleClient) is the production
/// implementation; tests substitute their own.
#[async_trait]
pub trait TrustLookup: Send + Sync {
    async fn lookup(
        &self,
        scheme: &str,
        host: &str,
        origin_host: &str,
    ) -> Result<bool, TrustError>;
}

/// Source of trust decisions for a [`Cors`](crate::Cors) instance.
#[derive(Clone)]
pub enum Trust {
    /// Query the remote oracle, memoizing results in the trust cache.
    Oracle(OracleConfig),
    /// Use the given lookup instead of the HTTP oracle, still memoized in the
    /// trust cache.
    Custom(Arc<dyn TrustLookup>),
    /// Decide synchronously with the given predicate, bypassing both the
    /// cache and the oracle entirely.
    Predicate(Arc<TrustPredicateFn>),
}

impl Default for Trust {
    fn default() -> Self {
        Self::Oracle(OracleConfig::default())
    }
}

impl Trust {
    pub fn oracle(config: OracleConfig) -> Self {
        Self::Oracle(config)
    }

    pub fn custom<L>(lookup: L) -> Self
    where
        L: TrustLookup + 'static,
    {
        Self::Custom(Arc::new(lookup))
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }
}

#[cfg(test)]
#[path = "trust_test.rs"]
mod trust_test;
