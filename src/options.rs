use std::time::Duration;

use thiserror::Error;

use crate::trust::Trust;

/// What the middleware does when the trust lookup itself fails.
///
/// Earlier revisions of this middleware were inconsistent here, sometimes
/// letting the failure escape and sometimes swallowing it. The policy makes
/// the choice explicit instead of inheriting either accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFailurePolicy {
    /// Log the failure, attach no CORS headers, and keep serving the request
    /// as if the origin were untrusted.
    #[default]
    Deny,
    /// Surface the failure: the request is answered with 502 and downstream
    /// is never invoked.
    Propagate,
}

#[derive(Clone)]
pub struct CorsOptions {
    /// How trust between the serving host and an origin host is resolved.
    pub trust: Trust,
    /// Lifetime of a cached trust decision. Must be non-zero; decisions are
    /// never cached forever.
    pub cache_ttl: Duration,
    /// Value advertised in `Access-Control-Max-Age` on allowed preflights.
    pub max_age: Duration,
    /// Status used when terminating a preflight.
    pub preflight_status: u16,
    pub lookup_failure: LookupFailurePolicy,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            trust: Trust::default(),
            cache_ttl: Duration::from_secs(900),
            max_age: Duration::from_secs(3600),
            preflight_status: 200,
            lookup_failure: LookupFailurePolicy::default(),
        }
    }
}

impl CorsOptions {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.cache_ttl.is_zero() {
            return Err(ValidationError::ZeroCacheTtl);
        }
        if !(100..=599).contains(&self.preflight_status) {
            return Err(ValidationError::InvalidPreflightStatus(
                self.preflight_status,
            ));
        }
        Ok(())
    }
}

/// Errors rejected at construction time.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("cache TTL must be greater than zero")]
    ZeroCacheTtl,
    #[error("preflight status {0} is not a valid HTTP status")]
    InvalidPreflightStatus(u16),
    #[error("failed to build the oracle HTTP client")]
    OracleClient(#[source] reqwest::Error),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
