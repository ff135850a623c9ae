use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::TrustCache;
use crate::classified_request::ClassifiedRequest;
use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::HeaderCollection;
use crate::options::{CorsOptions, LookupFailurePolicy, ValidationError};
use crate::oracle::OracleClient;
use crate::result::{CorsDecision, CorsError, CorsResult};
use crate::trust::{Trust, TrustLookup, TrustPredicateFn};
use crate::util::equals_ignore_case;

enum ResolvedTrust {
    Cached {
        cache: TrustCache,
        lookup: Arc<dyn TrustLookup>,
    },
    Predicate(Arc<TrustPredicateFn>),
}

/// Core engine that turns a classified request into a CORS decision.
pub struct Cors {
    options: CorsOptions,
    trust: ResolvedTrust,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        let trust = match options.trust.clone() {
            Trust::Oracle(config) => ResolvedTrust::Cached {
                cache: TrustCache::new(options.cache_ttl),
                lookup: Arc::new(
                    OracleClient::new(config).map_err(ValidationError::OracleClient)?,
                ),
            },
            Trust::Custom(lookup) => ResolvedTrust::Cached {
                cache: TrustCache::new(options.cache_ttl),
                lookup,
            },
            Trust::Predicate(predicate) => ResolvedTrust::Predicate(predicate),
        };
        Ok(Self { options, trust })
    }

    /// Classifies `request` and decides which CORS headers it earns.
    pub async fn check(&self, request: &RequestContext<'_>) -> Result<CorsDecision, CorsError> {
        let classified = ClassifiedRequest::classify(request);
        self.decide(&classified).await
    }

    /// Decides trust and builds the header set for an already classified
    /// request.
    pub async fn decide(&self, classified: &ClassifiedRequest) -> Result<CorsDecision, CorsError> {
        let Some(origin) = classified.origin.as_deref() else {
            return Ok(CorsDecision::NotApplicable);
        };

        let allowed = match self.resolve_trust(classified).await {
            Ok(allowed) => allowed,
            Err(err) => match self.options.lookup_failure {
                LookupFailurePolicy::Deny => {
                    warn!(error = %err, host = %classified.host, "trust lookup failed, denying CORS");
                    false
                }
                LookupFailurePolicy::Propagate => return Err(err),
            },
        };
        debug!(host = %classified.host, origin, allowed, preflight = classified.is_preflight, "cors decision");

        let mut headers = HeaderCollection::new();
        if allowed {
            let builder = HeaderBuilder::new(&self.options);
            headers.extend(builder.build_allow_headers(origin));
            if classified.is_preflight {
                headers.extend(builder.build_preflight_headers(classified));
            }
        }

        if classified.is_preflight {
            Ok(CorsDecision::Preflight(CorsResult {
                allowed,
                headers: headers.into_headers(),
                status: Some(self.options.preflight_status),
                end_response: true,
            }))
        } else {
            Ok(CorsDecision::Simple(CorsResult {
                allowed,
                headers: headers.into_headers(),
                status: None,
                end_response: false,
            }))
        }
    }

    /// Trust resolution order: the unconditional allows first (localhost and
    /// the serving host itself), then the configured source. The
    /// unconditional rules apply ahead of a predicate override too, so a
    /// localhost origin is trusted no matter what is configured.
    async fn resolve_trust(&self, classified: &ClassifiedRequest) -> Result<bool, CorsError> {
        let origin_host = classified.origin_host.as_deref().unwrap_or_default();

        if equals_ignore_case(origin_host, "localhost") {
            return Ok(true);
        }
        if equals_ignore_case(origin_host, &classified.host) {
            return Ok(true);
        }

        match &self.trust {
            ResolvedTrust::Predicate(predicate) => Ok(predicate(&classified.host, origin_host)),
            ResolvedTrust::Cached { cache, lookup } => cache
                .is_trusted(
                    &classified.scheme,
                    &classified.host,
                    origin_host,
                    lookup.as_ref(),
                )
                .await
                .map_err(|source| CorsError::TrustLookup {
                    host: classified.host.clone(),
                    origin_host: origin_host.to_owned(),
                    source,
                }),
        }
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
