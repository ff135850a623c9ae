use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gatekeeper_cors_rs::{
    Cors, CorsOptions, RequestContext, Trust, TrustError, TrustLookup,
};

/// Fake oracle lookup that returns a fixed answer and counts invocations.
pub struct RecordingLookup {
    calls: AtomicUsize,
    allowed: bool,
}

impl RecordingLookup {
    pub fn returning(allowed: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            allowed,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrustLookup for RecordingLookup {
    async fn lookup(&self, _: &str, _: &str, _: &str) -> Result<bool, TrustError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.allowed)
    }
}

/// Fake oracle lookup that always fails with a transport-style error.
pub struct FailingLookup;

#[async_trait]
impl TrustLookup for FailingLookup {
    async fn lookup(&self, _: &str, _: &str, _: &str) -> Result<bool, TrustError> {
        Err(TrustError::UnexpectedStatus { status: 500 })
    }
}

/// Lookup that trusts a fixed set of origin hosts for a fixed serving host.
pub struct DomainListLookup {
    pub host: &'static str,
    pub trusted: Vec<&'static str>,
}

#[async_trait]
impl TrustLookup for DomainListLookup {
    async fn lookup(&self, _: &str, host: &str, origin_host: &str) -> Result<bool, TrustError> {
        Ok(host == self.host && self.trusted.contains(&origin_host))
    }
}

pub fn cors(trust: Trust) -> Cors {
    cors_with(CorsOptions {
        trust,
        ..CorsOptions::default()
    })
}

pub fn cors_with(options: CorsOptions) -> Cors {
    Cors::new(options).expect("valid CORS configuration")
}

pub fn simple_request(origin: &str) -> RequestContext<'_> {
    RequestContext {
        method: "GET",
        origin,
        host: "site-domain.com",
        scheme: "http",
        ..RequestContext::default()
    }
}

pub fn preflight_request<'a>(
    origin: &'a str,
    requested_method: &'a str,
    requested_headers: &'a str,
) -> RequestContext<'a> {
    RequestContext {
        method: "OPTIONS",
        origin,
        host: "site-domain.com",
        scheme: "http",
        access_control_request_method: requested_method,
        access_control_request_headers: requested_headers,
        ..RequestContext::default()
    }
}
