use thiserror::Error;

use crate::headers::Headers;

/// Headers and response metadata computed for a single request.
#[derive(Debug, Clone)]
pub struct CorsResult {
    /// Whether the origin was resolved as trusted.
    pub allowed: bool,
    /// Headers to attach; empty when the origin is not trusted.
    pub headers: Headers,
    /// Status the middleware must answer with when it terminates the request.
    pub status: Option<u16>,
    /// When true the middleware answers directly and never calls downstream.
    pub end_response: bool,
}

/// Overall decision returned by the engine.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    Preflight(CorsResult),
    Simple(CorsResult),
    NotApplicable,
}

/// Failure of a single trust lookup against the oracle.
///
/// A 404 from the oracle is not an error: it maps to a definitive
/// "untrusted". These variants cover everything else, and none of them is
/// ever cached.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("oracle request failed")]
    Http(#[from] reqwest::Error),
    #[error("oracle returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("oracle returned a malformed body")]
    MalformedBody(#[source] reqwest::Error),
    #[error("cannot build oracle URL for host {host:?}")]
    InvalidUrl {
        host: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum CorsError {
    #[error("trust lookup for origin {origin_host:?} on host {host:?} failed")]
    TrustLookup {
        host: String,
        origin_host: String,
        #[source]
        source: TrustError,
    },
}
