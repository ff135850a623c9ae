pub mod constants;

mod cache;
mod classified_request;
mod context;
mod cors;
mod header_builder;
mod headers;
mod middleware;
mod options;
mod oracle;
mod result;
mod trust;
mod util;

pub use cache::TrustCache;
pub use classified_request::ClassifiedRequest;
pub use context::RequestContext;
pub use cors::Cors;
pub use headers::Headers;
pub use middleware::{CorsLayer, CorsMiddleware};
pub use options::{CorsOptions, LookupFailurePolicy, ValidationError};
pub use oracle::{OracleClient, OracleConfig};
pub use result::{CorsDecision, CorsError, CorsResult, TrustError};
pub use trust::{Trust, TrustLookup, TrustPredicateFn};
