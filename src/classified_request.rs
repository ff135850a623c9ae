use url::Url;

use crate::constants::method;
use crate::context::RequestContext;
use crate::util::strip_port;

/// CORS-relevant facts extracted from a raw request.
///
/// Classification is a pure function of the [`RequestContext`]; it performs no
/// I/O and never fails, however malformed the incoming headers are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRequest {
    /// Literal value of the `Origin` header, falling back to `X-Origin`.
    pub origin: Option<String>,
    /// Hostname parsed out of `origin`; a value that is not a well-formed URL
    /// degrades to the raw origin string.
    pub origin_host: Option<String>,
    /// Serving host. A forwarded host wins over the connection host; any
    /// `:port` suffix is stripped.
    pub host: String,
    /// Scheme the request arrived on, used to reach the oracle.
    pub scheme: String,
    pub is_preflight: bool,
    pub requested_method: Option<String>,
    pub requested_headers: Option<String>,
}

impl ClassifiedRequest {
    pub fn classify(request: &RequestContext<'_>) -> Self {
        let origin = non_empty(request.origin)
            .or_else(|| non_empty(request.x_origin))
            .map(str::to_owned);
        let origin_host = origin.as_deref().map(origin_host_of);

        let host = strip_port(non_empty(request.forwarded_host).unwrap_or(request.host)).to_owned();
        let scheme = non_empty(request.scheme).unwrap_or("http").to_owned();

        let is_preflight =
            origin.is_some() && request.method.eq_ignore_ascii_case(method::OPTIONS);

        Self {
            origin,
            origin_host,
            host,
            scheme,
            is_preflight,
            requested_method: non_empty(request.access_control_request_method)
                .map(str::to_owned),
            requested_headers: non_empty(request.access_control_request_headers)
                .map(str::to_owned),
        }
    }

    /// A request is a CORS request iff it carries an origin.
    pub fn is_cors(&self) -> bool {
        self.origin.is_some()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

fn origin_host_of(origin: &str) -> String {
    match Url::parse(origin) {
        Ok(url) => url
            .host_str()
            .map(str::to_owned)
            .unwrap_or_else(|| origin.to_owned()),
        Err(_) => origin.to_owned(),
    }
}

#[cfg(test)]
#[path = "classified_request_test.rs"]
mod classified_request_test;
