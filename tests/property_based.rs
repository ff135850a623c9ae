use gatekeeper_cors_rs::{ClassifiedRequest, RequestContext};
use proptest::prelude::*;

proptest! {
    /// Classification is total: arbitrary header garbage never panics and the
    /// CORS flag tracks origin presence exactly.
    #[test]
    fn classify_never_panics(
        method in ".*",
        origin in ".*",
        host in ".*",
        forwarded_host in ".*",
    ) {
        let request = RequestContext {
            method: &method,
            origin: &origin,
            host: &host,
            forwarded_host: &forwarded_host,
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        prop_assert_eq!(classified.is_cors(), !origin.is_empty());
    }

    /// An origin host is always derivable, however malformed the origin is.
    #[test]
    fn origin_host_is_always_derivable(origin in ".+") {
        let request = RequestContext {
            method: "GET",
            origin: &origin,
            host: "site.test",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        prop_assert!(classified.origin_host.is_some());
    }

    /// A request without an origin is never a preflight, whatever the method.
    #[test]
    fn preflight_requires_an_origin(method in "[A-Za-z]{1,10}") {
        let request = RequestContext {
            method: &method,
            host: "site.test",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        prop_assert!(!classified.is_preflight);
    }
}
