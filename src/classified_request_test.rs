use super::*;

fn context<'a>(method: &'a str, origin: &'a str, host: &'a str) -> RequestContext<'a> {
    RequestContext {
        method,
        origin,
        host,
        ..RequestContext::default()
    }
}

mod classify {
    use super::*;

    #[test]
    fn should_not_be_cors_when_origin_is_absent() {
        let classified = ClassifiedRequest::classify(&context("GET", "", "site.test"));

        assert!(!classified.is_cors());
        assert!(!classified.is_preflight);
        assert_eq!(classified.origin, None);
        assert_eq!(classified.origin_host, None);
    }

    #[test]
    fn should_keep_literal_origin_and_parse_its_host() {
        let classified =
            ClassifiedRequest::classify(&context("GET", "http://client.test:8080", "site.test"));

        assert_eq!(classified.origin.as_deref(), Some("http://client.test:8080"));
        assert_eq!(classified.origin_host.as_deref(), Some("client.test"));
    }

    #[test]
    fn should_fall_back_to_x_origin_when_origin_is_absent() {
        let request = RequestContext {
            method: "GET",
            x_origin: "http://client.test",
            host: "site.test",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        assert_eq!(classified.origin.as_deref(), Some("http://client.test"));
        assert_eq!(classified.origin_host.as_deref(), Some("client.test"));
    }

    #[test]
    fn should_prefer_origin_over_x_origin_when_both_present() {
        let request = RequestContext {
            method: "GET",
            origin: "http://first.test",
            x_origin: "http://second.test",
            host: "site.test",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        assert_eq!(classified.origin.as_deref(), Some("http://first.test"));
    }

    #[test]
    fn should_degrade_to_raw_origin_when_origin_is_not_a_url() {
        let classified =
            ClassifiedRequest::classify(&context("GET", "client.test", "site.test"));

        assert_eq!(classified.origin_host.as_deref(), Some("client.test"));
    }

    #[test]
    fn should_degrade_to_raw_origin_when_url_has_no_host() {
        let classified = ClassifiedRequest::classify(&context("GET", "data:text/plain", "site.test"));

        assert_eq!(classified.origin_host.as_deref(), Some("data:text/plain"));
    }

    #[test]
    fn should_detect_preflight_when_method_is_options_with_origin() {
        let classified =
            ClassifiedRequest::classify(&context("options", "http://client.test", "site.test"));

        assert!(classified.is_preflight);
    }

    #[test]
    fn should_not_detect_preflight_when_origin_is_absent() {
        let classified = ClassifiedRequest::classify(&context("OPTIONS", "", "site.test"));

        assert!(!classified.is_preflight);
    }

    #[test]
    fn should_prefer_forwarded_host_and_strip_its_port() {
        let request = RequestContext {
            method: "GET",
            origin: "http://client.test",
            host: "internal.test:3000",
            forwarded_host: "public.test:443",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        assert_eq!(classified.host, "public.test");
    }

    #[test]
    fn should_strip_port_from_connection_host() {
        let classified =
            ClassifiedRequest::classify(&context("GET", "http://client.test", "site.test:8080"));

        assert_eq!(classified.host, "site.test");
    }

    #[test]
    fn should_default_scheme_to_http_when_unknown() {
        let classified = ClassifiedRequest::classify(&context("GET", "", "site.test"));

        assert_eq!(classified.scheme, "http");
    }

    #[test]
    fn should_capture_requested_method_and_headers() {
        let request = RequestContext {
            method: "OPTIONS",
            origin: "http://client.test",
            host: "site.test",
            access_control_request_method: "DELETE",
            access_control_request_headers: "X-Trace, Content-Type",
            ..RequestContext::default()
        };

        let classified = ClassifiedRequest::classify(&request);

        assert_eq!(classified.requested_method.as_deref(), Some("DELETE"));
        assert_eq!(
            classified.requested_headers.as_deref(),
            Some("X-Trace, Content-Type")
        );
    }

    #[test]
    fn should_leave_requested_method_and_headers_empty_when_absent() {
        let classified =
            ClassifiedRequest::classify(&context("OPTIONS", "http://client.test", "site.test"));

        assert_eq!(classified.requested_method, None);
        assert_eq!(classified.requested_headers, None);
    }
}
