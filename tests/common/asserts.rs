use gatekeeper_cors_rs::{CorsDecision, CorsResult, Headers};

pub fn assert_simple(decision: CorsDecision) -> CorsResult {
    match decision {
        CorsDecision::Simple(result) => result,
        other => panic!("expected simple decision, got {other:?}"),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> CorsResult {
    match decision {
        CorsDecision::Preflight(result) => result,
        other => panic!("expected preflight decision, got {other:?}"),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    match headers.get(name) {
        Some(value) => assert_eq!(value, expected, "unexpected value for {name}"),
        None => panic!("header {name} is missing"),
    }
}

pub fn assert_no_cors_headers(headers: &Headers) {
    let leaked: Vec<&String> = headers
        .keys()
        .filter(|name| name.to_ascii_lowercase().starts_with("access-control-"))
        .collect();
    assert!(leaked.is_empty(), "unexpected CORS headers: {leaked:?}");
}
