/// Borrowed, framework-agnostic view of an incoming request.
///
/// Adapters fill this from whatever request type their framework uses; absent
/// headers are represented as empty strings.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: &'a str,
    pub x_origin: &'a str,
    pub host: &'a str,
    pub forwarded_host: &'a str,
    pub scheme: &'a str,
    pub access_control_request_method: &'a str,
    pub access_control_request_headers: &'a str,
}

impl Default for RequestContext<'_> {
    fn default() -> Self {
        Self {
            method: "",
            origin: "",
            x_origin: "",
            host: "",
            forwarded_host: "",
            scheme: "",
            access_control_request_method: "",
            access_control_request_headers: "",
        }
    }
}
