use crate::classified_request::ClassifiedRequest;
use crate::constants::header;
use crate::headers::HeaderCollection;
use crate::options::CorsOptions;

pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self { options }
    }

    /// Headers granted to every trusted CORS request, preflight or not.
    pub(crate) fn build_allow_headers(&self, origin: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(4);
        headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, "");
        headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        headers.add_vary(header::ORIGIN);
        headers
    }

    /// Additional headers granted to a trusted preflight; echoes the
    /// requested method and headers verbatim when the browser sent them.
    pub(crate) fn build_preflight_headers(
        &self,
        classified: &ClassifiedRequest,
    ) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(4);
        headers.push(header::CONTENT_TYPE, "text/plain");
        headers.push(
            header::ACCESS_CONTROL_MAX_AGE,
            self.options.max_age.as_secs().to_string(),
        );
        if let Some(requested) = &classified.requested_headers {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        }
        if let Some(requested) = &classified.requested_method {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, requested.clone());
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
