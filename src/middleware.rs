use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode};
use tower::{Layer, Service};
use tracing::error;

use crate::classified_request::ClassifiedRequest;
use crate::constants::header;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::headers::Headers;
use crate::result::CorsDecision;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Layer that wraps a downstream service in [`CorsMiddleware`].
#[derive(Clone)]
pub struct CorsLayer {
    cors: Arc<Cors>,
}

impl CorsLayer {
    pub fn new(cors: Cors) -> Self {
        Self {
            cors: Arc::new(cors),
        }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsMiddleware {
            inner,
            cors: self.cors.clone(),
        }
    }
}

/// Middleware that classifies each request, resolves trust, and either
/// terminates (preflight, or a propagated lookup failure) or composes with
/// the downstream service.
///
/// Downstream is invoked at most once per request, and never for a
/// preflight. Computed headers are merged underneath downstream headers, so
/// a header the application already set wins.
#[derive(Clone)]
pub struct CorsMiddleware<S> {
    inner: S,
    cors: Arc<Cors>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let cors = self.cors.clone();
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let classified = ClassifiedRequest::classify(&request_context(&req));

        Box::pin(async move {
            match cors.decide(&classified).await {
                Ok(CorsDecision::NotApplicable) => inner.call(req).await,
                Ok(CorsDecision::Preflight(result)) => Ok(terminal_response(
                    result.status.unwrap_or(200),
                    &result.headers,
                )),
                Ok(CorsDecision::Simple(result)) => {
                    let mut response = inner.call(req).await?;
                    merge_headers(response.headers_mut(), &result.headers);
                    Ok(response)
                }
                Err(err) => {
                    error!(error = %err, "trust lookup failed, refusing request");
                    Ok(terminal_response(
                        StatusCode::BAD_GATEWAY.as_u16(),
                        &Headers::new(),
                    ))
                }
            }
        })
    }
}

fn request_context<B>(req: &Request<B>) -> RequestContext<'_> {
    let host = match header_str(req, header::HOST) {
        "" => req
            .uri()
            .authority()
            .map(|authority| authority.as_str())
            .unwrap_or(""),
        value => value,
    };
    let scheme = match header_str(req, header::X_FORWARDED_PROTO) {
        "" => req.uri().scheme_str().unwrap_or(""),
        value => value,
    };

    RequestContext {
        method: req.method().as_str(),
        origin: header_str(req, header::ORIGIN),
        x_origin: header_str(req, header::X_ORIGIN),
        host,
        forwarded_host: header_str(req, header::X_FORWARDED_HOST),
        scheme,
        access_control_request_method: header_str(req, header::ACCESS_CONTROL_REQUEST_METHOD),
        access_control_request_headers: header_str(req, header::ACCESS_CONTROL_REQUEST_HEADERS),
    }
}

fn header_str<'a, B>(req: &'a Request<B>, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

fn terminal_response<ResBody: Default>(status: u16, headers: &Headers) -> Response<ResBody> {
    let mut response = Response::new(ResBody::default());
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    for (name, value) in headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

fn merge_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) && !map.contains_key(&name)
        {
            map.insert(name, value);
        }
    }
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
