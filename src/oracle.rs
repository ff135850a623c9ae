use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::result::TrustError;
use crate::trust::TrustLookup;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Fixed base URL for the oracle. When unset the oracle is reached at
    /// `{scheme}://{host}`, derived per request from the serving host.
    pub base_url: Option<Url>,
    /// Outbound request timeout. A lookup that exceeds it fails with a
    /// transport error instead of hanging the request.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the trust oracle.
///
/// The oracle answers `GET /domains/{host}/allows/{origin_host}` with a JSON
/// body carrying an `allowed` boolean. A 404 means the host or origin is
/// unknown to the oracle and maps to an untrusted result rather than an
/// error.
#[derive(Debug, Clone)]
pub struct OracleClient {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl OracleClient {
    pub fn new(config: OracleConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn endpoint(&self, scheme: &str, host: &str, origin_host: &str) -> Result<Url, TrustError> {
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse(&format!("{scheme}://{host}")).map_err(|source| {
                TrustError::InvalidUrl {
                    host: host.to_owned(),
                    source,
                }
            })?,
        };
        base.join(&format!("/domains/{host}/allows/{origin_host}"))
            .map_err(|source| TrustError::InvalidUrl {
                host: host.to_owned(),
                source,
            })
    }
}

#[derive(Debug, Deserialize)]
struct AllowsBody {
    allowed: bool,
}

#[async_trait]
impl TrustLookup for OracleClient {
    async fn lookup(
        &self,
        scheme: &str,
        host: &str,
        origin_host: &str,
    ) -> Result<bool, TrustError> {
        let url = self.endpoint(scheme, host, origin_host)?;
        debug!(%url, "querying trust oracle");

        let response = self.http.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                let body: AllowsBody = response
                    .json()
                    .await
                    .map_err(TrustError::MalformedBody)?;
                Ok(body.allowed)
            }
            status => Err(TrustError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "oracle_test.rs"]
mod oracle_test;
