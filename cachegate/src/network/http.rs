//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use tracing::{debug, trace, warn};
use url::Url;

use super::types::{FetchError, Fetcher};
use crate::resource::{is_same_origin, Request, Response, ResponseType};

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async HTTP fetcher using reqwest.
///
/// Redirects are followed; the final response is marked `redirected` and
/// typed `basic` or `cors` depending on where the redirect chain ended.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a new ReqwestFetcher with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestFetcher with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        let url = request.url().clone();
        trace!(url = %url, method = %request.method(), "HTTP request starting");

        let mut builder = self
            .client
            .request(request.method().clone(), url.clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = match builder.send().await {
            Ok(resp) => {
                debug!(
                    url = %url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = %url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(FetchError::transport(url.as_str(), e.to_string()));
            }
        };

        let status = response.status();
        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Response::new(status)
            .with_type(classify_response(&url, &final_url))
            .with_redirected(final_url != url)
            .with_url(final_url)
            .with_headers(headers)
            .with_body(body))
    }
}

/// Response type for a fetch of `requested` that ended at `final_url`.
pub fn classify_response(requested: &Url, final_url: &Url) -> ResponseType {
    if is_same_origin(requested, final_url) {
        ResponseType::Basic
    } else {
        ResponseType::Cors
    }
}
