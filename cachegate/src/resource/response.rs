//! Responses returned by the network or the cache.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// How a response relates to the request's origin.
///
/// Only [`ResponseType::Basic`] responses are eligible for cache refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// Same-origin response with full access to headers and body.
    Basic,
    /// Cross-origin response received with CORS.
    Cors,
    /// Response constructed locally.
    Default,
    /// Network error placeholder.
    Error,
    /// Cross-origin response without CORS.
    Opaque,
    /// Redirect captured with manual redirect mode.
    OpaqueRedirect,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Cors => "cors",
            Self::Default => "default",
            Self::Error => "error",
            Self::Opaque => "opaque",
            Self::OpaqueRedirect => "opaqueredirect",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete, buffered HTTP response.
///
/// The body is an immutable [`Bytes`] buffer. A clone can be read
/// independently of the original, which is what lets one copy go back to
/// the caller while another is written to the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    response_type: ResponseType,
    url: Option<Url>,
    redirected: bool,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create an empty `default`-typed response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            response_type: ResponseType::Default,
            url: None,
            redirected: false,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for any 2xx status.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// Final URL after redirects, if known.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn redirected(&self) -> bool {
        self.redirected
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
