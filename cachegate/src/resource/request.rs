//! Requests as seen by the arbiter.
//!
//! A [`Request`] is a transient value: method, URL, headers and an optional
//! body. Its cache identity is the method plus the URL (fragment removed);
//! headers never take part in lookups.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

/// An outgoing resource request.
///
/// Cloning produces an independent copy: the body is an immutable [`Bytes`]
/// buffer, so sending the clone to the network never consumes the original.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Create a request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Create a `GET` request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parse `url` and create a request with the given method.
    pub fn parse(method: Method, url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(method, Url::parse(url)?))
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Whether this request shares scheme, host and port with `origin`.
    ///
    /// The comparison is structural, so `https://app.example.evil/` is not
    /// treated as same-origin with `https://app.example`.
    pub fn is_same_origin(&self, origin: &Url) -> bool {
        is_same_origin(&self.url, origin)
    }

    /// Cache key for this request: `"{METHOD} {url}"` without the fragment.
    pub fn cache_key(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        format!("{} {}", self.method, url)
    }
}

/// Compare the origins of two URLs.
///
/// Opaque origins (`data:`, `blob:` without a tuple origin) never match.
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    let a = a.origin();
    a.is_tuple() && a == b.origin()
}
