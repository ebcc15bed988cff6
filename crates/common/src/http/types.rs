//! Transport-level request and response types

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use super::error::TransportError;

/// Request or response headers, keyed by lower-cased header name
pub type Headers = BTreeMap<String, String>;

/// Raw response returned by an [`HttpTransport`](super::HttpTransport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub headers: Headers,
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Build a response, normalizing header names to lower case
    #[must_use]
    pub fn new(headers: Headers, status: u16, body: impl Into<String>) -> Self {
        let headers = headers.into_iter().map(|(k, v)| (k.to_ascii_lowercase(), v)).collect();
        Self { headers, status, body: body.into() }
    }

    /// JSON response with the matching content type
    #[must_use]
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(headers, status, body.to_string())
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Deserialize the body as JSON
    ///
    /// # Errors
    /// Returns `TransportError::Decode` if the body is not valid JSON for `T`.
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Build the header set for an authenticated JSON call
///
/// `authorization` is the full header value, e.g. `Bearer <token>`.
#[must_use]
pub fn authorized_headers(authorization: &str) -> Headers {
    let mut headers = Headers::new();
    headers.insert("authorization".to_string(), authorization.to_string());
    headers.insert("accept".to_string(), "application/json".to_string());
    headers
}
