//! Transport abstraction
//!
//! The gateway client only depends on this trait, so tests can swap the
//! reqwest-backed transport for an in-memory one.

use async_trait::async_trait;

use super::error::TransportError;
use super::types::{Headers, HttpResponse};

/// Minimal HTTP transport used by the gateway client
///
/// Implementations return `Ok` for 2xx, 3xx and 5xx responses and raise a
/// classified [`TransportError`] for 4xx responses and I/O failures.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request
    ///
    /// # Errors
    /// Returns a typed error for 4xx responses or when the request fails
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, TransportError>;

    /// Issue a POST request with a JSON body
    ///
    /// # Errors
    /// Returns a typed error for 4xx responses or when the request fails
    async fn post(
        &self,
        url: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError>;
}
