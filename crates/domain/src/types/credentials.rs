//! Gateway credentials
//!
//! Immutable client configuration issued by PlacetoPay when the merchant
//! application is registered.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::TOKEN_PATH;
use crate::errors::{PlaceToPayError, Result};

/// Client credentials plus the endpoints they are valid for
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret, redacted from `Debug`
    pub client_secret: String,
    /// Redirect URL registered for the client, echoed on token requests
    pub redirect_url: String,
    /// Base URL of the gateway API (e.g., `https://loyalty.placetopay.com/api`)
    pub api_url: String,
}

impl Credentials {
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            api_url: api_url.into(),
        }
    }

    /// Check that the credentials can be used to talk to the gateway
    ///
    /// # Errors
    /// Returns `PlaceToPayError::Config` if the client id or secret is empty,
    /// or if `api_url` is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(PlaceToPayError::Config("client_id must not be empty".to_string()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(PlaceToPayError::Config("client_secret must not be empty".to_string()));
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| PlaceToPayError::Config(format!("Invalid api_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PlaceToPayError::Config(format!(
                "Unsupported api_url scheme: {}",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// API base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Token endpoint for the client-credentials and refresh grants
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url(), TOKEN_PATH)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_url", &self.redirect_url)
            .field("api_url", &self.api_url)
            .finish()
    }
}
