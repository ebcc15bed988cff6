//! OAuth 2.0 client for the gateway's token endpoint
//!
//! Supports the two grants the gateway issues tokens for:
//! - `client_credentials` to obtain a first token
//! - `refresh_token` to renew it

use std::time::Duration;

use async_trait::async_trait;
use placetopay_domain::constants::DEFAULT_TIMEOUT_SECONDS;
use placetopay_domain::Credentials;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use super::traits::OAuthClientTrait;
use super::types::{OAuthError, TokenResponse, TokenSet};

/// Error type for OAuth client operations
#[derive(Debug, Error)]
pub enum OAuthClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Token endpoint returned an OAuth error body
    #[error("OAuth error (HTTP {status}): {error}")]
    OAuthError { status: u16, error: OAuthError },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No refresh token available
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// OAuth client bound to one set of gateway credentials
#[derive(Debug, Clone)]
pub struct OAuthClient {
    credentials: Credentials,
    client: Client,
}

impl OAuthClient {
    /// Create a client with the default request timeout
    ///
    /// # Errors
    /// Returns `ConfigError` if the underlying HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, OAuthClientError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Create a client with a custom request timeout
    ///
    /// # Errors
    /// Returns `ConfigError` if the underlying HTTP client cannot be built.
    pub fn with_timeout(
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, OAuthClientError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            OAuthClientError::ConfigError(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { credentials, client })
    }

    /// Obtain a token with the client-credentials grant
    ///
    /// # Errors
    /// Returns error if the request fails, the endpoint answers with an OAuth
    /// error, or the body cannot be parsed.
    #[instrument(skip(self), fields(client_id = %self.credentials.client_id))]
    pub async fn request_client_credentials_token(&self) -> Result<TokenSet, OAuthClientError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_url.as_str()),
        ];

        self.request_token(&params).await
    }

    /// Refresh access token using refresh token
    ///
    /// # Errors
    /// Returns error if:
    /// - No refresh token provided
    /// - Refresh fails
    /// - Token is invalid/revoked
    #[instrument(skip(self, refresh_token), fields(client_id = %self.credentials.client_id))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        if refresh_token.is_empty() {
            return Err(OAuthClientError::NoRefreshToken);
        }

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        self.request_token(&params).await
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenSet, OAuthClientError> {
        let url = self.credentials.token_url();
        debug!(url = %url, "requesting token");

        let response = self.client.post(&url).form(params).send().await?;

        // Handle OAuth errors
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let error: OAuthError = serde_json::from_str(&body).map_err(|_| {
                OAuthClientError::ParseError(format!("token endpoint returned {status}: {body}"))
            })?;
            return Err(OAuthClientError::OAuthError { status: status.as_u16(), error });
        }

        let token_response: TokenResponse =
            response.json().await.map_err(|e| OAuthClientError::ParseError(e.to_string()))?;

        Ok(token_response.into())
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl OAuthClientTrait for OAuthClient {
    async fn request_client_credentials_token(&self) -> Result<TokenSet, OAuthClientError> {
        self.request_client_credentials_token().await
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        self.refresh_access_token(refresh_token).await
    }
}
