//! Token manager with refresh-on-demand
//!
//! Keeps the current bearer token in memory and renews it when a caller asks
//! for it after it has expired (or is within the refresh threshold):
//! - refresh-token grant when a refresh token is cached
//! - client-credentials grant otherwise

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::client::OAuthClientError;
use super::traits::OAuthClientTrait;
use super::types::TokenSet;

/// Error type for token manager operations
#[derive(Debug, Error)]
pub enum TokenManagerError {
    /// OAuth operation failed
    #[error("OAuth error: {0}")]
    OAuthError(#[from] OAuthClientError),

    /// No tokens available (not authenticated)
    #[error("Not authenticated (no tokens)")]
    NotAuthenticated,
}

/// In-memory token cache in front of an [`OAuthClientTrait`]
pub struct TokenManager<C: OAuthClientTrait + 'static> {
    oauth_client: Arc<C>,
    current_tokens: Arc<RwLock<Option<TokenSet>>>,
    refresh_threshold_seconds: i64,
}

impl<C: OAuthClientTrait + 'static> TokenManager<C> {
    /// Create a new token manager
    ///
    /// # Arguments
    /// * `oauth_client` - OAuth client used to obtain and refresh tokens
    /// * `refresh_threshold_seconds` - Refresh tokens this many seconds before
    ///   expiry
    #[must_use]
    pub fn new(oauth_client: C, refresh_threshold_seconds: i64) -> Self {
        Self {
            oauth_client: Arc::new(oauth_client),
            current_tokens: Arc::new(RwLock::new(None)),
            refresh_threshold_seconds,
        }
    }

    /// Replace the cached tokens (e.g., tokens restored by the caller)
    pub async fn store_tokens(&self, tokens: TokenSet) {
        debug!(expires_in_seconds = ?tokens.seconds_until_expiry(), "Tokens stored");
        *self.current_tokens.write().await = Some(tokens);
    }

    /// Current token set (without refresh)
    pub async fn get_tokens(&self) -> Option<TokenSet> {
        self.current_tokens.read().await.clone()
    }

    #[must_use]
    pub async fn is_authenticated(&self) -> bool {
        self.current_tokens.read().await.is_some()
    }

    /// Whether a new token must be obtained before the next call
    ///
    /// True when no token is cached or the cached one expires within the
    /// refresh threshold.
    pub async fn token_expired(&self) -> bool {
        let tokens = self.current_tokens.read().await;
        tokens.as_ref().map_or(true, |t| t.is_expired(self.refresh_threshold_seconds))
    }

    /// Obtain a fresh token with the client-credentials grant
    ///
    /// # Errors
    /// Returns error if the token endpoint rejects the credentials or cannot
    /// be reached
    pub async fn authenticate(&self) -> Result<(), TokenManagerError> {
        let tokens = self.oauth_client.request_client_credentials_token().await?;
        self.store_tokens(tokens).await;

        info!("Obtained access token with client credentials");
        Ok(())
    }

    /// Renew the cached token
    ///
    /// Uses the refresh-token grant when a refresh token is cached and the
    /// client-credentials grant otherwise.
    ///
    /// # Errors
    /// Returns error if the token request fails
    pub async fn refresh_tokens(&self) -> Result<(), TokenManagerError> {
        let refresh_token = {
            let tokens = self.current_tokens.read().await;
            tokens.as_ref().and_then(|t| t.refresh_token.clone())
        };

        let Some(refresh_token) = refresh_token else {
            debug!("No refresh token cached, falling back to client credentials");
            return self.authenticate().await;
        };

        let new_tokens = self.oauth_client.refresh_access_token(&refresh_token).await?;
        self.store_tokens(new_tokens).await;

        info!("Successfully refreshed access token");
        Ok(())
    }

    /// Current token set, renewed first if it has expired
    ///
    /// # Errors
    /// Returns error if renewal fails
    pub async fn get_valid_tokens(&self) -> Result<TokenSet, TokenManagerError> {
        if self.token_expired().await {
            self.refresh_tokens().await?;
        }

        self.get_tokens().await.ok_or(TokenManagerError::NotAuthenticated)
    }

    /// Drop the cached tokens
    pub async fn clear_tokens(&self) {
        *self.current_tokens.write().await = None;
        info!("Tokens cleared");
    }
}
