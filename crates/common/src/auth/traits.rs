//! Traits for token endpoint operations
//!
//! Abstracts the OAuth server so the token manager can be tested without
//! network access.

use async_trait::async_trait;

use super::client::OAuthClientError;
use super::types::TokenSet;

/// Trait for OAuth client operations
#[async_trait]
pub trait OAuthClientTrait: Send + Sync {
    /// Obtain a token with the client-credentials grant
    ///
    /// # Errors
    /// Returns error if the token request fails or is rejected
    async fn request_client_credentials_token(&self) -> Result<TokenSet, OAuthClientError>;

    /// Refresh access token using refresh token
    ///
    /// # Errors
    /// Returns error if refresh fails or token is invalid/revoked
    async fn refresh_access_token(&self, refresh_token: &str)
        -> Result<TokenSet, OAuthClientError>;
}
