//! OAuth 2.0 client-credentials infrastructure
//!
//! Obtains and caches the bearer token every gateway call carries.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TokenManager   │  Cached token + renew-on-demand
//! └────────┬────────┘
//!          │
//!          └──► OAuthClientTrait
//!                    │
//!                    └──► OAuthClient  (POST {api_url}/oauth/token)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use placetopay_common::auth::{OAuthClient, TokenManager};
//! use placetopay_domain::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new(
//!         "client-id",
//!         "client-secret",
//!         "https://merchant.example/callback",
//!         "https://gateway.example",
//!     );
//!     let manager = TokenManager::new(OAuthClient::new(credentials)?, 60);
//!
//!     // Requests a token on first use, reuses it until it nears expiry
//!     let tokens = manager.get_valid_tokens().await?;
//!     println!("{}", tokens.authorization_header());
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `TokenSet`, token endpoint bodies
//! - **[`client`]**: HTTP client for the token endpoint
//! - **[`token_manager`]**: token cache and renewal
//! - **[`traits`]**: seam for substituting the OAuth client in tests

pub mod client;
pub mod token_manager;
pub mod traits;
pub mod types;

pub use client::{OAuthClient, OAuthClientError};
pub use token_manager::{TokenManager, TokenManagerError};
pub use traits::OAuthClientTrait;
pub use types::{OAuthError, TokenResponse, TokenSet};
