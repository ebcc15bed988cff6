//! Loyalty API client
//!
//! Token check, one HTTP call, typed response. Failures never escape
//! [`PlaceToPayClient::get_points`]; they are folded into a failed
//! [`PointsResponse`].

use std::sync::Arc;

use placetopay_common::auth::{OAuthClient, OAuthClientTrait, TokenManager};
use placetopay_common::http::{authorized_headers, HttpTransport};
use placetopay_domain::constants::POINTS_PATH;
use placetopay_domain::{ClientConfig, PointsPayload, PointsResponse};
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::http::ReqwestTransport;

/// `User-Agent` of the default transport
pub const USER_AGENT: &str = concat!("placetopay-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// PlacetoPay loyalty API client
pub struct PlaceToPayClient<C: OAuthClientTrait + 'static = OAuthClient> {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenManager<C>,
}

impl PlaceToPayClient {
    /// Create a client that talks to the gateway over reqwest
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the configuration is invalid or the HTTP
    /// clients cannot be built
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let transport =
            ReqwestTransport::builder().timeout(config.timeout()).user_agent(USER_AGENT).build()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a caller-provided transport; tokens are still
    /// requested with [`OAuthClient`]
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the OAuth client cannot be built
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        let oauth_client = OAuthClient::with_timeout(config.credentials.clone(), config.timeout())
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(PlaceToPayClient::from_parts(config, transport, oauth_client))
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> PlaceToPayClientBuilder {
        PlaceToPayClientBuilder::default()
    }
}

impl<C: OAuthClientTrait + 'static> PlaceToPayClient<C> {
    /// Assemble a client from its collaborators
    #[must_use]
    pub fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        oauth_client: C,
    ) -> Self {
        let tokens = TokenManager::new(oauth_client, config.refresh_threshold_seconds);
        Self { config, transport, tokens }
    }

    /// Loyalty points for `id`
    ///
    /// Never fails: any error is mapped onto a failed response, carrying the
    /// gateway code and message for token-related failures.
    #[instrument(skip(self), fields(api_url = %self.config.credentials.api_url))]
    pub async fn get_points(&self, id: &str) -> PointsResponse {
        match self.fetch_points(id).await {
            Ok(response) => {
                info!("points retrieved");
                response
            }
            Err(err) => {
                warn!(error = %err, kind = ?err.kind(), "points request failed");
                if err.invalidates_token() {
                    self.tokens.clear_tokens().await;
                }
                err.into_points_response()
            }
        }
    }

    async fn fetch_points(&self, id: &str) -> Result<PointsResponse, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput("points id must not be empty".to_string()));
        }

        let tokens = self.tokens.get_valid_tokens().await?;
        let url = self.points_url(id);
        debug!(url = %url, "GET points");

        let headers = authorized_headers(&tokens.authorization_header());
        let response = self.transport.get(&url, &headers).await?;
        if response.status != 200 {
            return Err(ApiError::UnexpectedStatus {
                status: response.status,
                body: response.body,
            });
        }

        let payload: PointsPayload = response.parse_json()?;
        Ok(payload.into())
    }

    /// Whether the next call must obtain a new token first
    pub async fn token_expired(&self) -> bool {
        self.tokens.token_expired().await
    }

    /// Obtain a token with the client-credentials grant
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Token` if the token endpoint rejects the request
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<(), ApiError> {
        self.tokens.authenticate().await.map_err(ApiError::from)
    }

    /// Renew the cached token
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Token` if the token endpoint rejects the request
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.tokens.refresh_tokens().await.map_err(ApiError::from)
    }

    /// Configuration the client was built with
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Token cache used by this client
    pub const fn token_manager(&self) -> &TokenManager<C> {
        &self.tokens
    }

    fn points_url(&self, id: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.credentials.base_url(),
            POINTS_PATH,
            urlencoding::encode(id.trim())
        )
    }
}

/// Builder for [`PlaceToPayClient`]
#[derive(Default)]
pub struct PlaceToPayClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PlaceToPayClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default reqwest transport
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is missing or invalid
    pub fn build(self) -> Result<PlaceToPayClient, ApiError> {
        let config =
            self.config.ok_or_else(|| ApiError::Config("Client config not set".to_string()))?;

        match self.transport {
            Some(transport) => {
                config.validate()?;
                PlaceToPayClient::with_transport(config, transport)
            }
            None => PlaceToPayClient::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use placetopay_common::auth::TokenSet;
    use placetopay_common::http::{HttpResponse, TransportError};
    use placetopay_common::testing::{MockOAuthClient, MockTransport};
    use placetopay_domain::Credentials;

    use super::*;

    const POINTS_URL: &str = "https://gateway.test/api/points/test";

    fn config() -> ClientConfig {
        ClientConfig::new(Credentials::new(
            "client_id",
            "client_secret",
            "https://merchant.test/callback",
            "https://gateway.test/api/",
        ))
    }

    async fn client_with_valid_token(
        transport: &MockTransport,
        oauth: &MockOAuthClient,
    ) -> PlaceToPayClient<MockOAuthClient> {
        let client =
            PlaceToPayClient::from_parts(config(), Arc::new(transport.clone()), oauth.clone());
        client
            .token_manager()
            .store_tokens(TokenSet::new(
                "authToken".to_string(),
                Some("refreshToken".to_string()),
                7200,
                None,
            ))
            .await;
        client
    }

    #[tokio::test]
    async fn test_points_url_trims_slash_and_encodes_id() {
        let client = PlaceToPayClient::from_parts(
            config(),
            Arc::new(MockTransport::new()),
            MockOAuthClient::new(),
        );

        assert_eq!(client.points_url("a b/c"), "https://gateway.test/api/points/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let transport = MockTransport::new();
        transport.respond_json(
            POINTS_URL,
            200,
            &serde_json::json!({"Data": {"miles": 10, "index_conversion": 1.5}, "Message": "ok"}),
        );
        let oauth = MockOAuthClient::new();
        let client = client_with_valid_token(&transport, &oauth).await;

        let response = client.get_points("test").await;

        assert!(response.is_successful());
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer authToken")
        );
    }

    #[tokio::test]
    async fn test_expired_token_error_clears_cached_token() {
        let transport = MockTransport::new();
        transport.fail(
            POINTS_URL,
            TransportError::ExpiredToken {
                code: "EXPIRED_TOKEN".to_string(),
                message: "El bearer token ha expirado".to_string(),
            },
        );
        let oauth = MockOAuthClient::new();
        let client = client_with_valid_token(&transport, &oauth).await;

        let response = client.get_points("test").await;

        assert_eq!(response.error_code(), Some("EXPIRED_TOKEN"));
        assert!(client.token_expired().await);
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_cached_token() {
        let transport = MockTransport::new();
        transport.fail(
            POINTS_URL,
            TransportError::Unauthorized {
                code: "UNAUTHORIZED".to_string(),
                message: "No autorizado".to_string(),
            },
        );
        let oauth = MockOAuthClient::new();
        let client = client_with_valid_token(&transport, &oauth).await;

        client.get_points("test").await;

        assert!(!client.token_expired().await);
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_generic() {
        let transport = MockTransport::new();
        transport.respond(POINTS_URL, HttpResponse::new(Default::default(), 204, ""));
        let oauth = MockOAuthClient::new();
        let client = client_with_valid_token(&transport, &oauth).await;

        let response = client.get_points("test").await;

        assert!(!response.is_successful());
        assert_eq!(response.error_code(), None);
    }

    #[tokio::test]
    async fn test_empty_id_fails_without_any_request() {
        let transport = MockTransport::new();
        let oauth = MockOAuthClient::new();
        let client =
            PlaceToPayClient::from_parts(config(), Arc::new(transport.clone()), oauth.clone());

        let response = client.get_points("  ").await;

        assert!(!response.is_successful());
        assert!(transport.requests().is_empty());
        assert_eq!(oauth.client_credentials_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_failure_is_generic() {
        let transport = MockTransport::new();
        let oauth = MockOAuthClient::new().failing();
        let client = PlaceToPayClient::from_parts(config(), Arc::new(transport.clone()), oauth);

        let response = client.get_points("test").await;

        assert!(!response.is_successful());
        assert_eq!(response.error_code(), None);
        assert_eq!(response.error_message(), None);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_and_refresh_delegate_to_oauth_client() {
        let oauth = MockOAuthClient::new();
        let client =
            PlaceToPayClient::from_parts(config(), Arc::new(MockTransport::new()), oauth.clone());

        assert!(client.token_expired().await);
        client.authenticate().await.unwrap();
        assert!(!client.token_expired().await);
        client.refresh().await.unwrap();

        assert_eq!(oauth.client_credentials_calls(), 1);
        assert_eq!(oauth.refresh_calls(), 1);
        assert_eq!(oauth.last_refresh_token().as_deref(), Some("mock_refresh_token"));
    }

    #[test]
    fn test_builder_missing_config() {
        let result = PlaceToPayClient::builder().build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let mut config = config();
        config.credentials.api_url = "not a url".to_string();

        let result = PlaceToPayClient::builder().config(config).build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_builder_with_transport() {
        let client = PlaceToPayClient::builder()
            .config(config())
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();

        assert_eq!(client.config().credentials.client_id, "client_id");
    }
}
