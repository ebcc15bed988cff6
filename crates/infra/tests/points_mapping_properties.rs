//! Failure-to-response mapping of `get_points`
//!
//! The transport and the OAuth client are scripted mocks, so each case pins
//! exactly what the gateway answered and how many token requests were made.

mod support;

use std::sync::Arc;

use placetopay_common::auth::TokenSet;
use placetopay_common::http::TransportError;
use placetopay_common::testing::{MockOAuthClient, MockTransport};
use placetopay_infra::PlaceToPayClient;
use support::{points_body, test_config};

const API_URL: &str = "http://localhost:8080";
const POINTS_URL: &str = "http://localhost:8080/points/test";

struct Harness {
    transport: MockTransport,
    oauth: MockOAuthClient,
    client: PlaceToPayClient<MockOAuthClient>,
}

impl Harness {
    fn new() -> Self {
        let transport = MockTransport::new();
        let oauth = MockOAuthClient::new();
        let client = PlaceToPayClient::from_parts(
            test_config(API_URL),
            Arc::new(transport.clone()),
            oauth.clone(),
        );
        Self { transport, oauth, client }
    }

    /// Cache a token that is valid for two hours
    async fn with_valid_token(self) -> Self {
        self.client
            .token_manager()
            .store_tokens(TokenSet::new(
                "authToken".to_string(),
                Some("authToken".to_string()),
                7200,
                None,
            ))
            .await;
        self
    }

    fn token_requests(&self) -> usize {
        self.oauth.client_credentials_calls() + self.oauth.refresh_calls()
    }
}

#[tokio::test]
async fn test_success_maps_payload() {
    let h = Harness::new().with_valid_token().await;
    h.transport.respond_json(POINTS_URL, 200, &points_body(0, 0.0, "test message"));

    let response = h.client.get_points("test").await;

    assert!(response.is_successful());
    assert_eq!(response.miles(), Some(0));
    assert_eq!(response.index_of_conversion(), Some(0.0));
    assert_eq!(response.message(), Some("test message"));
    assert_eq!(response.error_code(), None);
    assert_eq!(response.error_message(), None);
    assert_eq!(h.token_requests(), 0);
}

#[tokio::test]
async fn test_recognized_failures_carry_code_and_message() {
    let cases = [
        TransportError::NotValidToken {
            code: "NOT_VALID_TOKEN".to_string(),
            message: support::NOT_VALID_TOKEN_MESSAGE.to_string(),
        },
        TransportError::ExpiredToken {
            code: "EXPIRED_TOKEN".to_string(),
            message: support::EXPIRED_TOKEN_MESSAGE.to_string(),
        },
        TransportError::Unauthorized {
            code: "UNAUTHORIZED".to_string(),
            message: support::UNAUTHORIZED_MESSAGE.to_string(),
        },
    ];

    for error in cases {
        let (expected_code, expected_message) = error
            .code_and_message()
            .map(|(c, m)| (c.to_string(), m.to_string()))
            .expect("recognized error");
        let h = Harness::new().with_valid_token().await;
        h.transport.fail(POINTS_URL, error);

        let response = h.client.get_points("test").await;

        assert!(!response.is_successful());
        assert_eq!(response.miles(), None);
        assert_eq!(response.index_of_conversion(), None);
        assert_eq!(response.message(), None);
        assert_eq!(response.error_code(), Some(expected_code.as_str()));
        assert_eq!(response.error_message(), Some(expected_message.as_str()));
    }
}

#[tokio::test]
async fn test_any_other_failure_is_generic() {
    let cases = [
        TransportError::Network("connection reset".to_string()),
        TransportError::Status { status: 422, body: String::new() },
        TransportError::Decode("eof".to_string()),
    ];

    for error in cases {
        let h = Harness::new().with_valid_token().await;
        h.transport.fail(POINTS_URL, error);

        let response = h.client.get_points("test").await;

        assert!(!response.is_successful());
        assert_eq!(response.miles(), None);
        assert_eq!(response.index_of_conversion(), None);
        assert_eq!(response.message(), None);
        assert_eq!(response.error_code(), None);
        assert_eq!(response.error_message(), None);
    }
}

#[tokio::test]
async fn test_valid_token_triggers_no_token_request() {
    let h = Harness::new().with_valid_token().await;
    h.transport.respond_json(POINTS_URL, 200, &points_body(3, 1.0, "ok"));

    h.client.get_points("test").await;
    h.client.get_points("test").await;

    assert_eq!(h.token_requests(), 0);
    assert_eq!(h.transport.request_count(POINTS_URL), 2);
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_token_request() {
    let h = Harness::new();
    h.client
        .token_manager()
        .store_tokens(TokenSet::new("stale".to_string(), Some("authToken".to_string()), 1, None))
        .await;
    h.transport.respond_json(POINTS_URL, 200, &points_body(3, 1.0, "ok"));

    let response = h.client.get_points("test").await;

    assert!(response.is_successful());
    assert_eq!(h.token_requests(), 1);
    assert_eq!(h.oauth.refresh_calls(), 1);
    let request = h.transport.last_request().expect("points request");
    assert_eq!(
        request.headers.get("authorization").map(String::as_str),
        Some("Bearer mock_access_token")
    );
}

#[tokio::test]
async fn test_missing_token_uses_client_credentials_once() {
    let h = Harness::new();
    h.transport.respond_json(POINTS_URL, 200, &points_body(3, 1.0, "ok"));

    h.client.get_points("test").await;

    assert_eq!(h.oauth.client_credentials_calls(), 1);
    assert_eq!(h.oauth.refresh_calls(), 0);
}

#[tokio::test]
async fn test_rejected_expired_token_is_replaced_on_next_call() {
    let h = Harness::new().with_valid_token().await;
    h.transport.respond_sequence(
        POINTS_URL,
        vec![Err(TransportError::ExpiredToken {
            code: "EXPIRED_TOKEN".to_string(),
            message: support::EXPIRED_TOKEN_MESSAGE.to_string(),
        })],
    );
    h.transport.respond_json(POINTS_URL, 200, &points_body(9, 2.0, "ok"));

    let first = h.client.get_points("test").await;
    let second = h.client.get_points("test").await;

    assert_eq!(first.error_code(), Some("EXPIRED_TOKEN"));
    assert!(second.is_successful());
    assert_eq!(h.oauth.client_credentials_calls(), 1);
}
