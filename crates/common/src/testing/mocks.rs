//! Mock implementations of the auth and transport traits
//!
//! Both mocks are cheap to clone and share their state between clones, so a
//! test can hand one clone to the code under test and inspect the other.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::{OAuthClientError, OAuthClientTrait, OAuthError, TokenSet};
use crate::http::{Headers, HttpResponse, HttpTransport, TransportError};

type MockResult = Result<HttpResponse, TransportError>;
type ResponseMap = Arc<Mutex<HashMap<String, MockResult>>>;
type ResponseSequenceMap = Arc<Mutex<HashMap<String, VecDeque<MockResult>>>>;
type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// A request captured by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<serde_json::Value>,
}

/// Scripted [`HttpTransport`]
///
/// Answers per URL: a queued sequence is consumed first, then the fixed
/// response. Unknown URLs fail with `TransportError::Network`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: ResponseMap,
    response_sequences: ResponseSequenceMap,
    requests: RequestLog,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `url` with `response`
    pub fn respond(&self, url: &str, response: HttpResponse) {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.responses.lock().unwrap().insert(url.to_string(), Ok(response));
    }

    /// Shorthand for a JSON response
    pub fn respond_json(&self, url: &str, status: u16, body: &serde_json::Value) {
        self.respond(url, HttpResponse::json(status, body));
    }

    /// Always fail requests to `url` with `error`
    pub fn fail(&self, url: &str, error: TransportError) {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.responses.lock().unwrap().insert(url.to_string(), Err(error));
    }

    /// Queue results returned one per call before the fixed response
    pub fn respond_sequence(&self, url: &str, results: Vec<MockResult>) {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.response_sequences.lock().unwrap().insert(url.to_string(), results.into());
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.requests.lock().unwrap().clone()
    }

    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.requests.lock().unwrap().iter().filter(|req| req.url == url).count()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.requests.lock().unwrap().last().cloned()
    }

    fn record(&self, method: &str, url: &str, headers: &Headers, body: Option<&serde_json::Value>) {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.cloned(),
        });
    }

    fn answer(&self, url: &str) -> MockResult {
        // SAFETY: Mutex poisoning is acceptable in test mocks
        let mut sequences = self.response_sequences.lock().unwrap();
        if let Some(next) = sequences.get_mut(url).and_then(VecDeque::pop_front) {
            return next;
        }
        drop(sequences);

        // SAFETY: Mutex poisoning is acceptable in test mocks
        let responses = self.responses.lock().unwrap();
        responses.get(url).cloned().unwrap_or_else(|| {
            Err(TransportError::Network(format!("No response configured for URL: {url}")))
        })
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, TransportError> {
        self.record("GET", url, headers, None);
        self.answer(url)
    }

    async fn post(
        &self,
        url: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        self.record("POST", url, headers, Some(body));
        self.answer(url)
    }
}

/// Scripted [`OAuthClientTrait`] that counts grant requests
#[derive(Debug, Clone)]
pub struct MockOAuthClient {
    access_token: Arc<Mutex<String>>,
    expires_in: Arc<Mutex<i64>>,
    should_fail: Arc<Mutex<bool>>,
    client_credentials_calls: Arc<Mutex<usize>>,
    refresh_calls: Arc<Mutex<usize>>,
    last_refresh_token: Arc<Mutex<Option<String>>>,
}

impl MockOAuthClient {
    /// Issues `mock_access_token` valid for one hour
    #[must_use]
    pub fn new() -> Self {
        Self {
            access_token: Arc::new(Mutex::new("mock_access_token".to_string())),
            expires_in: Arc::new(Mutex::new(3600)),
            should_fail: Arc::new(Mutex::new(false)),
            client_credentials_calls: Arc::new(Mutex::new(0)),
            refresh_calls: Arc::new(Mutex::new(0)),
            last_refresh_token: Arc::new(Mutex::new(None)),
        }
    }

    /// Access token issued by both grants
    #[must_use]
    pub fn with_token(self, access_token: &str) -> Self {
        *self.access_token.lock().unwrap() = access_token.to_string();
        self
    }

    /// Lifetime of issued tokens
    #[must_use]
    pub fn with_expires_in(self, expires_in: i64) -> Self {
        *self.expires_in.lock().unwrap() = expires_in;
        self
    }

    /// Reject every grant with `invalid_client`
    #[must_use]
    pub fn failing(self) -> Self {
        self.set_should_fail(true);
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    #[must_use]
    pub fn client_credentials_calls(&self) -> usize {
        *self.client_credentials_calls.lock().unwrap()
    }

    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        *self.refresh_calls.lock().unwrap()
    }

    #[must_use]
    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().unwrap().clone()
    }

    fn issue(&self) -> Result<TokenSet, OAuthClientError> {
        if *self.should_fail.lock().unwrap() {
            return Err(OAuthClientError::OAuthError {
                status: 401,
                error: OAuthError {
                    error: "invalid_client".to_string(),
                    error_description: Some("Client authentication failed".to_string()),
                },
            });
        }

        Ok(TokenSet::new(
            self.access_token.lock().unwrap().clone(),
            Some("mock_refresh_token".to_string()),
            *self.expires_in.lock().unwrap(),
            None,
        ))
    }
}

impl Default for MockOAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OAuthClientTrait for MockOAuthClient {
    async fn request_client_credentials_token(&self) -> Result<TokenSet, OAuthClientError> {
        *self.client_credentials_calls.lock().unwrap() += 1;
        self.issue()
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenSet, OAuthClientError> {
        *self.refresh_calls.lock().unwrap() += 1;
        *self.last_refresh_token.lock().unwrap() = Some(refresh_token.to_string());
        self.issue()
    }
}
