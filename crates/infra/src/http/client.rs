//! Reqwest-backed HTTP transport
//!
//! Single attempt per request, proxy settings taken from the environment the
//! way reqwest does by default.

use std::time::Duration;

use async_trait::async_trait;
use placetopay_common::http::{
    classify_client_error, Headers, HttpResponse, HttpTransport, TransportError,
};
use placetopay_domain::constants::DEFAULT_TIMEOUT_SECONDS;
use placetopay_domain::PlaceToPayError;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use tracing::debug;

/// [`HttpTransport`] backed by reqwest.
///
/// One attempt per request. 4xx responses are classified into typed
/// [`TransportError`]s; every other status is handed back to the caller.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<HttpResponse, TransportError> {
        let request = builder.build().map_err(network_error)?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            network_error(err)
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect::<Headers>();
        let body = response.text().await.map_err(network_error)?;

        if status.is_client_error() {
            return Err(classify_client_error(status.as_u16(), &body));
        }

        Ok(HttpResponse::new(headers, status.as_u16(), body))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<HttpResponse, TransportError> {
        let builder = apply_headers(self.client.get(url), headers)?;
        self.execute(builder).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &Headers,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, TransportError> {
        let builder = apply_headers(self.client.post(url), headers)?.json(body);
        self.execute(builder).await
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: None,
        }
    }
}

impl ReqwestTransportBuilder {
    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent with every request
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// Returns `PlaceToPayError::Config` if reqwest rejects the settings.
    pub fn build(self) -> Result<ReqwestTransport, PlaceToPayError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| PlaceToPayError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ReqwestTransport { client })
    }
}

fn apply_headers(
    mut builder: RequestBuilder,
    headers: &Headers,
) -> Result<RequestBuilder, TransportError> {
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Network(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Network(format!("invalid header value: {e}")))?;
        builder = builder.header(name, value);
    }
    Ok(builder)
}

fn network_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else {
        "http"
    };
    TransportError::Network(format!("{kind} error: {err}"))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use placetopay_common::http::authorized_headers;
    use placetopay_domain::FailureKind;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::builder().timeout(Duration::from_secs(5)).build().expect("transport")
    }

    #[tokio::test]
    async fn returns_successful_response_with_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/points/1"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"Message": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .get(&format!("{}/points/1", server.uri()), &authorized_headers("Bearer tok"))
            .await
            .expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.body.contains("\"Message\""));
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "points-test/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::builder()
            .user_agent("points-test/1.0")
            .build()
            .expect("transport");
        let response = transport.get(&server.uri(), &Headers::new()).await.expect("response");

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(body_json(serde_json::json!({"id": 7})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .post(
                &format!("{}/echo", server.uri()),
                &Headers::new(),
                &serde_json::json!({"id": 7}),
            )
            .await
            .expect("response");

        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn classifies_gateway_token_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "Code": "EXPIRED_TOKEN",
                "Message": "El bearer token ha expirado",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = transport().get(&server.uri(), &Headers::new()).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::ExpiredToken);
        assert_eq!(err.code_and_message(), Some(("EXPIRED_TOKEN", "El bearer token ha expirado")));
    }

    #[tokio::test]
    async fn other_client_errors_are_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .expect(1)
            .mount(&server)
            .await;

        let err = transport().get(&server.uri(), &Headers::new()).await.unwrap_err();

        assert_eq!(err, TransportError::Status { status: 404, body: "Not found".to_string() });
    }

    #[tokio::test]
    async fn server_errors_are_returned_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport().get(&server.uri(), &Headers::new()).await.expect("response");

        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let result = transport().get(&format!("http://{addr}"), &Headers::new()).await;

        match result {
            Err(TransportError::Network(msg)) => assert!(msg.contains("error")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_header_name_is_rejected_before_sending() {
        let mut headers = Headers::new();
        headers.insert("bad header".to_string(), "x".to_string());

        let result = transport().get("http://127.0.0.1:9", &headers).await;

        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
