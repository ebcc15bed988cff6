//! Typed transport failures
//!
//! The gateway signals token problems with a 4xx status and a JSON body of
//! the form `{"Code": "EXPIRED_TOKEN", "Message": "..."}`. Those bodies are
//! classified here so every transport implementation raises the same errors.

use placetopay_domain::FailureKind;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised by an [`HttpTransport`](super::HttpTransport)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Gateway rejected the token as malformed or unknown
    #[error("Bearer token is not valid ({code}): {message}")]
    NotValidToken { code: String, message: String },

    /// Gateway reports the token as expired
    #[error("Bearer token has expired ({code}): {message}")]
    ExpiredToken { code: String, message: String },

    /// Credentials lack permission for the call
    #[error("Unauthorized ({code}): {message}")]
    Unauthorized { code: String, message: String },

    /// Any other 4xx response
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or request build failure
    #[error("Network error: {0}")]
    Network(String),

    /// Body could not be decoded into the expected type
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotValidToken { .. } => FailureKind::NotValidToken,
            Self::ExpiredToken { .. } => FailureKind::ExpiredToken,
            Self::Unauthorized { .. } => FailureKind::Unauthorized,
            Self::Status { .. } | Self::Network(_) | Self::Decode(_) => FailureKind::Generic,
        }
    }

    /// Gateway code and message for recognized failures
    #[must_use]
    pub fn code_and_message(&self) -> Option<(&str, &str)> {
        match self {
            Self::NotValidToken { code, message }
            | Self::ExpiredToken { code, message }
            | Self::Unauthorized { code, message } => Some((code.as_str(), message.as_str())),
            Self::Status { .. } | Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Build the error for a recognized kind; `None` for `Generic`.
    #[must_use]
    pub fn recognized(kind: FailureKind, message: impl Into<String>) -> Option<Self> {
        let code = kind.code()?.to_string();
        let message = message.into();
        match kind {
            FailureKind::NotValidToken => Some(Self::NotValidToken { code, message }),
            FailureKind::ExpiredToken => Some(Self::ExpiredToken { code, message }),
            FailureKind::Unauthorized => Some(Self::Unauthorized { code, message }),
            FailureKind::Generic => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Code", alias = "code", default)]
    code: Option<String>,

    #[serde(rename = "Message", alias = "message", default)]
    message: Option<String>,
}

/// Classify a 4xx response into a [`TransportError`].
///
/// The body code decides the kind; a 401/403 without a recognized code is
/// still `Unauthorized`. Recognized kinds always carry the canonical gateway
/// code.
#[must_use]
pub fn classify_client_error(status: u16, body: &str) -> TransportError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let mut kind = parsed.code.as_deref().map_or(FailureKind::Generic, FailureKind::from_code);
    if kind == FailureKind::Generic && matches!(status, 401 | 403) {
        kind = FailureKind::Unauthorized;
    }

    let message = parsed.message.unwrap_or_else(|| reason_phrase(status));

    TransportError::recognized(kind, message)
        .unwrap_or_else(|| TransportError::Status { status, body: body.to_string() })
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}
