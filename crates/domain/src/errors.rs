//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{EXPIRED_TOKEN_CODE, NOT_VALID_TOKEN_CODE, UNAUTHORIZED_CODE};

/// Main error type for SDK setup and configuration
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PlaceToPayError {
    /// Missing or invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PlaceToPayError>;

/// Classification of a failed gateway call.
///
/// The three token-related kinds carry the gateway's code and message onto
/// the failed response; everything else collapses into [`FailureKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The bearer token was rejected as malformed or unknown
    NotValidToken,
    /// The bearer token is past its expiry
    ExpiredToken,
    /// The credentials are not allowed to perform the call
    Unauthorized,
    /// Any other failure (network, unexpected status, bad payload)
    Generic,
}

impl FailureKind {
    /// Map a gateway error code onto a failure kind.
    ///
    /// Codes are compared case-insensitively; unknown codes are `Generic`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if code.eq_ignore_ascii_case(NOT_VALID_TOKEN_CODE) {
            Self::NotValidToken
        } else if code.eq_ignore_ascii_case(EXPIRED_TOKEN_CODE) {
            Self::ExpiredToken
        } else if code.eq_ignore_ascii_case(UNAUTHORIZED_CODE) {
            Self::Unauthorized
        } else {
            Self::Generic
        }
    }

    /// Canonical gateway code for recognized kinds
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::NotValidToken => Some(NOT_VALID_TOKEN_CODE),
            Self::ExpiredToken => Some(EXPIRED_TOKEN_CODE),
            Self::Unauthorized => Some(UNAUTHORIZED_CODE),
            Self::Generic => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_recognizes_gateway_codes() {
        assert_eq!(FailureKind::from_code("NOT_VALID_TOKEN"), FailureKind::NotValidToken);
        assert_eq!(FailureKind::from_code("EXPIRED_TOKEN"), FailureKind::ExpiredToken);
        assert_eq!(FailureKind::from_code("UNAUTHORIZED"), FailureKind::Unauthorized);
    }

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(FailureKind::from_code("expired_token"), FailureKind::ExpiredToken);
        assert_eq!(FailureKind::from_code(" Unauthorized "), FailureKind::Unauthorized);
    }

    #[test]
    fn test_unknown_code_is_generic() {
        assert_eq!(FailureKind::from_code("INSUFFICIENT_FUNDS"), FailureKind::Generic);
        assert_eq!(FailureKind::from_code(""), FailureKind::Generic);
        assert_eq!(FailureKind::Generic.code(), None);
    }

    #[test]
    fn test_canonical_codes() {
        assert_eq!(FailureKind::NotValidToken.code(), Some("NOT_VALID_TOKEN"));
        assert_eq!(FailureKind::ExpiredToken.code(), Some("EXPIRED_TOKEN"));
        assert_eq!(FailureKind::Unauthorized.code(), Some("UNAUTHORIZED"));
    }

    #[test]
    fn test_error_serializes_with_type_tag() {
        let err = PlaceToPayError::Config("missing api url".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing api url");
        assert_eq!(err.to_string(), "Configuration error: missing api url");
    }
}
