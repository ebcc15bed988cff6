//! API-specific error types
//!
//! Every failure on the way to a gateway answer ends up here, and is
//! classified into a [`FailureKind`] before it is folded into a failed
//! response.

use placetopay_common::auth::TokenManagerError;
use placetopay_common::http::TransportError;
use placetopay_domain::{FailureKind, PlaceToPayError, PointsResponse};
use thiserror::Error;

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, including the gateway's typed token errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The bearer token could not be obtained
    #[error("Token acquisition failed: {0}")]
    Token(#[from] TokenManagerError),

    /// Non-200 answer outside the 4xx range
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Caller-supplied argument rejected before any request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Position of this error in the failure taxonomy
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(err) => err.kind(),
            Self::Token(_)
            | Self::UnexpectedStatus { .. }
            | Self::InvalidInput(_)
            | Self::Config(_) => FailureKind::Generic,
        }
    }

    /// Whether the cached token should be dropped after this failure
    #[must_use]
    pub const fn invalidates_token(&self) -> bool {
        matches!(self.kind(), FailureKind::NotValidToken | FailureKind::ExpiredToken)
    }

    /// Fold into a failed response
    ///
    /// Recognized kinds keep their gateway code and message; everything
    /// else becomes a generic failure with neither.
    #[must_use]
    pub fn into_points_response(self) -> PointsResponse {
        match self {
            Self::Transport(err) => match err.code_and_message() {
                Some((code, message)) => PointsResponse::failure(code, message),
                None => PointsResponse::generic_failure(),
            },
            _ => PointsResponse::generic_failure(),
        }
    }
}

impl From<PlaceToPayError> for ApiError {
    fn from(err: PlaceToPayError) -> Self {
        match err {
            PlaceToPayError::Config(message) => Self::Config(message),
        }
    }
}
