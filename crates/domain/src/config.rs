//! Client configuration structures

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REFRESH_THRESHOLD_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use crate::errors::{PlaceToPayError, Result};
use crate::types::Credentials;

/// Configuration for the gateway client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Client credentials and gateway URL
    pub credentials: Credentials,

    /// Per-request timeout applied by the HTTP transport
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Treat the cached token as expired this many seconds before it is
    #[serde(default = "default_refresh_threshold_seconds")]
    pub refresh_threshold_seconds: i64,
}

impl ClientConfig {
    /// Configuration with default timeout and refresh threshold
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            refresh_threshold_seconds: DEFAULT_REFRESH_THRESHOLD_SECONDS,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// # Errors
    /// Returns `PlaceToPayError::Config` when the credentials are unusable,
    /// the timeout is zero or the refresh threshold is negative.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;

        if self.timeout_seconds == 0 {
            return Err(PlaceToPayError::Config("timeout_seconds must be positive".to_string()));
        }
        if self.refresh_threshold_seconds < 0 {
            return Err(PlaceToPayError::Config(
                "refresh_threshold_seconds must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

const fn default_refresh_threshold_seconds() -> i64 {
    DEFAULT_REFRESH_THRESHOLD_SECONDS
}
