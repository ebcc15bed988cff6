//! Domain constants
//!
//! Error codes published by the gateway and the defaults the SDK falls back
//! to when configuration leaves a value unset.

// Gateway error codes
pub const NOT_VALID_TOKEN_CODE: &str = "NOT_VALID_TOKEN";
pub const EXPIRED_TOKEN_CODE: &str = "EXPIRED_TOKEN";
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";

// Client defaults
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_REFRESH_THRESHOLD_SECONDS: i64 = 60;

// Endpoint paths, relative to the configured API URL
pub const TOKEN_PATH: &str = "/oauth/token";
pub const POINTS_PATH: &str = "/points";
