//! Shared fixtures for the infra integration tests.

#![allow(dead_code)]

use placetopay_domain::{ClientConfig, Credentials};
use serde_json::{json, Value};

pub const NOT_VALID_TOKEN_MESSAGE: &str = "El bearer token no es válido";
pub const EXPIRED_TOKEN_MESSAGE: &str = "El bearer token ha expirado y se necesita actualizarlo";
pub const UNAUTHORIZED_MESSAGE: &str = "No autorizado";

/// Client configuration pointing at `api_url`
pub fn test_config(api_url: &str) -> ClientConfig {
    ClientConfig::new(Credentials::new(
        "client_id",
        "client_secret",
        "https://merchant.test/callback",
        api_url,
    ))
}

/// Token endpoint success body
pub fn token_body(access_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-token",
        "token_type": "Bearer",
        "expires_in": expires_in,
    })
}

/// Points endpoint success body
pub fn points_body(miles: i64, index_conversion: f64, message: &str) -> Value {
    json!({
        "Data": { "miles": miles, "index_conversion": index_conversion },
        "Message": message,
    })
}

/// Gateway error body
pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "Code": code, "Message": message })
}
