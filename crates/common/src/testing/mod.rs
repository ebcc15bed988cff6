//! Testing utilities and helpers
//!
//! - **[`mocks`]**: scripted [`HttpTransport`](crate::http::HttpTransport) and
//!   [`OAuthClientTrait`](crate::auth::OAuthClientTrait) implementations
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `test-utils` feature.

pub mod mocks;

pub use mocks::{MockOAuthClient, MockTransport, RecordedRequest};
