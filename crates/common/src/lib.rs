//! Shared plumbing for the PlacetoPay SDK crates.
//!
//! - [`auth`]: client-credentials OAuth and the cached bearer token
//! - [`http`]: the transport seam and 4xx failure classification
//! - `testing`: mocks for both seams (`test-utils` feature)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod http;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{OAuthClient, OAuthClientError, OAuthClientTrait, TokenManager, TokenSet};
pub use http::{HttpResponse, HttpTransport, TransportError};
