//! HTTP transport contract shared by the SDK crates
//!
//! - **[`types`]**: `HttpResponse` and header helpers
//! - **[`error`]**: `TransportError` and 4xx classification
//! - **[`traits`]**: the `HttpTransport` trait

pub mod error;
pub mod traits;
pub mod types;

pub use error::{classify_client_error, TransportError};
pub use traits::HttpTransport;
pub use types::{authorized_headers, Headers, HttpResponse};
