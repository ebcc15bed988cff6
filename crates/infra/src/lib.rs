//! # PlacetoPay Infrastructure
//!
//! I/O side of the SDK.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - The loyalty API client (`PlaceToPayClient`)
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements the transport trait defined in `placetopay-common`
//! - Depends on `placetopay-domain` and `placetopay-common`

pub mod api;
pub mod config;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiError, PlaceToPayClient, PlaceToPayClientBuilder};
pub use http::{ReqwestTransport, ReqwestTransportBuilder};
pub use observability::init_tracing;
