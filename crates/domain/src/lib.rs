//! # PlacetoPay Domain
//!
//! Business domain types for the PlacetoPay loyalty SDK.
//!
//! This crate contains:
//! - Credentials and client configuration
//! - The points payload and the `PointsResponse` result object
//! - Error types, the failure taxonomy and Result definitions
//! - Gateway constants (error codes, endpoint paths, defaults)
//!
//! ## Architecture
//! - No dependencies on other SDK crates
//! - No I/O: transport and token handling live in `placetopay-common` and
//!   `placetopay-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::ClientConfig;
pub use errors::*;
pub use types::*;
