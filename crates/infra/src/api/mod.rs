//! PlacetoPay loyalty API client
//!
//! # Architecture
//!
//! - Token cache from `placetopay-common` (client-credentials grant, refresh
//!   on expiry)
//! - Any [`HttpTransport`](placetopay_common::http::HttpTransport); reqwest
//!   by default
//! - Single attempt per call, no retries
//! - Failures classified by [`ApiError::kind`] and folded into the response

pub mod client;
pub mod errors;

pub use client::{PlaceToPayClient, PlaceToPayClientBuilder, USER_AGENT};
pub use errors::ApiError;
