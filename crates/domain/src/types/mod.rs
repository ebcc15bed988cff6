//! Domain types and models

pub mod credentials;
pub mod points;

pub use credentials::Credentials;
pub use points::{PointsData, PointsPayload, PointsResponse};
