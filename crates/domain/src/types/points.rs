//! Loyalty points types
//!
//! `PointsPayload` mirrors the gateway's JSON body for a points lookup;
//! `PointsResponse` is the result object handed to SDK callers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of a successful `GET /points/{id}` call
///
/// ```json
/// { "Data": { "miles": 1200, "index_conversion": 0.5 }, "Message": "OK" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsPayload {
    #[serde(rename = "Data")]
    pub data: PointsData,

    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

/// Balance section of [`PointsPayload`]
///
/// The gateway is loose about numeric types: `1200`, `1200.0` and `"1200"`
/// are all accepted for `miles`, as long as the value is whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsData {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub miles: Option<i64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub index_conversion: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(t) => t.trim().parse().ok(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        let exact = match self {
            Self::Number(n) => n.as_i64(),
            Self::Text(t) => t.trim().parse().ok(),
        };
        exact.or_else(|| self.as_f64().and_then(whole))
    }
}

/// `value` as an integer when it has no fractional part and fits
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn whole(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(|raw| raw.as_i64().ok_or_else(|| D::Error::custom("miles is not a whole number")))
        .transpose()
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(|raw| {
            raw.as_f64().ok_or_else(|| D::Error::custom("index_conversion is not a number"))
        })
        .transpose()
}

/// Outcome of a points lookup
///
/// Built once per call and never mutated. A successful response carries the
/// balance fields; a failed one carries the gateway error code and message
/// when the failure was recognized, and nothing otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsResponse {
    successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    miles: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_of_conversion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl PointsResponse {
    /// Successful response carrying the balance fields
    #[must_use]
    pub const fn success(
        miles: Option<i64>,
        index_of_conversion: Option<f64>,
        message: Option<String>,
    ) -> Self {
        Self {
            successful: true,
            miles,
            index_of_conversion,
            message,
            error_code: None,
            error_message: None,
        }
    }

    /// Failed response carrying the gateway's error code and message
    #[must_use]
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            successful: false,
            miles: None,
            index_of_conversion: None,
            message: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    /// Failed response for failures the SDK does not classify
    #[must_use]
    pub const fn generic_failure() -> Self {
        Self {
            successful: false,
            miles: None,
            index_of_conversion: None,
            message: None,
            error_code: None,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.successful
    }

    #[must_use]
    pub const fn miles(&self) -> Option<i64> {
        self.miles
    }

    #[must_use]
    pub const fn index_of_conversion(&self) -> Option<f64> {
        self.index_of_conversion
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl From<PointsPayload> for PointsResponse {
    fn from(payload: PointsPayload) -> Self {
        Self::success(payload.data.miles, payload.data.index_conversion, payload.message)
    }
}
