//! Provider-layer error taxonomy for user display.
//!
//! A [`StructuredApiError`] is what the UI renders when a remote call fails.
//! It is produced by the classifier, never consulted for retry decisions:
//! classification and retry are deliberately decoupled layers.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Categorization of provider API errors with stable wire codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorType {
    /// Generic catch-all for unrecognized failures.
    #[serde(rename = "API_ERROR")]
    Api,
    /// Invalid or expired credentials.
    #[serde(rename = "AUTHENTICATION_ERROR")]
    Authentication,
    /// Rate limit or quota exhaustion reported in prose.
    #[serde(rename = "RATE_LIMIT_EXCEEDED")]
    RateLimit,
    /// Connectivity or timeout failure.
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    /// Malformed or rejected request.
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
    /// Account balance or payment problem.
    #[serde(rename = "BILLING_ERROR")]
    Billing,
    /// The requested model does not exist or is not served.
    #[serde(rename = "MODEL_UNAVAILABLE")]
    ModelUnavailable,
    /// The prompt or completion tripped a content filter.
    #[serde(rename = "CONTENT_POLICY_VIOLATION")]
    ContentPolicy,
    /// The request exceeded the model's context window.
    #[serde(rename = "TOKEN_LIMIT_EXCEEDED")]
    TokenLimit,
    /// Server-side failure reported in prose.
    #[serde(rename = "SERVER_ERROR")]
    Server,
    /// Bare HTTP 400 detected in the description.
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
    /// Bare HTTP 401 detected in the description.
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,
    /// Bare HTTP 403 detected in the description.
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    /// Bare HTTP 404 detected in the description.
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    /// Bare HTTP 429 detected in the description.
    #[serde(rename = "RATE_LIMITED")]
    RateLimited,
    /// Bare HTTP 500 detected in the description.
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalServer,
    /// Bare HTTP 502 detected in the description.
    #[serde(rename = "BAD_GATEWAY")]
    BadGateway,
    /// Bare HTTP 503 detected in the description.
    #[serde(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
}

impl ApiErrorType {
    /// Returns the stable string code for this type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api => "API_ERROR",
            Self::Authentication => "AUTHENTICATION_ERROR",
            Self::RateLimit => "RATE_LIMIT_EXCEEDED",
            Self::Network => "NETWORK_ERROR",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Billing => "BILLING_ERROR",
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
            Self::ContentPolicy => "CONTENT_POLICY_VIOLATION",
            Self::TokenLimit => "TOKEN_LIMIT_EXCEEDED",
            Self::Server => "SERVER_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimited => "RATE_LIMITED",
            Self::InternalServer => "INTERNAL_SERVER_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

/// A structured, UI-facing rendering of a provider failure.
///
/// Serializes with the exact field names the front end expects:
/// `type`, `title`, `message`, `details`, `timestamp`, `is_nil`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredApiError {
    /// The classified error type.
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Short heading for display.
    pub title: String,
    /// The raw failure description.
    pub message: String,
    /// Canned multi-line remediation guidance; empty for the catch-all.
    pub details: String,
    /// Local wall-clock time of classification, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Sentinel flag: the classifier was invoked with no actual error.
    pub is_nil: bool,
}

impl StructuredApiError {
    /// Creates a new structured error stamped with the current local time.
    pub fn new(
        error_type: ApiErrorType,
        title: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            title: title.into(),
            message: message.into(),
            details: details.into(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            is_nil: false,
        }
    }

    /// Creates the sentinel for a classifier invoked with no actual error.
    ///
    /// This should never happen in correct callers; it exists purely so the
    /// display layer has something coherent to render instead of crashing.
    pub fn nil_sentinel() -> Self {
        Self {
            error_type: ApiErrorType::Api,
            title: "Internal Error".to_string(),
            message: "An unexpected condition occurred during error processing".to_string(),
            details: "Error handling was triggered with no actual error - this indicates a system bug"
                .to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            is_nil: true,
        }
    }

    /// Returns the `(title, details)` pair the UI renders.
    ///
    /// Total over a possibly-absent error: `None` yields a generic fallback
    /// pair rather than failing.
    pub fn ui_strings(error: Option<&Self>) -> (String, String) {
        match error {
            Some(err) => (err.title.clone(), err.details.clone()),
            None => (
                "Internal Error".to_string(),
                "A critical system error occurred".to_string(),
            ),
        }
    }
}
