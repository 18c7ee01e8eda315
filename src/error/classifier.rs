//! Keyword-driven classification of raw provider failures.
//!
//! Classification is a fixed-priority chain of case-insensitive substring
//! rules evaluated against the failure description. Categories overlap on
//! purpose (a message holding both "token" and "exceeded" must be a token
//! limit, not a server error), so rule order is load-bearing and must not be
//! reordered. Substring matching against free-text provider wording is a
//! best-effort heuristic: prefer structured failure codes where a provider
//! offers them and treat this chain as the last-resort translator.

use std::error::Error;

use tracing::debug;

use super::classification::{ApiErrorType, StructuredApiError};

/// One keyword rule in the classification chain.
///
/// A rule matches when every `all` substring is present and, if `any` is
/// non-empty, at least one `any` substring is present. Both lists are checked
/// against the lowercased description.
#[derive(Debug)]
struct KeywordRule {
    any: &'static [&'static str],
    all: &'static [&'static str],
    error_type: ApiErrorType,
    title: &'static str,
    details: &'static str,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        self.all.iter().all(|needle| lowered.contains(needle))
            && (self.any.is_empty() || self.any.iter().any(|needle| lowered.contains(needle)))
    }
}

const AUTHENTICATION_DETAILS: &str = "\
This appears to be an authentication issue. Please check:
• Your API key is valid and not expired
• The API key has sufficient permissions
• You're using the correct provider endpoint";

const RATE_LIMIT_DETAILS: &str = "\
You've hit the rate limit. Options:
• Wait a moment before retrying
• Check your usage quota
• Consider upgrading your plan";

const TIMEOUT_DETAILS: &str = "\
The request timed out. This could be due to:
• Slow model response time
• Network connectivity issues
• Server overload";

const NETWORK_DETAILS: &str = "\
Network connectivity issue detected:
• Check your internet connection
• Verify the API endpoint is accessible
• Try again in a few moments";

const INVALID_REQUEST_DETAILS: &str = "\
The API request was invalid:
• Check the request parameters
• Verify the model name exists
• Ensure request format is correct";

const BILLING_DETAILS: &str = "\
Billing or payment issue:
• Check your account balance
• Update your payment method
• Verify your subscription is active";

const MODEL_UNAVAILABLE_DETAILS: &str = "\
Model availability issue:
• Verify the model name is correct
• Check if the model is available in your region
• Try a different model";

const CONTENT_POLICY_DETAILS: &str = "\
Content policy violation:
• Review and modify your prompt
• Avoid restricted content
• Check content guidelines";

const TOKEN_LIMIT_DETAILS: &str = "\
Token limit exceeded:
• Shorten your prompt
• Break into smaller requests
• Use a model with higher token limits";

const SERVER_ERROR_DETAILS: &str = "\
Server-side error occurred:
• This is a temporary issue with the API
• Try again in a few minutes
• Check provider status page";

/// The keyword chain, in evaluation order. Do not reorder.
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        any: &["unauthorized", "authentication", "invalid api key"],
        all: &[],
        error_type: ApiErrorType::Authentication,
        title: "Authentication Error",
        details: AUTHENTICATION_DETAILS,
    },
    KeywordRule {
        any: &["rate limit", "too many requests", "quota exceeded"],
        all: &[],
        error_type: ApiErrorType::RateLimit,
        title: "Rate Limit Exceeded",
        details: RATE_LIMIT_DETAILS,
    },
    KeywordRule {
        any: &["timeout", "deadline exceeded"],
        all: &[],
        error_type: ApiErrorType::Network,
        title: "Request Timeout",
        details: TIMEOUT_DETAILS,
    },
    KeywordRule {
        any: &["connection", "network"],
        all: &[],
        error_type: ApiErrorType::Network,
        title: "Network Error",
        details: NETWORK_DETAILS,
    },
    KeywordRule {
        any: &["invalid request", "bad request"],
        all: &[],
        error_type: ApiErrorType::InvalidRequest,
        title: "Invalid Request",
        details: INVALID_REQUEST_DETAILS,
    },
    KeywordRule {
        any: &["insufficient credits", "billing", "payment"],
        all: &[],
        error_type: ApiErrorType::Billing,
        title: "Billing Error",
        details: BILLING_DETAILS,
    },
    KeywordRule {
        any: &["model not found", "invalid model"],
        all: &[],
        error_type: ApiErrorType::ModelUnavailable,
        title: "Model Unavailable",
        details: MODEL_UNAVAILABLE_DETAILS,
    },
    KeywordRule {
        any: &["content policy", "content filter", "safety"],
        all: &[],
        error_type: ApiErrorType::ContentPolicy,
        title: "Content Policy Violation",
        details: CONTENT_POLICY_DETAILS,
    },
    KeywordRule {
        any: &["exceeded", "limit"],
        all: &["token"],
        error_type: ApiErrorType::TokenLimit,
        title: "Token Limit Exceeded",
        details: TOKEN_LIMIT_DETAILS,
    },
    KeywordRule {
        any: &["server error", "internal error", "502", "503", "500"],
        all: &[],
        error_type: ApiErrorType::Server,
        title: "Server Error",
        details: SERVER_ERROR_DETAILS,
    },
];

/// Bare HTTP status fallbacks, scanned against the raw (non-lowercased)
/// description when no keyword rule matched. 500/502/503 are normally caught
/// by the keyword pass already; they stay here for descriptions that carry
/// the digits in unusual casing contexts.
const HTTP_FALLBACKS: &[(u16, ApiErrorType, &str)] = &[
    (400, ApiErrorType::BadRequest, "Bad Request"),
    (401, ApiErrorType::Unauthorized, "Unauthorized"),
    (403, ApiErrorType::Forbidden, "Forbidden"),
    (404, ApiErrorType::NotFound, "Not Found"),
    (429, ApiErrorType::RateLimited, "Rate Limited"),
    (500, ApiErrorType::InternalServer, "Internal Server Error"),
    (502, ApiErrorType::BadGateway, "Bad Gateway"),
    (503, ApiErrorType::ServiceUnavailable, "Service Unavailable"),
];

fn http_details(status: u16) -> String {
    format!(
        "HTTP {status} error detected:\n\
         • Check the API documentation for this status code\n\
         • Verify your request parameters\n\
         • Try again in a few moments"
    )
}

/// Translates arbitrary provider failures into [`StructuredApiError`]s.
///
/// Classification is total: every input produces a structured error, falling
/// back to the generic `API_ERROR` type for unrecognized phrasing and to the
/// nil sentinel when invoked with no error at all.
#[derive(Debug, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Creates a classifier with the built-in rule chain.
    pub fn new() -> Self {
        Self
    }

    /// Classifies an optional failure for display.
    ///
    /// `None` yields the nil sentinel: it signals classifier misuse by the
    /// caller, not a remote failure.
    pub fn classify(&self, error: Option<&dyn Error>) -> StructuredApiError {
        match error {
            Some(err) => self.classify_description(&err.to_string()),
            None => StructuredApiError::nil_sentinel(),
        }
    }

    /// Classifies a raw failure description for display.
    pub fn classify_description(&self, description: &str) -> StructuredApiError {
        let lowered = description.to_lowercase();

        for rule in KEYWORD_RULES {
            if rule.matches(&lowered) {
                debug!(error_type = rule.error_type.code(), "classified provider failure");
                return StructuredApiError::new(
                    rule.error_type,
                    rule.title,
                    description,
                    rule.details,
                );
            }
        }

        // Fallback: bare HTTP status codes in the raw description.
        for (status, error_type, title) in HTTP_FALLBACKS {
            if description.contains(&status.to_string()) {
                debug!(error_type = error_type.code(), "classified by HTTP status fallback");
                return StructuredApiError::new(
                    *error_type,
                    *title,
                    description,
                    http_details(*status),
                );
            }
        }

        StructuredApiError::new(ApiErrorType::Api, "API Error", description, "")
    }
}
