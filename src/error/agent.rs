//! Validation-layer error taxonomy consulted by the retry executor.
//!
//! These errors are structural: they are raised before or around a remote
//! call, never by the provider itself. Provider failures are translated
//! separately by the [classifier](crate::error::ErrorClassifier) and do not
//! feed back into retry decisions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of an agent-level error, carrying the stable wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentErrorKind {
    /// The caller supplied an empty prompt.
    EmptyPrompt,
    /// The caller supplied no session identifier.
    SessionMissing,
    /// The target session is already running an operation.
    SessionBusy,
    /// The message sequence failed structural validation.
    InvalidMessages,
    /// A wrapped remote-provider failure.
    ProviderError,
    /// The operation was cancelled by the caller's context.
    Cancelled,
}

impl AgentErrorKind {
    /// Returns the stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "EMPTY_PROMPT",
            Self::SessionMissing => "SESSION_MISSING",
            Self::SessionBusy => "SESSION_BUSY",
            Self::InvalidMessages => "INVALID_MESSAGES",
            Self::ProviderError => "PROVIDER_ERROR",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true if an error of this kind is worth retrying.
    ///
    /// Validation-class failures and cancellation are terminal: repeating the
    /// same structurally invalid call can never succeed, and a cancelled
    /// context has asked us to stop.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::EmptyPrompt | Self::SessionMissing | Self::InvalidMessages | Self::Cancelled
        )
    }
}

/// An agent-level error with a typed kind and a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}: {message}", .kind.code())]
pub struct AgentError {
    /// The typed kind, consulted for retryability.
    pub kind: AgentErrorKind,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl AgentError {
    /// Creates a new agent error.
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an `EMPTY_PROMPT` error.
    pub fn empty_prompt(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::EmptyPrompt, message)
    }

    /// Creates a `SESSION_MISSING` error.
    pub fn session_missing(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::SessionMissing, message)
    }

    /// Creates a `SESSION_BUSY` error.
    pub fn session_busy(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::SessionBusy, message)
    }

    /// Creates an `INVALID_MESSAGES` validation error.
    pub fn invalid_messages(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidMessages, message)
    }

    /// Creates a `PROVIDER_ERROR` wrapping a remote failure description.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::ProviderError, message)
    }

    /// Creates a `CANCELLED` error.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Cancelled, message)
    }

    /// Returns true if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AgentErrorKind::EmptyPrompt.code(), "EMPTY_PROMPT");
        assert_eq!(AgentErrorKind::SessionMissing.code(), "SESSION_MISSING");
        assert_eq!(AgentErrorKind::SessionBusy.code(), "SESSION_BUSY");
        assert_eq!(AgentErrorKind::InvalidMessages.code(), "INVALID_MESSAGES");
        assert_eq!(AgentErrorKind::ProviderError.code(), "PROVIDER_ERROR");
        assert_eq!(AgentErrorKind::Cancelled.code(), "CANCELLED");
    }

    #[test]
    fn test_validation_kinds_are_not_retryable() {
        assert!(!AgentErrorKind::EmptyPrompt.is_retryable());
        assert!(!AgentErrorKind::SessionMissing.is_retryable());
        assert!(!AgentErrorKind::InvalidMessages.is_retryable());
        assert!(!AgentErrorKind::Cancelled.is_retryable());
    }

    #[test]
    fn test_transient_kinds_are_retryable() {
        assert!(AgentErrorKind::SessionBusy.is_retryable());
        assert!(AgentErrorKind::ProviderError.is_retryable());
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AgentError::empty_prompt("Prompt cannot be empty");
        assert_eq!(err.to_string(), "EMPTY_PROMPT: Prompt cannot be empty");
    }

    #[test]
    fn test_serde_kind_codes() {
        let err = AgentError::session_busy("session is busy");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"SESSION_BUSY\""));
    }
}
