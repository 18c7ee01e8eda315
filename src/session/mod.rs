//! Session call validation and preparation.
//!
//! A [`SessionCall`] is the front end's request to run a prompt inside an
//! existing session. Validation here produces the non-retryable error kinds
//! the retry executor consults, so a structurally broken call fails fast
//! instead of burning provider attempts.

use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::outcome::Outcome;

/// A request to run a prompt within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCall {
    /// Identifier of the session the prompt belongs to.
    pub session_id: String,
    /// The user prompt to dispatch.
    pub prompt: String,
}

impl SessionCall {
    /// Creates a session call.
    pub fn new(session_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            prompt: prompt.into(),
        }
    }

    /// Validates the call's structural requirements.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.prompt.is_empty() {
            return Err(AgentError::empty_prompt("Prompt cannot be empty"));
        }
        if self.session_id.is_empty() {
            return Err(AgentError::session_missing("Session ID cannot be empty"));
        }
        Ok(())
    }

    /// Validates and prepares the call for execution.
    pub fn prepare(self) -> Outcome<SessionCall, AgentError> {
        if let Err(err) = self.validate() {
            return Outcome::Err(err);
        }
        Outcome::Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentErrorKind;

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let err = SessionCall::new("session-1", "").validate().unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::EmptyPrompt);
        assert_eq!(err.message, "Prompt cannot be empty");
    }

    #[test]
    fn test_validate_rejects_missing_session() {
        let err = SessionCall::new("", "hello").validate().unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::SessionMissing);
        assert_eq!(err.message, "Session ID cannot be empty");
    }

    #[test]
    fn test_empty_prompt_is_checked_before_session() {
        let err = SessionCall::new("", "").validate().unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::EmptyPrompt);
    }

    #[test]
    fn test_validate_accepts_complete_call() {
        assert!(SessionCall::new("session-1", "hello").validate().is_ok());
    }

    #[test]
    fn test_prepare_passes_through_valid_call() {
        let call = SessionCall::new("session-1", "hello");
        let prepared = call.clone().prepare().value();
        assert_eq!(prepared, call);
    }

    #[test]
    fn test_prepare_surfaces_validation_error() {
        let outcome = SessionCall::new("session-1", "").prepare();
        assert_eq!(outcome.error().kind, AgentErrorKind::EmptyPrompt);
    }
}
