//! Conversation message model and the message preparation pipeline.
//!
//! Messages are validated and normalized here before any provider dispatch.
//! The role set is closed: an out-of-set role is rejected at the ingestion
//! boundary ([`Role::from_str`] / serde) rather than carried forward as an
//! unchecked string.

mod processor;

pub use processor::{MessageProcessor, ProcessedMessages};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Originator category of a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation; must come first.
    System,
    /// Input from the human user.
    User,
    /// Output produced by the model.
    Assistant,
    /// Result of a tool invocation fed back to the model.
    Tool,
}

/// Error produced when an incoming role string is not in the role set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid role: {0:?}")]
pub struct InvalidRole(pub String);

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }

    /// Returns true if this is the system role.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Self::System),
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "tool" => Ok(Self::Tool),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a message. Currently a text body; attachments would go here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    /// The text body of the message.
    pub text: String,
}

impl MessageContent {
    /// Creates text-only content.
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A single conversation message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: Role,
    /// What the message carries.
    pub content: MessageContent,
}

impl Message {
    /// Creates a message with the given role and text content.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::text(text),
        }
    }

    /// Creates a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Creates a tool-result message.
    pub fn tool(text: impl Into<String>) -> Self {
        Self::new(Role::Tool, text)
    }
}
