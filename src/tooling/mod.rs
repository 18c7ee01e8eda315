//! Uniform tool-call contract for external capabilities.
//!
//! Tool collaborators (a memory store, a web-search client, ...) are invoked
//! through one typed contract: parameters in, response-or-error out. Their
//! storage and network internals live outside this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A typed invocation of a tool collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Name of the tool being invoked.
    pub name: String,
    /// Tool-specific arguments as a JSON object.
    pub arguments: Value,
}

impl ToolRequest {
    /// Creates a tool request.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// The successful result of a tool invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Text content produced by the tool, fed back to the model.
    pub content: String,
}

impl ToolResponse {
    /// Creates a tool response.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Failure modes of a tool invocation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The arguments did not match the tool's schema.
    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),
    /// The tool ran but failed.
    #[error("tool execution failed: {0}")]
    ExecutionFailed(String),
    /// The tool did not respond in time.
    #[error("tool timed out: {0}")]
    Timeout(String),
}

/// An external capability invocable through the uniform contract.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The name the model uses to address this tool.
    fn name(&self) -> &str;

    /// Human-readable description surfaced to the model.
    fn description(&self) -> &str;

    /// Invokes the tool with typed parameters.
    async fn call(&self, request: ToolRequest) -> Result<ToolResponse, ToolError>;
}
