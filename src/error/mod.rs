//! Error handling and classification module.
//!
//! Two taxonomies coexist by design. The validation layer ([`AgentError`])
//! is structural, local, and drives retryability. The provider layer
//! ([`StructuredApiError`]) is advisory, produced once at the display
//! boundary by the [`ErrorClassifier`], and never feeds back into retry
//! decisions.

pub mod agent;
pub mod classification;
pub mod classifier;

pub use agent::{AgentError, AgentErrorKind};
pub use classification::{ApiErrorType, StructuredApiError};
pub use classifier::ErrorClassifier;
