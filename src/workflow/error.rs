//! Workflow error kinds

use serde_json::Value;
use thiserror::Error;

use crate::engine::PrepareError;

/// Errors surfaced by the client-side upload workflow
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The product draft failed validation; submission is blocked
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Blueprint not found: {0}")]
    BlueprintNotFound(String),

    #[error("Print provider not found (available: {})", .available.join(", "))]
    ProviderNotFound { available: Vec<String> },

    #[error("No variants match the desired sizes")]
    NoMatchingVariants,

    /// `resolve` was called on a resolver that already ran
    #[error("Catalog resolver already ran (state: {0})")]
    ResolverNotIdle(String),

    /// The relay answered with a non-2xx status
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: Value },

    /// The relay could not be reached
    #[error("Server error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] PrepareError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid relay URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl WorkflowError {
    /// Lookup failures end the session; nothing later can succeed
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WorkflowError::BlueprintNotFound(_)
                | WorkflowError::ProviderNotFound { .. }
                | WorkflowError::NoMatchingVariants
        )
    }

    /// Message shown to the user
    ///
    /// Upstream errors show the relayed `message` (or body) as-is; transport
    /// failures collapse to a generic server error.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Upstream { body, .. } => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            WorkflowError::Transport(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
