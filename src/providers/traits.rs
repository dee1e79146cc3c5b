//! Shared upstream types
//!
//! Error and credential types used by every client of the external
//! printing API.

use bytes::Bytes;
use thiserror::Error;

use crate::config::UpstreamSettings;

// ============================================================================
// Error Types
// ============================================================================

/// Upstream error types
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; the body is kept verbatim
    #[error("API error: {status}")]
    ApiError {
        status: u16,
        body: Bytes,
        content_type: Option<String>,
    },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Result type for upstream operations
pub type ProviderResult<T> = Result<T, ProviderError>;

// ============================================================================
// Credentials
// ============================================================================

/// Secret bearer token attached to every outbound call
#[derive(Clone)]
pub struct ProviderCredentials {
    access_token: String,
}

impl ProviderCredentials {
    pub fn new(access_token: impl Into<String>) -> ProviderResult<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "CANVAS_UPSTREAM__API_TOKEN is not set".to_string(),
            ));
        }
        Ok(ProviderCredentials { access_token })
    }

    pub fn from_settings(settings: &UpstreamSettings) -> ProviderResult<Self> {
        Self::new(settings.api_token.clone())
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProviderCredentials(<redacted>)")
    }
}
