//! Relay error envelope
//!
//! Upstream failures pass through with their status and body untouched;
//! transport failures collapse to a generic `500 {"message": "Server error"}`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use bytes::Bytes;
use thiserror::Error;
use tracing::error;

use crate::providers::ProviderError;
use crate::providers::printify::models::{ErrorBody, NoVariantsBody, ProviderNotFoundBody};

/// Errors a relay endpoint can answer with
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream returned status {status}")]
    Upstream {
        status: u16,
        body: Bytes,
        content_type: Option<String>,
    },

    #[error("no upstream response: {0}")]
    Transport(String),

    #[error("{provider} provider not found")]
    ProviderNotFound {
        provider: String,
        available: Vec<String>,
    },

    #[error("No valid variants found")]
    NoValidVariants,

    #[error("invalid upstream response: {0}")]
    InvalidUpstreamBody(String),
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, body, content_type } => {
                RelayError::Upstream { status, body, content_type }
            }
            ProviderError::ParseError(message) => RelayError::InvalidUpstreamBody(message),
            other => RelayError::Transport(other.to_string()),
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::ProviderNotFound { .. } | RelayError::NoValidVariants => StatusCode::NOT_FOUND,
            RelayError::InvalidUpstreamBody(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            RelayError::Upstream { body, content_type, .. } => {
                HttpResponse::build(status)
                    .content_type(content_type.as_deref().unwrap_or("application/json"))
                    .body(body.clone())
            }
            RelayError::Transport(cause) => {
                error!(cause = %cause, "Upstream transport failure");
                HttpResponse::build(status).json(ErrorBody {
                    message: "Server error".to_string(),
                })
            }
            RelayError::ProviderNotFound { provider, available } => {
                HttpResponse::build(status).json(ProviderNotFoundBody {
                    message: format!("{} provider not found", provider),
                    available_providers: available.clone(),
                })
            }
            RelayError::NoValidVariants => HttpResponse::build(status).json(NoVariantsBody {
                message: "No valid variants found".to_string(),
                error: "The API response did not contain any valid variants".to_string(),
            }),
            RelayError::InvalidUpstreamBody(cause) => {
                error!(cause = %cause, "Unreadable upstream response");
                HttpResponse::build(status).json(ErrorBody {
                    message: "Invalid response from printing API".to_string(),
                })
            }
        }
    }
}
