//! Uniform success/error wrapper returned to the chat-bot caller.
//!
//! Failures travel in-band: the orchestrator never returns `Err`, it returns
//! an [`ResultEnvelope::Error`] carrying a stable error kind.

use serde::Serialize;
use utoipa::ToSchema;

use super::UserIdentity;
use super::ports::{BackendCallError, BackendResponse, TokenValidationError};

/// Stable error tag carried by [`ResultEnvelope::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeErrorKind {
    /// The token could not be validated.
    TokenValidationFailed,
    /// The token was valid but the backend call failed.
    BackendServiceFailed,
    /// A collaborator failed in an unclassified way.
    UnexpectedError,
}

/// Orchestrator output, tagged by `status`.
///
/// On error, `user` is omitted entirely unless validation already succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultEnvelope {
    /// Backend call completed.
    Success {
        /// Identity resolved from the token.
        user: UserIdentity,
        /// Backend payload, decoded JSON or the raw-text wrapper.
        #[schema(value_type = Object)]
        backend_response: BackendResponse,
        /// Human-readable summary.
        message: String,
    },
    /// Validation or backend call failed.
    Error {
        /// Failure category.
        error: EnvelopeErrorKind,
        /// Failure detail.
        message: String,
        /// Identity, when validation completed before the failure.
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<UserIdentity>,
    },
}

impl ResultEnvelope {
    /// Envelope for a completed backend call.
    pub fn success(user: UserIdentity, backend_response: BackendResponse) -> Self {
        let message = format!(
            "Successfully called backend service as {}",
            user.username.as_deref().unwrap_or("None")
        );
        Self::Success {
            user,
            backend_response,
            message,
        }
    }

    /// Envelope for a failed validation; carries no identity.
    pub fn validation_failed(error: &TokenValidationError) -> Self {
        Self::Error {
            error: EnvelopeErrorKind::TokenValidationFailed,
            message: error.to_string(),
            user: None,
        }
    }

    /// Envelope for a failed backend call made on behalf of `user`.
    pub fn backend_failed(user: UserIdentity, error: &BackendCallError) -> Self {
        Self::Error {
            error: EnvelopeErrorKind::BackendServiceFailed,
            message: error.to_string(),
            user: Some(user),
        }
    }

    /// Envelope for an unclassified failure.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Error {
            error: EnvelopeErrorKind::UnexpectedError,
            message: message.into(),
            user: None,
        }
    }

    /// Whether this envelope reports success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
