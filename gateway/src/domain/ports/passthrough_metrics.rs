//! Domain port for recording passthrough outcomes.
//!
//! Lets the orchestrator report what happened to each request without
//! depending on a metrics backend. Recording failures never change the
//! envelope returned to the caller.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording passthrough metrics.
    pub enum PassthroughMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "passthrough metrics exporter failed: {message}",
    }
}

/// Terminal state of one passthrough request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughOutcome {
    /// Token validated and backend answered.
    Success,
    /// Token validation failed; `reason` is the error kind.
    ValidationFailed {
        /// Snake_case validation error kind.
        reason: &'static str,
    },
    /// Backend call failed after validation; `reason` is the error kind.
    BackendFailed {
        /// Snake_case backend error kind.
        reason: &'static str,
    },
    /// A port panicked.
    Unexpected,
}

impl PassthroughOutcome {
    /// Label for the outcome dimension.
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ValidationFailed { .. } => "token_validation_failed",
            Self::BackendFailed { .. } => "backend_service_failed",
            Self::Unexpected => "unexpected_error",
        }
    }

    /// Label for the reason dimension; `none` when not applicable.
    pub fn reason(self) -> &'static str {
        match self {
            Self::ValidationFailed { reason } | Self::BackendFailed { reason } => reason,
            Self::Success | Self::Unexpected => "none",
        }
    }
}

/// Metrics recording port for passthrough outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassthroughMetrics: Send + Sync {
    /// Record the terminal state of one request.
    async fn record_outcome(
        &self,
        outcome: PassthroughOutcome,
    ) -> Result<(), PassthroughMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPassthroughMetrics;

#[async_trait]
impl PassthroughMetrics for NoOpPassthroughMetrics {
    async fn record_outcome(
        &self,
        _outcome: PassthroughOutcome,
    ) -> Result<(), PassthroughMetricsError> {
        Ok(())
    }
}
