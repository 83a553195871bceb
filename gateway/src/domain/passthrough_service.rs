//! Token passthrough orchestration.
//!
//! One request walks a linear path: validate the token, derive the caller's
//! identity, forward the same token to the backend, and wrap the outcome in a
//! [`ResultEnvelope`]. The backend is never contacted unless validation
//! succeeded.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tracing::{error, info, warn};

use super::ports::{
    BackendCallError, BackendGateway, BackendRequest, BackendResponse, NoOpPassthroughMetrics,
    PassthroughMetrics, PassthroughOutcome, TokenIntrospector, TokenValidationError,
};
use super::{AccessToken, IntrospectionClaims, ResultEnvelope, extract_identity};

/// Base URL used when the caller names no backend (a local identity provider).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
/// Endpoint used when the caller names none (the provider's userinfo path).
pub const DEFAULT_ENDPOINT: &str = "/realms/master/protocol/openid-connect/userinfo";

/// Domain service composing token validation and the backend call.
///
/// Stateless across requests: nothing is cached, every call re-validates.
#[derive(Clone)]
pub struct PassthroughService {
    introspector: Arc<dyn TokenIntrospector>,
    backend: Arc<dyn BackendGateway>,
    metrics: Arc<dyn PassthroughMetrics>,
}

impl PassthroughService {
    /// Build a service that discards outcome metrics.
    pub fn new(introspector: Arc<dyn TokenIntrospector>, backend: Arc<dyn BackendGateway>) -> Self {
        Self::with_metrics(introspector, backend, Arc::new(NoOpPassthroughMetrics))
    }

    /// Build a service that records each outcome on `metrics`.
    pub fn with_metrics(
        introspector: Arc<dyn TokenIntrospector>,
        backend: Arc<dyn BackendGateway>,
        metrics: Arc<dyn PassthroughMetrics>,
    ) -> Self {
        Self {
            introspector,
            backend,
            metrics,
        }
    }

    /// Validate `access_token`, call `backend_url` + `endpoint` with it using
    /// `GET`, and report the combined result.
    ///
    /// Never fails: every error, including a panicking collaborator, is
    /// returned in-band.
    pub async fn run(&self, access_token: &str, backend_url: &str, endpoint: &str) -> ResultEnvelope {
        let attempt = AssertUnwindSafe(self.execute(access_token, backend_url, endpoint))
            .catch_unwind()
            .await;
        let (envelope, outcome) = attempt.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(error = %message, "unexpected error during passthrough");
            (ResultEnvelope::unexpected(message), PassthroughOutcome::Unexpected)
        });

        if let Err(err) = self.metrics.record_outcome(outcome).await {
            warn!(error = %err, outcome = outcome.label(), "failed to record passthrough outcome");
        }
        envelope
    }

    async fn execute(
        &self,
        access_token: &str,
        backend_url: &str,
        endpoint: &str,
    ) -> (ResultEnvelope, PassthroughOutcome) {
        info!("validating access token with identity provider");
        let claims = match self.validate(access_token).await {
            Ok(validated) => validated,
            Err(err) => {
                error!(error = %err, reason = err.kind(), "token validation failed");
                return (
                    ResultEnvelope::validation_failed(&err),
                    PassthroughOutcome::ValidationFailed { reason: err.kind() },
                );
            }
        };

        let user = extract_identity(&claims);
        info!(
            username = user.username.as_deref().unwrap_or("None"),
            "token validated"
        );

        info!(backend_url, endpoint, "calling backend service");
        match self.call_backend(access_token, backend_url, endpoint).await {
            Ok(response) => (
                ResultEnvelope::success(user, response),
                PassthroughOutcome::Success,
            ),
            Err(err) => {
                error!(error = %err, reason = err.kind(), "backend service call failed");
                let reason = err.kind();
                (
                    ResultEnvelope::backend_failed(user, &err),
                    PassthroughOutcome::BackendFailed { reason },
                )
            }
        }
    }

    async fn validate(&self, raw: &str) -> Result<IntrospectionClaims, TokenValidationError> {
        let token = AccessToken::new(raw).map_err(|_| TokenValidationError::missing_token())?;
        self.introspector.validate(&token).await
    }

    async fn call_backend(
        &self,
        raw: &str,
        backend_url: &str,
        endpoint: &str,
    ) -> Result<BackendResponse, BackendCallError> {
        let request = BackendRequest::get(raw, backend_url, endpoint)?;
        self.backend.call(request).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "collaborator panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "passthrough_service_tests.rs"]
mod tests;
