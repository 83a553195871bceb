//! Prometheus adapter for passthrough outcome metrics.
//!
//! Registers one counter on the supplied registry; the server exposes it
//! through the `/metrics` endpoint.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{PassthroughMetrics, PassthroughMetricsError, PassthroughOutcome};

/// Prometheus-backed passthrough outcome recorder.
///
/// # Metric Specification
///
/// - **Name**: `gateway_passthrough_requests_total`
/// - **Type**: Counter
/// - **Labels**:
///   - `outcome`: `success`, `token_validation_failed`,
///     `backend_service_failed`, or `unexpected_error`
///   - `reason`: snake_case error kind (for example `inactive`, `timeout`),
///     or `none`
pub struct PrometheusPassthroughMetrics {
    requests_total: CounterVec,
}

impl PrometheusPassthroughMetrics {
    /// Create and register the counter with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests_total = CounterVec::new(
            Opts::new(
                "gateway_passthrough_requests_total",
                "Total passthrough requests by outcome",
            ),
            &["outcome", "reason"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;
        Ok(Self { requests_total })
    }
}

#[async_trait]
impl PassthroughMetrics for PrometheusPassthroughMetrics {
    async fn record_outcome(
        &self,
        outcome: PassthroughOutcome,
    ) -> Result<(), PassthroughMetricsError> {
        self.requests_total
            .with_label_values(&[outcome.label(), outcome.reason()])
            .inc();
        Ok(())
    }
}
