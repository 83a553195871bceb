//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_gateway;
mod passthrough_metrics;
mod token_introspector;

#[cfg(test)]
pub use backend_gateway::MockBackendGateway;
pub use backend_gateway::{
    BackendCallError, BackendGateway, BackendMethod, BackendRequest, BackendResponse, join_url,
};
#[cfg(test)]
pub use passthrough_metrics::MockPassthroughMetrics;
pub use passthrough_metrics::{
    NoOpPassthroughMetrics, PassthroughMetrics, PassthroughMetricsError, PassthroughOutcome,
};
#[cfg(test)]
pub use token_introspector::MockTokenIntrospector;
pub use token_introspector::{TokenIntrospector, TokenValidationError};
