//! Token passthrough gateway library.
//!
//! Validates OAuth access tokens presented by chat bots through RFC 7662
//! introspection and forwards them, unchanged, to backend REST services.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
