//! Backend REST service adapters.
//!
//! Provides a reqwest implementation of the `BackendGateway` port.

mod http_gateway;

pub use http_gateway::{DEFAULT_BACKEND_TIMEOUT, HttpBackendGateway};
