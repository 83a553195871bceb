//! OAuth 2.0 token introspection adapters.
//!
//! Provides a reqwest implementation of the `TokenIntrospector` port.

mod http_introspector;

pub use http_introspector::{
    DEFAULT_INTROSPECTION_TIMEOUT, HttpTokenIntrospector, IntrospectionEndpoint,
    MAX_INTROSPECTION_TIMEOUT,
};
