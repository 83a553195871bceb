//! Domain primitives and the passthrough service.
//!
//! Purpose: hold the transport-agnostic core of the gateway. Adapters talk to
//! identity providers and backends through the traits in [`ports`]; nothing in
//! this module knows about HTTP clients or servers.
//!
//! Public surface:
//! - AccessToken: opaque bearer credential, never logged.
//! - IntrospectionClaims / UserIdentity / extract_identity: claim mapping.
//! - ResultEnvelope: the in-band outcome of one passthrough request.
//! - PassthroughService: validate, then forward.
//! - list_tools / tool_info: capability discovery.
//! - Error / ErrorCode: request-level failures for inbound adapters.
//! - TraceId: request correlation identifier.

pub mod access_token;
pub mod capabilities;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod passthrough_service;
pub mod ports;
pub mod trace_id;

pub use self::access_token::{AccessToken, AccessTokenValidationError};
pub use self::capabilities::{
    ParameterSpec, QUERY_BACKEND_SERVICE, ReturnSpec, ToolDescriptor, ToolExample, ToolInfo,
    ToolListing, list_tools, tool_info,
};
pub use self::envelope::{EnvelopeErrorKind, ResultEnvelope};
pub use self::error::{Error, ErrorCode};
pub use self::identity::{IntrospectionClaims, UserIdentity, extract_identity};
pub use self::passthrough_service::{DEFAULT_BACKEND_URL, DEFAULT_ENDPOINT, PassthroughService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
