//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP endpoint together with the
//! envelope, identity, catalogue and error schemas. Swagger UI serves it in
//! debug builds and the `openapi-dump` binary prints it for tooling.

use utoipa::OpenApi;

use crate::domain::{
    EnvelopeErrorKind, Error, ErrorCode, ParameterSpec, ResultEnvelope, ReturnSpec,
    ToolDescriptor, ToolExample, ToolInfo, ToolListing, UserIdentity,
};
use crate::inbound::http::slack::{SlackHealth, SlackQueryRequest};
use crate::inbound::http::tools::ToolInfoRequest;

/// OpenAPI document for the gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Token passthrough gateway",
        description = "Validates chat-bot access tokens against an identity provider and forwards them to backend REST services."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::slack::slack_query,
        crate::inbound::http::slack::slack_health,
        crate::inbound::http::tools::slack_list_tools,
        crate::inbound::http::tools::slack_tool_info,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SlackQueryRequest,
        SlackHealth,
        ToolInfoRequest,
        ResultEnvelope,
        EnvelopeErrorKind,
        UserIdentity,
        ToolListing,
        ToolInfo,
        ToolDescriptor,
        ParameterSpec,
        ReturnSpec,
        ToolExample,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "slack", description = "Stateless endpoints for chat-bot integration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
