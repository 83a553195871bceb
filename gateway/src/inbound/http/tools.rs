//! Capability discovery endpoints.
//!
//! ```text
//! GET  /slack/tools
//! POST /slack/tool-info
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, ToolInfo, ToolListing, list_tools, tool_info};

/// Body of `POST /slack/tool-info`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToolInfoRequest {
    #[schema(example = "query_backend_service")]
    pub tool_name: String,
}

/// List every tool the gateway offers.
#[utoipa::path(
    get,
    path = "/slack/tools",
    responses((status = 200, description = "Available tools", body = ToolListing)),
    tags = ["slack"],
    operation_id = "slackListTools"
)]
#[get("/tools")]
pub async fn slack_list_tools() -> web::Json<ToolListing> {
    info!("slack bot requesting tool list");
    web::Json(list_tools())
}

/// Describe one tool, or list the known names when it does not exist.
#[utoipa::path(
    post,
    path = "/slack/tool-info",
    request_body = ToolInfoRequest,
    responses(
        (status = 200, description = "Tool metadata or tool_not_found", body = ToolInfo),
        (status = 400, description = "Body is not a valid request", body = Error)
    ),
    tags = ["slack"],
    operation_id = "slackToolInfo"
)]
#[post("/tool-info")]
pub async fn slack_tool_info(payload: web::Json<ToolInfoRequest>) -> web::Json<ToolInfo> {
    info!(tool_name = %payload.tool_name, "slack bot requesting tool info");
    web::Json(tool_info(&payload.tool_name))
}
