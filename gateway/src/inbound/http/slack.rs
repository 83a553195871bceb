//! Stateless REST endpoints for chat-bot integration.
//!
//! ```text
//! POST /slack/query
//! GET  /slack/health
//! ```
//!
//! Passthrough failures are reported inside the `200` envelope; only a body
//! that cannot be decoded produces an HTTP error.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{DEFAULT_BACKEND_URL, DEFAULT_ENDPOINT, Error, ResultEnvelope};
use crate::inbound::http::state::HttpState;

/// Body of `POST /slack/query`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SlackQueryRequest {
    /// Bearer token the bot obtained for its user.
    #[schema(example = "eyJhbGc...")]
    pub access_token: String,
    /// Backend base URL.
    #[serde(default = "default_backend_url")]
    #[schema(example = "http://localhost:8080")]
    pub backend_url: String,
    /// Endpoint path on the backend.
    #[serde(default = "default_endpoint")]
    #[schema(example = "/realms/master/protocol/openid-connect/userinfo")]
    pub endpoint: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_owned()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

/// Body of `GET /slack/health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SlackHealth {
    #[schema(example = "healthy")]
    pub status: &'static str,
    #[schema(example = "slack-integration-api")]
    pub service: &'static str,
    #[schema(example = "Ready for Slack bot requests")]
    pub message: &'static str,
}

/// Validate the caller's token and forward it to the backend.
#[utoipa::path(
    post,
    path = "/slack/query",
    description = "Validate the access token with the identity provider, then call the backend with the same token.",
    request_body = SlackQueryRequest,
    responses(
        (status = 200, description = "Passthrough outcome, success or error", body = ResultEnvelope),
        (status = 400, description = "Body is not a valid query", body = Error)
    ),
    tags = ["slack"],
    operation_id = "slackQuery"
)]
#[post("/query")]
pub async fn slack_query(
    state: web::Data<HttpState>,
    payload: web::Json<SlackQueryRequest>,
) -> HttpResponse {
    let SlackQueryRequest {
        access_token,
        backend_url,
        endpoint,
    } = payload.into_inner();
    info!(endpoint = %endpoint, "slack bot query");
    let envelope = state
        .passthrough
        .run(&access_token, &backend_url, &endpoint)
        .await;
    HttpResponse::Ok().json(envelope)
}

/// Integration-specific health check.
#[utoipa::path(
    get,
    path = "/slack/health",
    responses((status = 200, description = "Integration is up", body = SlackHealth)),
    tags = ["slack"],
    operation_id = "slackHealth"
)]
#[get("/health")]
pub async fn slack_health() -> web::Json<SlackHealth> {
    web::Json(SlackHealth {
        status: "healthy",
        service: "slack-integration-api",
        message: "Ready for Slack bot requests",
    })
}

#[cfg(test)]
#[path = "slack_tests.rs"]
mod tests;
