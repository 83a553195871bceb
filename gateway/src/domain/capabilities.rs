//! Discovery catalogue of the tools this gateway exposes to chat clients.
//!
//! The catalogue is a fixed table; the listing and lookup operations only
//! read it.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::{DEFAULT_BACKEND_URL, DEFAULT_ENDPOINT};

/// Name of the token passthrough tool.
pub const QUERY_BACKEND_SERVICE: &str = "query_backend_service";

const EXAMPLE_TOKEN: &str = "eyJhbGc...";

/// One accepted input of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ParameterSpec {
    fn required(kind: &str, description: impl Into<String>) -> Self {
        Self {
            kind: kind.to_owned(),
            description: description.into(),
            required: true,
            default: None,
        }
    }

    fn optional(kind: &str, description: impl Into<String>, default: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            description: description.into(),
            required: false,
            default: Some(default.to_owned()),
        }
    }
}

/// Shape of a tool's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReturnSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Sample invocation shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ToolExample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ToolExample {
    fn new(description: Option<&str>, backend_url: Option<&str>, endpoint: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_owned),
            access_token: EXAMPLE_TOKEN.to_owned(),
            backend_url: backend_url.map(str::to_owned),
            endpoint: endpoint.map(str::to_owned),
        }
    }
}

/// Metadata describing one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub returns: ReturnSpec,
    pub requires_auth: bool,
    pub example: ToolExample,
    pub local_testing_examples: Vec<ToolExample>,
}

/// Response of [`list_tools`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ToolListing {
    #[schema(example = "success")]
    pub status: String,
    pub tool_count: usize,
    pub tools: Vec<ToolDescriptor>,
    #[schema(example = "Found 1 available tools")]
    pub message: String,
}

/// Response of [`tool_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolInfo {
    /// The named tool exists.
    #[serde(rename = "success")]
    Found { tool: ToolDescriptor },
    /// No tool has that name.
    #[serde(rename = "error")]
    NotFound {
        error: String,
        message: String,
        available_tools: Vec<String>,
    },
}

fn query_backend_service() -> ToolDescriptor {
    let parameters = BTreeMap::from([
        (
            "access_token".to_owned(),
            ParameterSpec::required("string", "OAuth access token from Slack bot"),
        ),
        (
            "backend_url".to_owned(),
            ParameterSpec::optional(
                "string",
                format!(
                    "Base URL of the backend REST service (default: {DEFAULT_BACKEND_URL} - local Keycloak)"
                ),
                DEFAULT_BACKEND_URL,
            ),
        ),
        (
            "endpoint".to_owned(),
            ParameterSpec::optional(
                "string",
                format!("API endpoint path (default: {DEFAULT_ENDPOINT})"),
                DEFAULT_ENDPOINT,
            ),
        ),
    ]);

    ToolDescriptor {
        name: QUERY_BACKEND_SERVICE.to_owned(),
        description: "Query backend REST service with OAuth token from Slack bot. \
                      Validates token with Keycloak and calls backend service. \
                      Defaults to Keycloak userinfo endpoint for local testing."
            .to_owned(),
        parameters,
        returns: ReturnSpec {
            kind: "object".to_owned(),
            description: "User info and backend response data".to_owned(),
        },
        requires_auth: true,
        example: ToolExample::new(None, Some(DEFAULT_BACKEND_URL), Some(DEFAULT_ENDPOINT)),
        local_testing_examples: vec![
            ToolExample::new(Some("Get user info (default)"), None, None),
            ToolExample::new(
                Some("List users (requires admin role)"),
                Some(DEFAULT_BACKEND_URL),
                Some("/admin/realms/master/users"),
            ),
            ToolExample::new(
                Some("Get realm info (public)"),
                Some(DEFAULT_BACKEND_URL),
                Some("/realms/master"),
            ),
        ],
    }
}

fn catalogue() -> Vec<ToolDescriptor> {
    vec![query_backend_service()]
}

/// Every tool the gateway offers.
///
/// # Examples
/// ```
/// let listing = gateway::domain::list_tools();
/// assert_eq!(listing.tool_count, listing.tools.len());
/// ```
pub fn list_tools() -> ToolListing {
    let tools = catalogue();
    ToolListing {
        status: "success".to_owned(),
        tool_count: tools.len(),
        message: format!("Found {} available tools", tools.len()),
        tools,
    }
}

/// Look up one tool by exact name.
pub fn tool_info(name: &str) -> ToolInfo {
    let tools = catalogue();
    let available_tools = tools.iter().map(|tool| tool.name.clone()).collect();
    match tools.into_iter().find(|tool| tool.name == name) {
        Some(tool) => ToolInfo::Found { tool },
        None => ToolInfo::NotFound {
            error: "tool_not_found".to_owned(),
            message: format!("Tool '{name}' not found"),
            available_tools,
        },
    }
}
