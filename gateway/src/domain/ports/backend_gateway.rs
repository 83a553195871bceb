//! Driven port for forwarding a request to the backend REST service.
//!
//! The domain owns the request shape and the success/fallback response
//! contract; adapters own the wire.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use super::define_port_error;
use crate::domain::{AccessToken, AccessTokenValidationError};

/// HTTP verb used for the backend call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BackendMethod {
    /// `GET`, used by the passthrough entry point.
    #[default]
    Get,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

impl BackendMethod {
    /// Upper-case verb as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for BackendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One backend call.
///
/// `headers` are merged under the bearer credential: a caller-supplied
/// `Authorization` header is always replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// Token forwarded as the bearer credential.
    pub access_token: AccessToken,
    /// Backend base URL; a trailing slash is ignored.
    pub base_url: String,
    /// Endpoint path; a leading slash is ignored.
    pub endpoint: String,
    /// HTTP verb.
    pub method: BackendMethod,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl BackendRequest {
    /// Build a `GET` request with no extra options.
    ///
    /// # Errors
    ///
    /// Returns [`BackendCallError::MissingToken`] when `access_token` is
    /// empty, before any adapter is involved.
    pub fn get(
        access_token: &str,
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, BackendCallError> {
        Ok(Self {
            access_token: AccessToken::new(access_token)?,
            base_url: base_url.into(),
            endpoint: endpoint.into(),
            method: BackendMethod::Get,
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        })
    }

    /// Absolute URL: base without trailing `/`, one `/`, endpoint without
    /// leading `/`.
    ///
    /// # Examples
    /// ```
    /// use gateway::domain::ports::BackendRequest;
    ///
    /// let request = BackendRequest::get("t", "http://x/", "/y").expect("token");
    /// assert_eq!(request.url(), "http://x/y");
    /// ```
    pub fn url(&self) -> String {
        join_url(&self.base_url, &self.endpoint)
    }
}

/// Join a base URL and an endpoint path with exactly one separating slash.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Backend payload embedded verbatim in the result envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendResponse {
    /// Body decoded as JSON.
    Json(Value),
    /// Body that was not valid JSON.
    RawText {
        /// Raw response text.
        content: String,
        /// HTTP status of the response.
        status_code: u16,
    },
}

impl Serialize for BackendResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::RawText {
                content,
                status_code,
            } => json!({ "content": content, "status_code": status_code }).serialize(serializer),
        }
    }
}

define_port_error! {
    /// Reasons a backend call failed.
    pub enum BackendCallError {
        /// The caller supplied no token.
        MissingToken => "Access token is required",
        /// Backend answered 401.
        Authentication =>
            "Backend service authentication failed - token may be invalid",
        /// Backend answered 403.
        Authorization =>
            "Backend service authorization failed - insufficient permissions",
        /// Backend answered with another status of 400 or above.
        Request { status: u16, detail: String } =>
            "Backend service error: {status} - {detail}",
        /// The call exceeded the client timeout.
        Timeout { url: String } => "Backend service timeout: {url}",
        /// Connection or protocol failure before a response arrived.
        Transport { message: String } => "Backend service request failed: {message}",
    }
}

impl From<AccessTokenValidationError> for BackendCallError {
    fn from(_: AccessTokenValidationError) -> Self {
        Self::MissingToken
    }
}

/// Port for forwarding one request to the backend.
///
/// Requests always carry a non-empty token: [`BackendRequest::get`] rejects an
/// empty one with [`BackendCallError::MissingToken`] before any adapter runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Perform exactly one attempt of `request`.
    async fn call(&self, request: BackendRequest) -> Result<BackendResponse, BackendCallError>;
}
