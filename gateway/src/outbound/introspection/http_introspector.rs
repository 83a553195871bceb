//! Reqwest-backed token introspection adapter (RFC 7662).
//!
//! Owns transport details only: the form-encoded POST, timeout handling and
//! mapping of HTTP and decode failures onto `TokenValidationError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use tracing::{info, warn};

use crate::domain::ports::{TokenIntrospector, TokenValidationError};
use crate::domain::{AccessToken, IntrospectionClaims};
use crate::outbound::error_chain;

/// Timeout applied when the deployment does not choose one.
pub const DEFAULT_INTROSPECTION_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound on the configurable timeout.
pub const MAX_INTROSPECTION_TIMEOUT: Duration = Duration::from_secs(60);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Where and as whom to introspect tokens.
#[derive(Clone)]
pub struct IntrospectionEndpoint {
    /// Introspection URL; `None` leaves the adapter unconfigured.
    pub url: Option<Url>,
    /// Confidential client identifier presented to the provider.
    pub client_id: String,
    /// Confidential client secret presented to the provider.
    pub client_secret: String,
}

impl std::fmt::Debug for IntrospectionEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntrospectionEndpoint")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Token introspector that POSTs to one identity provider endpoint.
pub struct HttpTokenIntrospector {
    client: Client,
    endpoint: IntrospectionEndpoint,
}

impl HttpTokenIntrospector {
    /// Build an adapter whose requests are bounded by `timeout`, clamped to
    /// [`MAX_INTROSPECTION_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: IntrospectionEndpoint, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(clamp_timeout(timeout)).build()?;
        Ok(Self { client, endpoint })
    }

    /// Whether an introspection URL is present.
    pub fn is_configured(&self) -> bool {
        self.endpoint.url.is_some()
    }
}

#[async_trait]
impl TokenIntrospector for HttpTokenIntrospector {
    async fn validate(
        &self,
        token: &AccessToken,
    ) -> Result<IntrospectionClaims, TokenValidationError> {
        let Some(url) = self.endpoint.url.clone() else {
            return Err(TokenValidationError::configuration(
                "SSO_INTROSPECTION_URL not configured",
            ));
        };

        let form = [
            ("token", token.as_str()),
            ("client_id", self.endpoint.client_id.as_str()),
            ("client_secret", self.endpoint.client_secret.as_str()),
        ];
        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        let claims = parse_claims(body.as_ref())?;

        if !claims.is_active() {
            warn!("token validation failed: token is not active");
            return Err(TokenValidationError::inactive());
        }

        info!(username = claims.display_username(), "token validated");
        Ok(claims)
    }
}

fn clamp_timeout(timeout: Duration) -> Duration {
    if timeout.is_zero() {
        DEFAULT_INTROSPECTION_TIMEOUT
    } else {
        timeout.min(MAX_INTROSPECTION_TIMEOUT)
    }
}

fn parse_claims(body: &[u8]) -> Result<IntrospectionClaims, TokenValidationError> {
    serde_json::from_slice(body).map_err(|error| {
        warn!(%error, "introspection response is not a JSON object");
        TokenValidationError::malformed_response(error.to_string())
    })
}

const TIMEOUT_MESSAGE: &str = "introspection request timed out";

fn map_transport_error(error: reqwest::Error) -> TokenValidationError {
    let detail = if error.is_timeout() {
        TIMEOUT_MESSAGE.to_owned()
    } else {
        error_chain(&error)
    };
    warn!(error = %detail, timeout = error.is_timeout(), "introspection request failed");
    TokenValidationError::transport(detail)
}

fn map_status_error(status: StatusCode) -> TokenValidationError {
    warn!(status = status.as_u16(), "introspection endpoint rejected the request");
    TokenValidationError::transport(format!(
        "introspection endpoint returned status {}",
        status.as_u16()
    ))
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for the introspection mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero_uses_default(Duration::ZERO, DEFAULT_INTROSPECTION_TIMEOUT)]
    #[case::within_bounds(Duration::from_secs(5), Duration::from_secs(5))]
    #[case::at_ceiling(MAX_INTROSPECTION_TIMEOUT, MAX_INTROSPECTION_TIMEOUT)]
    #[case::above_ceiling(Duration::from_secs(600), MAX_INTROSPECTION_TIMEOUT)]
    fn timeout_is_clamped(#[case] requested: Duration, #[case] expected: Duration) {
        assert_eq!(clamp_timeout(requested), expected);
    }

    #[rstest]
    #[case::array(b"[1, 2]".as_slice())]
    #[case::html(b"<html>oops</html>".as_slice())]
    #[case::empty(b"".as_slice())]
    fn non_object_bodies_are_malformed(#[case] body: &[u8]) {
        let error = parse_claims(body).expect_err("body must be rejected");
        assert!(matches!(error, TokenValidationError::MalformedResponse { .. }));
    }

    #[test]
    fn object_body_decodes_even_when_inactive() {
        let claims = parse_claims(br#"{"active": false}"#).expect("decodes");
        assert!(!claims.is_active());
    }

    #[test]
    fn status_errors_are_transport_failures() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            error.to_string(),
            "Failed to validate token: introspection endpoint returned status 503"
        );
    }

    #[tokio::test]
    async fn unconfigured_adapter_fails_without_network() {
        let endpoint = IntrospectionEndpoint {
            url: None,
            client_id: "gateway".to_owned(),
            client_secret: "s3cret".to_owned(),
        };
        let introspector =
            HttpTokenIntrospector::new(endpoint, DEFAULT_INTROSPECTION_TIMEOUT).expect("client");
        assert!(!introspector.is_configured());

        let token = AccessToken::new("tok").expect("token");
        let error = introspector.validate(&token).await.expect_err("must fail");
        assert_eq!(error.to_string(), "SSO_INTROSPECTION_URL not configured");
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let endpoint = IntrospectionEndpoint {
            url: None,
            client_id: "gateway".to_owned(),
            client_secret: "s3cret".to_owned(),
        };
        assert!(!format!("{endpoint:?}").contains("s3cret"));
    }
}
