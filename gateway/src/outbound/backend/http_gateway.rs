//! Reqwest-backed backend gateway.
//!
//! Sends one request per call with the caller's token as the bearer
//! credential and classifies the response. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use tracing::{error, info};

use crate::domain::ports::{
    BackendCallError, BackendGateway, BackendMethod, BackendRequest, BackendResponse,
};
use crate::outbound::error_chain;

/// Per-call timeout applied when the deployment does not choose one.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend gateway holding one pooled reqwest client.
pub struct HttpBackendGateway {
    client: Client,
}

impl HttpBackendGateway {
    /// Build a gateway whose calls are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn call(&self, request: BackendRequest) -> Result<BackendResponse, BackendCallError> {
        let url = request.url();
        let method = request.method;
        let parsed = Url::parse(&url).map_err(|err| {
            error!(%method, url = %url, error = %err, "backend URL is invalid");
            BackendCallError::transport(format!("invalid URL {url}: {err}"))
        })?;
        let headers = build_headers(&request)?;

        let mut builder = self
            .client
            .request(to_reqwest_method(method), parsed)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| map_transport_error(method, &url, err))?;
        let status = response.status();
        info!(%method, url = %url, status = status.as_u16(), "backend service request");

        let body = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(method, &url, err))?;
        classify(status, body.as_ref())
    }
}

fn to_reqwest_method(method: BackendMethod) -> Method {
    match method {
        BackendMethod::Get => Method::GET,
        BackendMethod::Post => Method::POST,
        BackendMethod::Put => Method::PUT,
        BackendMethod::Patch => Method::PATCH,
        BackendMethod::Delete => Method::DELETE,
    }
}

/// Caller headers first, then the bearer credential, which replaces any
/// caller `Authorization` regardless of case.
fn build_headers(request: &BackendRequest) -> Result<HeaderMap, BackendCallError> {
    let mut headers = HeaderMap::with_capacity(request.headers.len() + 1);
    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
            BackendCallError::transport(format!("invalid header name {name:?}: {err}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            BackendCallError::transport(format!("invalid value for header {name}: {err}"))
        })?;
        headers.insert(name, value);
    }

    let mut bearer = HeaderValue::from_str(&request.access_token.bearer()).map_err(|_| {
        BackendCallError::transport("access token contains characters not allowed in a header")
    })?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

fn classify(status: StatusCode, body: &[u8]) -> Result<BackendResponse, BackendCallError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(BackendCallError::authentication()),
        StatusCode::FORBIDDEN => Err(BackendCallError::authorization()),
        _ if status.as_u16() >= 400 => {
            Err(BackendCallError::request(status.as_u16(), error_detail(body)))
        }
        _ => Ok(match serde_json::from_slice::<Value>(body) {
            Ok(value) => BackendResponse::Json(value),
            Err(_) => BackendResponse::RawText {
                content: String::from_utf8_lossy(body).into_owned(),
                status_code: status.as_u16(),
            },
        }),
    }
}

fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn map_transport_error(method: BackendMethod, url: &str, err: reqwest::Error) -> BackendCallError {
    if err.is_timeout() {
        error!(%method, url, "backend service timeout");
        BackendCallError::timeout(url)
    } else {
        let detail = error_chain(&err);
        error!(%method, url, error = %detail, "backend service request error");
        BackendCallError::transport(detail)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network classification helpers.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn request() -> BackendRequest {
        BackendRequest::get("tok-1", "http://backend.test", "/me").expect("request")
    }

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, "authentication")]
    #[case::forbidden(StatusCode::FORBIDDEN, "authorization")]
    #[case::not_found(StatusCode::NOT_FOUND, "request")]
    #[case::server_error(StatusCode::BAD_GATEWAY, "request")]
    fn error_statuses_are_classified(#[case] status: StatusCode, #[case] expected: &str) {
        let error = classify(status, b"{}").expect_err("status must fail");
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn request_error_carries_compact_json_detail() {
        let error = classify(StatusCode::INTERNAL_SERVER_ERROR, b"{ \"error\" : \"boom\" }")
            .expect_err("500 must fail");
        assert_eq!(
            error.to_string(),
            "Backend service error: 500 - {\"error\":\"boom\"}"
        );
    }

    #[test]
    fn request_error_falls_back_to_raw_text() {
        let error = classify(StatusCode::NOT_FOUND, b"no such page").expect_err("404 must fail");
        assert_eq!(error.to_string(), "Backend service error: 404 - no such page");
    }

    #[rstest]
    #[case::ok(StatusCode::OK)]
    #[case::redirect(StatusCode::FOUND)]
    fn json_bodies_are_decoded(#[case] status: StatusCode) {
        let response = classify(status, br#"{"id": 1}"#).expect("success");
        assert_eq!(response, BackendResponse::Json(json!({"id": 1})));
    }

    #[test]
    fn non_json_bodies_become_raw_text() {
        let response = classify(StatusCode::OK, b"pong").expect("success");
        assert_eq!(
            response,
            BackendResponse::RawText {
                content: "pong".to_owned(),
                status_code: 200,
            }
        );
    }

    #[test]
    fn bearer_replaces_caller_authorization_case_insensitively() {
        let mut request = request();
        request
            .headers
            .insert("authorization".to_owned(), "Basic abc".to_owned());
        request
            .headers
            .insert("X-Request-Source".to_owned(), "slack".to_owned());

        let headers = build_headers(&request).expect("headers");

        let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec![&HeaderValue::from_static("Bearer tok-1")]);
        assert_eq!(headers.get("x-request-source").map(HeaderValue::as_bytes), Some(&b"slack"[..]));
    }

    #[test]
    fn invalid_caller_header_is_a_transport_error() {
        let mut request = request();
        request
            .headers
            .insert("bad header".to_owned(), "x".to_owned());
        let error = build_headers(&request).expect_err("invalid name");
        assert_eq!(error.kind(), "transport");
    }

    #[tokio::test]
    async fn unparsable_url_is_a_transport_error() {
        let gateway = HttpBackendGateway::new(DEFAULT_BACKEND_TIMEOUT).expect("client");
        let request = BackendRequest::get("tok", "not a url", "x").expect("request");
        let error = gateway.call(request).await.expect_err("must fail");
        assert_eq!(error.kind(), "transport");
    }
}
