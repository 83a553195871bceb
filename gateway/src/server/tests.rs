//! Tests for the application factory routing.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::Value;

use super::build_app;
use gateway::domain::PassthroughService;
use gateway::inbound::http::health::HealthState;
use gateway::inbound::http::state::HttpState;
use gateway::outbound::backend::{DEFAULT_BACKEND_TIMEOUT, HttpBackendGateway};
use gateway::outbound::introspection::{
    DEFAULT_INTROSPECTION_TIMEOUT, HttpTokenIntrospector, IntrospectionEndpoint,
};

fn http_state() -> web::Data<HttpState> {
    let introspector = HttpTokenIntrospector::new(
        IntrospectionEndpoint {
            url: None,
            client_id: String::new(),
            client_secret: String::new(),
        },
        DEFAULT_INTROSPECTION_TIMEOUT,
    )
    .expect("introspector");
    let backend = HttpBackendGateway::new(DEFAULT_BACKEND_TIMEOUT).expect("backend");
    web::Data::new(HttpState::new(PassthroughService::new(
        Arc::new(introspector),
        Arc::new(backend),
    )))
}

#[actix_web::test]
async fn unconfigured_gateway_reports_configuration_error_in_band() {
    let app = test::init_service(build_app(web::Data::new(HealthState::new()), http_state())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/slack/query")
            .set_json(serde_json::json!({"access_token": "tok"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "token_validation_failed");
    assert_eq!(body["message"], "SSO_INTROSPECTION_URL not configured");
}

#[actix_web::test]
async fn unknown_routes_return_json_not_found() {
    let app = test::init_service(build_app(web::Data::new(HealthState::new()), http_state())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let trace_id = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["traceId"], Value::String(trace_id));
}
