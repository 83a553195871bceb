//! HTTP adapter mapping for request-level errors.
//!
//! Keeps the domain error type HTTP agnostic while giving Actix handlers one
//! consistent JSON error shape and status mapping. Passthrough outcomes do not
//! flow through here; they are always `200` with an in-band envelope.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode, web};
use tracing::warn;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

fn reject_json(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected request body");
    Error::invalid_request(format!("Invalid request body: {err}")).into()
}

/// JSON extractor configuration that answers malformed bodies with the
/// standard error payload and `400`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_json)
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!("No route for {} {}", req.method(), req.path())))
}
