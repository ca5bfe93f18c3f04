use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    let body = ErrorBody {
        status: status.as_u16(),
        error: error.into(),
    };
    (status, Json(body)).into_response()
}

/// Upstream body handed back untouched.
pub fn json_passthrough(body: String) -> axum::response::Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map(IntoResponse::into_response)
        .unwrap_or_else(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}
