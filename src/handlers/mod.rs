pub mod corrections;
pub mod info;

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::corrector::Tries;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Application context passed to all handlers. The tries are built once at
/// startup and only read afterwards, so they are shared without locking.
pub struct Ctx {
    pub tries: Arc<Tries>,
    pub allowed_distances: Vec<usize>,
    pub max_lookahead: usize,
}

/// JSON response body.
pub struct ApiResp<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResp<T> {
    fn into_response(self) -> Response {
        respond(StatusCode::OK, self.0)
    }
}

pub fn json<T: Serialize>(data: T) -> ApiResp<T> {
    ApiResp(data)
}

/// API error type. Rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiErr {
    pub message: String,
    pub status: StatusCode,
}

impl ApiErr {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

#[derive(Serialize)]
struct ErrBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        respond(
            self.status,
            ErrBody {
                error: &self.message,
            },
        )
    }
}

pub type Result<T> = std::result::Result<T, ApiErr>;

fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], Json(body)).into_response()
}
