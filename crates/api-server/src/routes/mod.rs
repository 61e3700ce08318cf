//! Route handlers

pub mod health;
pub mod task;
pub mod user;

use axum::{http::StatusCode, Json, Router};
use serde::Serialize;

use checklist_core::Error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn not_found(message: &str) -> ApiError {
    error_response(StatusCode::NOT_FOUND, message)
}

/// Map a core error to a response. Validation failures are the caller's
/// fault; anything else is reported as an internal error.
pub fn core_error(err: Error) -> ApiError {
    match err {
        Error::InvalidInput(message) => error_response(StatusCode::BAD_REQUEST, message),
        err => {
            tracing::error!(error = %err, "request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// All API routes bound to the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(user::router())
        .merge(task::router())
        .with_state(state)
}
