//! User API endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use checklist_core::user::User;

use super::{core_error, not_found, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
}

/// POST /api/users - Get the user with this name, creating it if needed
async fn create_or_get_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users()
        .create_or_get_user(&req.name)
        .await
        .map_err(core_error)?;
    Ok(Json(user))
}

/// GET /api/users/:id - Get a single user
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .users()
        .get_user_by_id(&id)
        .await
        .map_err(core_error)?
        .map(Json)
        .ok_or_else(|| not_found("User not found"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_or_get_user))
        .route("/api/users/{id}", get(get_user))
}
