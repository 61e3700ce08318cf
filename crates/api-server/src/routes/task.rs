//! Task API endpoints
//!
//! RESTful API for tasks and their checklist items.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use checklist_core::task::{
    ChecklistItem, ChecklistItemUpdate, NewTask, Position, Task, TaskUpdate,
};

use super::{core_error, not_found, ApiError};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            user_id: req.user_id,
            title: req.title,
            description: req.description,
            position: req.position,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateChecklistItemRequest {
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks/user/:user_id - List a user's tasks
async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .tasks()
        .get_tasks_by_user_id(&user_id)
        .await
        .map_err(core_error)?;
    Ok(Json(tasks))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = state
        .tasks()
        .create_task(req.into())
        .await
        .map_err(core_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tasks/:id - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks()
        .get_task_by_id(&id)
        .await
        .map_err(core_error)?
        .map(Json)
        .ok_or_else(|| not_found("Task not found"))
}

/// PUT /api/tasks/:id - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    state
        .tasks()
        .update_task(&id, update)
        .await
        .map_err(core_error)?
        .map(Json)
        .ok_or_else(|| not_found("Task not found"))
}

/// DELETE /api/tasks/:id - Delete a task and its checklist
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.tasks().delete_task(&id).await.map_err(core_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Task not found"))
    }
}

/// POST /api/tasks/:id/checklist - Append a checklist item
async fn add_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateChecklistItemRequest>,
) -> Result<(StatusCode, Json<ChecklistItem>), ApiError> {
    let item = state
        .tasks()
        .add_checklist_item(&id, &req.text)
        .await
        .map_err(core_error)?
        .ok_or_else(|| not_found("Task not found"))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/tasks/:id/checklist/:item_id - Update a checklist item
async fn update_checklist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(update): Json<ChecklistItemUpdate>,
) -> Result<Json<ChecklistItem>, ApiError> {
    state
        .tasks()
        .update_checklist_item(&id, &item_id, update)
        .await
        .map_err(core_error)?
        .map(Json)
        .ok_or_else(|| not_found("Task or checklist item not found"))
}

/// DELETE /api/tasks/:id/checklist/:item_id - Remove a checklist item
async fn delete_checklist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .tasks()
        .delete_checklist_item(&id, &item_id)
        .await
        .map_err(core_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Task or checklist item not found"))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/user/{user_id}", get(list_user_tasks))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/checklist", post(add_checklist_item))
        .route(
            "/api/tasks/{id}/checklist/{item_id}",
            put(update_checklist_item).delete(delete_checklist_item),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::routes::router;
    use crate::routes::testing::{empty_request, json_request, send};
    use crate::state::AppState;

    async fn create_task(app: &axum::Router, body: Value) -> Value {
        let (status, task) = send(app.clone(), json_request("POST", "/api/tasks", body)).await;
        assert_eq!(status, StatusCode::CREATED);
        task
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let app = router(AppState::in_memory());

        let task = create_task(
            &app,
            json!({
                "userId": "u1",
                "title": "Pour foundation",
                "position": { "x": 10.0, "y": 20.0 }
            }),
        )
        .await;
        assert_eq!(task["status"], "not-started");
        assert_eq!(task["checklist"], json!([]));
        assert_eq!(task["position"], json!({ "x": 10.0, "y": 20.0 }));

        let uri = format!("/api/tasks/{}", task["id"].as_str().unwrap());
        let (status, fetched) = send(app.clone(), empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, task);

        let (status, listed) = send(app, empty_request("GET", "/api/tasks/user/u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([task]));
    }

    #[tokio::test]
    async fn test_create_task_validation() {
        let app = router(AppState::in_memory());

        let (status, body) = send(
            app.clone(),
            json_request("POST", "/api/tasks", json!({ "title": "No owner" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User ID is required");

        let (status, body) = send(
            app,
            json_request("POST", "/api/tasks", json!({ "userId": "u1", "title": " " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title is required");
    }

    #[tokio::test]
    async fn test_update_and_delete_task() {
        let app = router(AppState::in_memory());
        let task = create_task(&app, json!({ "userId": "u1", "title": "Frame" })).await;
        let uri = format!("/api/tasks/{}", task["id"].as_str().unwrap());

        let (status, updated) = send(
            app.clone(),
            json_request("PUT", &uri, json!({ "status": "completed", "checklist": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["title"], "Frame");

        let (status, _) = send(app.clone(), empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(app.clone(), empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn test_checklist_endpoints() {
        let app = router(AppState::in_memory());
        let task = create_task(&app, json!({ "userId": "u1", "title": "Pour" })).await;
        let checklist_uri = format!("/api/tasks/{}/checklist", task["id"].as_str().unwrap());

        let mut item_ids = Vec::new();
        for text in ["A", "B", "C"] {
            let (status, item) = send(
                app.clone(),
                json_request("POST", &checklist_uri, json!({ "text": text })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(item["status"], "not-started");
            item_ids.push(item["id"].as_str().unwrap().to_string());
        }

        let (status, body) = send(
            app.clone(),
            json_request("POST", &checklist_uri, json!({ "text": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Checklist item text is required");

        let item_uri = format!("{}/{}", checklist_uri, item_ids[0]);
        let (status, item) = send(
            app.clone(),
            json_request("PUT", &item_uri, json!({ "status": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["status"], "completed");
        assert_eq!(item["text"], "A");

        let (status, _) = send(
            app.clone(),
            empty_request("DELETE", &format!("{}/{}", checklist_uri, item_ids[1])),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let task_uri = format!("/api/tasks/{}", task["id"].as_str().unwrap());
        let (_, task) = send(app.clone(), empty_request("GET", &task_uri)).await;
        let texts: Vec<_> = task["checklist"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["A", "C"]);

        let (status, body) = send(
            app,
            json_request(
                "PUT",
                &format!("{}/item_0_missing", checklist_uri),
                json!({ "status": "completed" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task or checklist item not found");
    }

    #[tokio::test]
    async fn test_checklist_on_unknown_task() {
        let app = router(AppState::in_memory());

        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/tasks/task_0_missing/checklist",
                json!({ "text": "Orphan" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }
}
