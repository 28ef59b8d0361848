use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::models::*;
use crate::session::Session;
use crate::store::TaskError;

// ============================================================
// Error Handling
// ============================================================

/// Task validation errors are safe to expose and map to BAD_REQUEST.
fn validation_error(e: TaskError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Session
// ============================================================

pub async fn get_session(State(session): State<Session>) -> Json<SessionView> {
    Json(session.view())
}

// ============================================================
// Tasks
// ============================================================

pub async fn list_tasks(State(session): State<Session>) -> Json<Vec<Task>> {
    Json(session.tasks())
}

pub async fn create_task(
    State(session): State<Session>,
    Json(input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    session
        .add_task(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(validation_error)
}

pub async fn toggle_task(
    State(session): State<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    session
        .toggle_task(id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

/// Deleting an unknown task is not an error; the store is simply unchanged.
pub async fn delete_task(State(session): State<Session>, Path(id): Path<Uuid>) -> StatusCode {
    session.delete_task(id);
    StatusCode::NO_CONTENT
}

// ============================================================
// Analysis
// ============================================================

/// Run one analysis and return the session as it stands afterwards.
///
/// A failed analysis is still a 200: the view carries the error message and
/// the empty analysis.
pub async fn refresh_analysis(State(session): State<Session>) -> Json<SessionView> {
    Json(session.refresh_analysis().await)
}
