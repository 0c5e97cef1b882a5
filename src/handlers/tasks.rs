use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::task_service::{self, NewTache};
use crate::state::AppState;

/// POST /tache/create
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewTache>,
) -> Result<Json<Value>, ApiError> {
    let tache_id = task_service::create(&state.pool, &input).await?;

    Ok(Json(json!({
        "message": "Task created successfully",
        "tache_id": tache_id,
    })))
}

/// GET /employee/:id/tasks
pub async fn list_for_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let tasks = task_service::list_for_employee(&state.pool, employee_id).await?;

    Ok(Json(json!({
        "employee_id": employee_id,
        "tasks": tasks,
    })))
}

/// PUT /task/complete/:id
pub async fn complete(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let task = task_service::complete(&state.pool, task_id).await?;

    Ok(Json(json!({
        "message": "Task marked as complete successfully",
        "task_id": task.id,
        "title": task.title,
        "etat_tache": task.etat_tache,
        "date_fin": task.date_fin,
    })))
}
