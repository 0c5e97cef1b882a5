use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::employee_service::{self, NewEmployee, UpdateEmployee};
use crate::state::AppState;

/// POST /add_user - admin creation path with a full profile
pub async fn add_user(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> Result<Json<Value>, ApiError> {
    let employee_id = employee_service::create(&state.pool, &input).await?;

    Ok(Json(json!({
        "message": "Employee added successfully",
        "employee_id": employee_id,
    })))
}

/// GET /employees
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let employees = employee_service::list(&state.pool).await?;
    Ok(Json(json!({ "employees": employees })))
}

/// GET /employee/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let employee = employee_service::get(&state.pool, id).await?;
    Ok(Json(json!({ "employee": employee })))
}

/// PUT /employee/:id - partial update, absent fields are no-ops
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateEmployee>,
) -> Result<Json<Value>, ApiError> {
    let employee = employee_service::update(&state.pool, id, &input).await?;

    Ok(Json(json!({
        "message": "Employee information updated successfully",
        "employee": employee,
    })))
}

/// GET /employees/:id/absences
pub async fn absences(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let employee = employee_service::get(&state.pool, id).await?;

    Ok(Json(json!({
        "employee_id": employee.id,
        "name": employee.display_name(),
        "absences": employee.absence,
    })))
}

/// GET /employees/absences - absence counters for the whole directory
pub async fn absences_overview(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let employees = employee_service::list(&state.pool).await?;

    let overview: Vec<Value> = employees
        .iter()
        .map(|e| {
            json!({
                "employee_id": e.id,
                "name": e.display_name(),
                "absences": e.absence,
            })
        })
        .collect();

    Ok(Json(json!(overview)))
}
