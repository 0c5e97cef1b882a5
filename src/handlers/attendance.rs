use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::attendance_service::{self, AbsenceOutcome};
use crate::state::AppState;

/// POST /check_in/:employee_id
pub async fn check_in(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let check_in_id = attendance_service::check_in(&state.pool, employee_id).await?;

    Ok(Json(json!({
        "message": "Check-in registered successfully",
        "check_in_id": check_in_id,
    })))
}

/// POST /check_out/:employee_id
pub async fn check_out(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let check_out_id = attendance_service::check_out(&state.pool, employee_id).await?;

    Ok(Json(json!({
        "message": "Check-out registered successfully",
        "check_out_id": check_out_id,
    })))
}

/// GET /check_in_out/:date - every record for one calendar date
pub async fn for_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Value>, ApiError> {
    let records = attendance_service::records_for_date(&state.pool, date).await?;
    Ok(Json(json!(records)))
}

/// GET /check_in_out/employee/:id - one employee's history, newest first
pub async fn for_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let records = attendance_service::records_for_employee(&state.pool, employee_id).await?;

    Ok(Json(json!({
        "employee_id": employee_id,
        "check_in_out_records": records,
    })))
}

/// PUT /absence/:employee_id - absence bookkeeping keyed on today
pub async fn mark_absence(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let outcome = attendance_service::mark_absence(&state.pool, employee_id).await?;

    let message = match outcome {
        AbsenceOutcome::Incremented { absence } => {
            format!("Absence incremented. Current absences: {}", absence)
        }
        AbsenceOutcome::AlreadyCheckedIn => {
            "Employee has checked in, no absence incremented".to_string()
        }
    };

    Ok(Json(json!({ "message": message })))
}

/// GET /employees/:id/delays
pub async fn delays(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let count = attendance_service::delay_count(&state.pool, employee_id).await?;

    Ok(Json(json!({
        "employee_id": employee_id,
        "delays": count,
    })))
}

/// GET /employees/delays - delay tally for the whole directory
pub async fn delays_overview(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let overview = attendance_service::delay_overview(&state.pool).await?;
    Ok(Json(json!(overview)))
}
