use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::leave_service::{self, LeaveRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub validation: bool,
}

/// POST /conge/request/:employee_id
pub async fn request(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Json(input): Json<LeaveRequest>,
) -> Result<Json<Value>, ApiError> {
    let receipt = leave_service::request(&state.pool, employee_id, &input).await?;

    Ok(Json(json!({
        "message": "Vacation request submitted successfully",
        "etat_conge": receipt.etat_conge,
        "remaining_days": receipt.remaining_days,
    })))
}

/// PUT /conge/validate/:id?validation=bool
pub async fn validate(
    State(state): State<AppState>,
    Path(conge_id): Path<i64>,
    Query(query): Query<ValidateQuery>,
) -> Result<Json<Value>, ApiError> {
    let status = leave_service::validate(&state.pool, conge_id, query.validation).await?;

    Ok(Json(json!({
        "message": format!("Vacation request {} successfully", status),
        "conge_id": conge_id,
    })))
}

/// GET /conges/demandes - all pending requests, empty list included
pub async fn pending(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let demandes = leave_service::pending(&state.pool).await?;
    Ok(Json(json!({ "demandes": demandes })))
}
