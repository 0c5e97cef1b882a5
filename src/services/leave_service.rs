use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Conge, Employee, ETAT_EN_ATTENTE, ETAT_REFUSEE, ETAT_VALIDEE};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LeaveRequest {
    pub raison: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct LeaveReceipt {
    pub conge_id: i64,
    pub etat_conge: String,
    pub remaining_days: i32,
}

/// Leave duration in days, inclusive of both endpoints
pub fn leave_duration(date_debut: NaiveDate, date_fin: NaiveDate) -> i64 {
    (date_fin - date_debut).num_days() + 1
}

/// Submit a leave request. The balance is decremented here, once;
/// validation later only flips the state.
pub async fn request(
    pool: &PgPool,
    employe_id: i64,
    input: &LeaveRequest,
) -> Result<LeaveReceipt, ApiError> {
    let mut tx = pool.begin().await?;

    let employee: Option<Employee> = sqlx::query_as("SELECT * FROM employe WHERE id = $1")
        .bind(employe_id)
        .fetch_optional(&mut *tx)
        .await?;
    let employee = employee.ok_or_else(|| ApiError::not_found("Employee not found"))?;

    if employee.jour_conge == 0 {
        return Err(ApiError::bad_request("No remaining vacation days"));
    }

    let duration = leave_duration(input.date_debut, input.date_fin);
    if duration <= 0 {
        return Err(ApiError::bad_request("Invalid date range for the vacation"));
    }
    if duration > i64::from(employee.jour_conge) {
        return Err(ApiError::bad_request(format!(
            "Insufficient vacation days. You have only {} day(s) left.",
            employee.jour_conge
        )));
    }

    sqlx::query("UPDATE employe SET jour_conge = jour_conge - $1 WHERE id = $2")
        .bind(duration as i32)
        .bind(employe_id)
        .execute(&mut *tx)
        .await?;

    let (conge_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO conge (raison, etat_conge, date_debut, date_fin, employe_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&input.raison)
    .bind(ETAT_EN_ATTENTE)
    .bind(input.date_debut)
    .bind(input.date_fin)
    .bind(employe_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(LeaveReceipt {
        conge_id,
        etat_conge: ETAT_EN_ATTENTE.to_string(),
        remaining_days: employee.jour_conge - duration as i32,
    })
}

/// Approve or refuse a pending request. Pure state transition: the
/// balance was already debited at submission time.
pub async fn validate(
    pool: &PgPool,
    conge_id: i64,
    approve: bool,
) -> Result<&'static str, ApiError> {
    let status = if approve { ETAT_VALIDEE } else { ETAT_REFUSEE };

    let updated = sqlx::query("UPDATE conge SET etat_conge = $1 WHERE id = $2")
        .bind(status)
        .bind(conge_id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::not_found("Vacation request not found"));
    }

    Ok(status)
}

/// All requests still waiting for a decision; empty is a normal result
pub async fn pending(pool: &PgPool) -> Result<Vec<Conge>, ApiError> {
    let demandes: Vec<Conge> =
        sqlx::query_as("SELECT * FROM conge WHERE etat_conge = $1 ORDER BY id")
            .bind(ETAT_EN_ATTENTE)
            .fetch_all(pool)
            .await?;

    Ok(demandes)
}
