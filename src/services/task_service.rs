use chrono::{Local, NaiveDate};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::{Tache, ETAT_COMPLETE};
use crate::error::ApiError;
use crate::services::employee_service;

#[derive(Debug, Deserialize)]
pub struct NewTache {
    pub title: String,
    pub description: String,
    pub etat_tache: String,
    pub date_debut: NaiveDate,
    pub deadline: NaiveDate,
    pub employe_id: i64,
}

/// Insert a task for an existing employee; `date_fin` starts NULL
pub async fn create(pool: &PgPool, input: &NewTache) -> Result<i64, ApiError> {
    employee_service::ensure_exists(pool, input.employe_id).await?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO tache (title, description, etat_tache, date_debut, date_fin, deadline, employe_id)
        VALUES ($1, $2, $3, $4, NULL, $5, $6)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.etat_tache)
    .bind(input.date_debut)
    .bind(input.deadline)
    .bind(input.employe_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Tasks for one employee. 404 only when the employee itself is missing;
/// an employee without tasks gets an empty list.
pub async fn list_for_employee(pool: &PgPool, employe_id: i64) -> Result<Vec<Tache>, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let tasks: Vec<Tache> =
        sqlx::query_as("SELECT * FROM tache WHERE employe_id = $1 ORDER BY id")
            .bind(employe_id)
            .fetch_all(pool)
            .await?;

    Ok(tasks)
}

/// Stamp a task complete with today's date. Re-invocation re-stamps.
pub async fn complete(pool: &PgPool, task_id: i64) -> Result<Tache, ApiError> {
    let task: Option<Tache> = sqlx::query_as(
        "UPDATE tache SET etat_tache = $1, date_fin = $2 WHERE id = $3 RETURNING *",
    )
    .bind(ETAT_COMPLETE)
    .bind(Local::now().date_naive())
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    task.ok_or_else(|| ApiError::not_found("Task not found"))
}
