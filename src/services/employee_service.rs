use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth;
use crate::database::models::Employee;
use crate::error::ApiError;

/// Minimal self-registration payload
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Full profile used by the admin creation path
#[derive(Debug, Deserialize)]
pub struct NewEmployee {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    pub date_naiss: Option<NaiveDate>,
    pub lieu_naiss: Option<String>,
    pub jour_conge: Option<i32>,
    pub departement_id: Option<i64>,
    pub rh: Option<bool>,
}

/// Partial update: absent fields leave the stored value untouched
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub date_naiss: Option<NaiveDate>,
    pub lieu_naiss: Option<String>,
    pub jour_conge: Option<i32>,
    pub departement_id: Option<i64>,
    pub rh: Option<bool>,
}

/// Self-registration: hash the password and insert with profile defaults
pub async fn register(pool: &PgPool, input: &RegisterInput) -> Result<i64, ApiError> {
    let hash = auth::hash_password(&input.password)?;

    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO employe (email, password) VALUES ($1, $2) RETURNING id")
            .bind(&input.email)
            .bind(&hash)
            .fetch_one(pool)
            .await?;

    Ok(id)
}

/// Admin creation path: full profile, `rh` defaults to true when omitted
pub async fn create(pool: &PgPool, input: &NewEmployee) -> Result<i64, ApiError> {
    let hash = auth::hash_password(&input.password)?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO employe (
            nom, prenom, email, password, date_naiss, lieu_naiss,
            jour_conge, departement_id, rh
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&input.nom)
    .bind(&input.prenom)
    .bind(&input.email)
    .bind(&hash)
    .bind(input.date_naiss)
    .bind(&input.lieu_naiss)
    .bind(input.jour_conge.unwrap_or(0))
    .bind(input.departement_id)
    .bind(input.rh.unwrap_or(true))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Apply only the supplied fields and return the updated row
pub async fn update(pool: &PgPool, id: i64, input: &UpdateEmployee) -> Result<Employee, ApiError> {
    let employee: Option<Employee> = sqlx::query_as(
        r#"
        UPDATE employe SET
            nom = COALESCE($1, nom),
            prenom = COALESCE($2, prenom),
            email = COALESCE($3, email),
            date_naiss = COALESCE($4, date_naiss),
            lieu_naiss = COALESCE($5, lieu_naiss),
            jour_conge = COALESCE($6, jour_conge),
            departement_id = COALESCE($7, departement_id),
            rh = COALESCE($8, rh)
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(&input.nom)
    .bind(&input.prenom)
    .bind(&input.email)
    .bind(input.date_naiss)
    .bind(&input.lieu_naiss)
    .bind(input.jour_conge)
    .bind(input.departement_id)
    .bind(input.rh)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    employee.ok_or_else(|| ApiError::not_found("Employee not found"))
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Employee, ApiError> {
    let employee: Option<Employee> = sqlx::query_as("SELECT * FROM employe WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    employee.ok_or_else(|| ApiError::not_found("Employee not found"))
}

pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, ApiError> {
    let employees: Vec<Employee> = sqlx::query_as("SELECT * FROM employe ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(employees)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Employee>, ApiError> {
    let employee: Option<Employee> = sqlx::query_as("SELECT * FROM employe WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(employee)
}

/// 404 guard shared by the task and attendance services
pub async fn ensure_exists(pool: &PgPool, id: i64) -> Result<(), ApiError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employe WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(ApiError::not_found("Employee not found"))
    }
}

/// True iff an admin row exists for that email
pub async fn is_admin(pool: &PgPool, email: &str) -> Result<bool, ApiError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admin WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}
