use axum::{extract::State, Extension, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::middleware::AuthSubject;
use crate::services::employee_service::{self, RegisterInput};
use crate::state::AppState;

// One message for both unknown-email and wrong-password, so responses
// cannot be used to enumerate accounts
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// OAuth2-style form body for POST /token
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub email: String,
    pub password: String,
}

async fn authenticate(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<Employee, ApiError> {
    let employee = employee_service::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if !auth::verify_password(password, &employee.password) {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(employee)
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, ApiError> {
    let employee = authenticate(&state, &input.email, &input.password).await?;

    Ok(Json(json!({
        "message": "Authentication successful",
        "employee_id": employee.id,
        "name": employee.display_name(),
    })))
}

/// POST /auth/create - minimal self-registration
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<Value>, ApiError> {
    let employee_id = employee_service::register(&state.pool, &input).await?;

    Ok(Json(json!({
        "message": "Employee created successfully",
        "employee_id": employee_id,
    })))
}

/// POST /token - credential check plus a signed bearer token
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<Value>, ApiError> {
    let employee = authenticate(&state, &form.email, &form.password).await?;
    let access_token = auth::generate_jwt(Claims::new(employee.email))?;

    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "bearer",
    })))
}

/// GET /employees/me - profile plus role flags for the token subject
pub async fn me(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthSubject>,
) -> Result<Json<Value>, ApiError> {
    // The subject may have been deleted since the token was issued
    let employee = employee_service::find_by_email(&state.pool, &subject.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let is_admin = employee_service::is_admin(&state.pool, &employee.email).await?;

    Ok(Json(json!({
        "id": employee.id,
        "email": employee.email,
        "name": employee.display_name(),
        "is_rh": employee.rh,
        "is_admin": is_admin,
    })))
}
