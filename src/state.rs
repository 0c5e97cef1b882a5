use sqlx::PgPool;

/// Shared application state, injected into every handler through axum state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
}

impl AppState {
    pub fn new() -> Result<Self, crate::database::DatabaseError> {
        let pool = crate::database::connect()?;
        Ok(Self { pool })
    }
}
