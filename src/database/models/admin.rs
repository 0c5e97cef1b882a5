use serde::Serialize;
use sqlx::FromRow;

/// Admin identity, looked up by email to answer "is this employee an admin"
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
}
