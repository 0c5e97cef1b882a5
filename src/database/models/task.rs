use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Task row. `date_fin` stays NULL until the task is marked complete.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tache {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub etat_tache: String,
    pub date_debut: NaiveDate,
    pub date_fin: Option<NaiveDate>,
    pub deadline: NaiveDate,
    pub employe_id: i64,
}

/// Terminal task state stamped by the completion endpoint
pub const ETAT_COMPLETE: &str = "complete";
