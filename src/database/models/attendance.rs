use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

/// Attendance row: one check-in (and eventually its check-out) per day.
/// `duree_retard` is the lateness in whole seconds, zero when on time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CheckInOut {
    pub id: i64,
    pub heur_arrive: Option<NaiveTime>,
    pub heur_sortie: Option<NaiveTime>,
    pub date: NaiveDate,
    pub duree_retard: i64,
    pub employe_id: i64,
}
