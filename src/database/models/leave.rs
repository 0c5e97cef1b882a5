use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Leave request row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Conge {
    pub id: i64,
    pub raison: String,
    pub etat_conge: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub employe_id: i64,
}

// Leave request states. A request is created pending and transitions
// once to a terminal state through the validation endpoint.
pub const ETAT_EN_ATTENTE: &str = "en attente";
pub const ETAT_VALIDEE: &str = "Validée";
pub const ETAT_REFUSEE: &str = "Refusée";
