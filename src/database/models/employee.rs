use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Employee row. The bcrypt hash is selected for credential checks but
/// never serialized into responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub date_naiss: Option<NaiveDate>,
    pub lieu_naiss: Option<String>,
    pub jour_conge: i32,
    pub departement_id: Option<i64>,
    pub rh: bool,
    pub absence: i32,
}

impl Employee {
    /// Display name used in login and absence responses. Self-registered
    /// accounts start with empty name fields, so fall back to the email
    /// rather than rendering stray spaces.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.prenom, self.nom);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee {
            id: 1,
            nom: "Martin".to_string(),
            prenom: "Claire".to_string(),
            email: "claire@example.com".to_string(),
            password: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            date_naiss: None,
            lieu_naiss: None,
            jour_conge: 25,
            departement_id: None,
            rh: false,
            absence: 0,
        }
    }

    #[test]
    fn display_name_is_prenom_then_nom() {
        assert_eq!(employee().display_name(), "Claire Martin");
    }

    #[test]
    fn display_name_trims_missing_name_parts() {
        let mut e = employee();
        e.nom = String::new();
        assert_eq!(e.display_name(), "Claire");
    }

    #[test]
    fn display_name_falls_back_to_email_for_blank_profile() {
        let mut e = employee();
        e.nom = String::new();
        e.prenom = String::new();
        assert_eq!(e.display_name(), "claire@example.com");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(employee()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "claire@example.com");
    }
}
