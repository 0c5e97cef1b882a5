mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// End-to-end workflows against the spawned binary. These need a live
// database behind the server; each test skips itself when /health
// reports the database as unavailable.

async fn add_employee(base_url: &str, prefix: &str, jour_conge: i32) -> Result<(i64, String)> {
    let client = reqwest::Client::new();
    let email = common::unique_email(prefix);

    let res = client
        .post(format!("{}/add_user", base_url))
        .json(&json!({
            "nom": "Martin",
            "prenom": "Claire",
            "email": email,
            "password": "s3cret",
            "jour_conge": jour_conge,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let id = body["employee_id"]
        .as_i64()
        .expect("employee_id in response");
    Ok((id, email))
}

#[tokio::test]
async fn leave_request_debits_balance_and_rejects_overdraw() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (id, _) = add_employee(&server.base_url, "leave", 5).await?;

    // Three inclusive days against a balance of five
    let res = client
        .post(format!("{}/conge/request/{}", server.base_url, id))
        .json(&json!({
            "raison": "congé annuel",
            "date_debut": "2024-01-01",
            "date_fin": "2024-01-03",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["etat_conge"], "en attente");
    assert_eq!(body["remaining_days"], 2);

    // The debit must be visible on the stored profile
    let res = client
        .get(format!("{}/employee/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["employee"]["jour_conge"], 2);

    // Another three days no longer fit
    let res = client
        .post(format!("{}/conge/request/{}", server.base_url, id))
        .json(&json!({
            "raison": "congé annuel",
            "date_debut": "2024-02-01",
            "date_fin": "2024-02-03",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("2 day(s) left"),
        "unexpected message: {}",
        body["message"]
    );

    // The rejected request must not have touched the balance
    let res = client
        .get(format!("{}/employee/{}", server.base_url, id))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["employee"]["jour_conge"], 2);
    Ok(())
}

#[tokio::test]
async fn check_out_without_open_record_is_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (id, _) = add_employee(&server.base_url, "checkout", 0).await?;

    let res = client
        .post(format!("{}/check_out/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "No active check-in record found for today");
    Ok(())
}

#[tokio::test]
async fn check_in_then_check_out_closes_the_day() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (id, _) = add_employee(&server.base_url, "attendance", 0).await?;

    let res = client
        .post(format!("{}/check_in/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/check_out/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // A second check-out finds no open record left
    let res = client
        .post(format!("{}/check_out/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn completing_a_task_stamps_state_and_date() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (id, _) = add_employee(&server.base_url, "tasks", 0).await?;

    let res = client
        .post(format!("{}/tache/create", server.base_url))
        .json(&json!({
            "title": "Rapport mensuel",
            "description": "Préparer le rapport",
            "etat_tache": "en cours",
            "date_debut": "2024-01-01",
            "deadline": "2024-12-31",
            "employe_id": id,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let tache_id = body["tache_id"].as_i64().expect("tache_id in response");

    let res = client
        .put(format!("{}/task/complete/{}", server.base_url, tache_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["etat_tache"], "complete");
    assert_eq!(
        body["date_fin"],
        chrono::Local::now().date_naive().to_string()
    );
    Ok(())
}

#[tokio::test]
async fn created_employee_round_trips_without_password() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await? {
        return Ok(());
    }
    let client = reqwest::Client::new();

    let (id, email) = add_employee(&server.base_url, "roundtrip", 10).await?;

    let res = client
        .get(format!("{}/employee/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let employee = &body["employee"];
    assert_eq!(employee["id"], id);
    assert_eq!(employee["email"], email);
    assert_eq!(employee["jour_conge"], 10);
    assert!(
        employee.get("password").is_none(),
        "password hash must not be serialized"
    );
    Ok(())
}
