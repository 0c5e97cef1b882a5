use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::config;
use crate::database::models::CheckInOut;
use crate::error::ApiError;
use crate::services::employee_service;

/// Lateness in seconds for an arrival: time elapsed since midnight when
/// the arrival is past the workday cutoff, zero otherwise.
pub fn lateness_seconds(arrival: NaiveTime, workday_start: NaiveTime) -> i64 {
    if arrival > workday_start {
        i64::from(arrival.num_seconds_from_midnight())
    } else {
        0
    }
}

/// A record counts as a delay iff it has a recorded arrival past the cutoff
pub fn is_late(arrival: Option<NaiveTime>, workday_start: NaiveTime) -> bool {
    arrival.map(|t| t > workday_start).unwrap_or(false)
}

/// Outcome of the absence bookkeeping pass for one employee
#[derive(Debug)]
pub enum AbsenceOutcome {
    Incremented { absence: i32 },
    AlreadyCheckedIn,
}

/// Per-employee delay tally for the overview endpoint
#[derive(Debug, Serialize, FromRow)]
pub struct EmployeeDelays {
    pub employee_id: i64,
    pub name: String,
    pub delays: i64,
}

/// Record a check-in for "now". Repeated same-day check-ins are not
/// rejected; each inserts a fresh record.
pub async fn check_in(pool: &PgPool, employe_id: i64) -> Result<i64, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let now = Local::now();
    let arrival = now.time();
    let retard = lateness_seconds(arrival, config::config().attendance.workday_start);

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO check_in_out (heur_arrive, heur_sortie, date, duree_retard, employe_id)
        VALUES ($1, NULL, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(arrival)
    .bind(now.date_naive())
    .bind(retard)
    .bind(employe_id)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Stamp the departure time on today's still-open record
pub async fn check_out(pool: &PgPool, employe_id: i64) -> Result<i64, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let now = Local::now();
    let record: Option<(i64,)> = sqlx::query_as(
        r#"
        UPDATE check_in_out SET heur_sortie = $1
        WHERE id = (
            SELECT id FROM check_in_out
            WHERE employe_id = $2 AND date = $3 AND heur_sortie IS NULL
            ORDER BY id
            LIMIT 1
        )
        RETURNING id
        "#,
    )
    .bind(now.time())
    .bind(employe_id)
    .bind(now.date_naive())
    .fetch_optional(pool)
    .await?;

    record
        .map(|(id,)| id)
        .ok_or_else(|| ApiError::not_found("No active check-in record found for today"))
}

/// All records for one calendar date; empty is a normal result
pub async fn records_for_date(pool: &PgPool, date: NaiveDate) -> Result<Vec<CheckInOut>, ApiError> {
    let records: Vec<CheckInOut> =
        sqlx::query_as("SELECT * FROM check_in_out WHERE date = $1 ORDER BY id")
            .bind(date)
            .fetch_all(pool)
            .await?;

    Ok(records)
}

/// One employee's attendance history, newest first
pub async fn records_for_employee(
    pool: &PgPool,
    employe_id: i64,
) -> Result<Vec<CheckInOut>, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let records: Vec<CheckInOut> = sqlx::query_as(
        "SELECT * FROM check_in_out WHERE employe_id = $1 ORDER BY date DESC, id DESC",
    )
    .bind(employe_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Increment the absence counter unless today's record carries a
/// recorded arrival. Keyed explicitly on today's date.
pub async fn mark_absence(pool: &PgPool, employe_id: i64) -> Result<AbsenceOutcome, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let today = Local::now().date_naive();
    let checked_in: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM check_in_out
            WHERE employe_id = $1 AND date = $2 AND heur_arrive IS NOT NULL
        )
        "#,
    )
    .bind(employe_id)
    .bind(today)
    .fetch_one(pool)
    .await?;

    if checked_in {
        return Ok(AbsenceOutcome::AlreadyCheckedIn);
    }

    let (absence,): (i32,) =
        sqlx::query_as("UPDATE employe SET absence = absence + 1 WHERE id = $1 RETURNING absence")
            .bind(employe_id)
            .fetch_one(pool)
            .await?;

    Ok(AbsenceOutcome::Incremented { absence })
}

/// Number of late arrivals for one employee
pub async fn delay_count(pool: &PgPool, employe_id: i64) -> Result<i64, ApiError> {
    employee_service::ensure_exists(pool, employe_id).await?;

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM check_in_out WHERE employe_id = $1 AND heur_arrive > $2",
    )
    .bind(employe_id)
    .bind(config::config().attendance.workday_start)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Delay tally for every employee, including those with no records
pub async fn delay_overview(pool: &PgPool) -> Result<Vec<EmployeeDelays>, ApiError> {
    let rows: Vec<EmployeeDelays> = sqlx::query_as(
        r#"
        SELECT e.id AS employee_id,
               COALESCE(NULLIF(BTRIM(e.prenom || ' ' || e.nom), ''), e.email) AS name,
               COUNT(c.id) FILTER (WHERE c.heur_arrive > $1) AS delays
        FROM employe e
        LEFT JOIN check_in_out c ON c.employe_id = e.id
        GROUP BY e.id, e.prenom, e.nom, e.email
        ORDER BY e.id
        "#,
    )
    .bind(config::config().attendance.workday_start)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn arrival_after_cutoff_is_late() {
        let retard = lateness_seconds(time(9, 15), time(9, 0));
        assert_eq!(retard, (9 * 60 + 15) * 60);
    }

    #[test]
    fn arrival_before_cutoff_is_on_time() {
        assert_eq!(lateness_seconds(time(8, 45), time(9, 0)), 0);
    }

    #[test]
    fn arrival_exactly_at_cutoff_is_on_time() {
        assert_eq!(lateness_seconds(time(9, 0), time(9, 0)), 0);
    }

    #[test]
    fn delay_flag_follows_cutoff() {
        assert!(is_late(Some(time(9, 1)), time(9, 0)));
        assert!(!is_late(Some(time(8, 59)), time(9, 0)));
        assert!(!is_late(None, time(9, 0)));
    }
}
