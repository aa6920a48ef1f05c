use chrono::{NaiveDate, Utc};
use sqlx::MySqlPool;

use crate::model::{leave_request::LeaveRequestRow, status::LeaveStatus};

const SELECT_JOINED: &str = r#"
    SELECT
        lr.id,
        lr.employee_id,
        lr.start_date,
        lr.end_date,
        lr.reason,
        lr.status,
        lr.created_at,
        lr.updated_at,
        u.full_name AS employee_full_name,
        u.email AS employee_email
    FROM leave_requests lr
    LEFT JOIN users u ON u.id = lr.employee_id
"#;

pub async fn insert(
    pool: &MySqlPool,
    employee_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests (employee_id, start_date, end_date, reason, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .bind(LeaveStatus::Pending.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

pub async fn find_by_id(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<LeaveRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequestRow>(&format!("{SELECT_JOINED} WHERE lr.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &MySqlPool) -> Result<Vec<LeaveRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequestRow>(&format!(
        "{SELECT_JOINED} ORDER BY lr.created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn list_by_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Vec<LeaveRequestRow>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequestRow>(&format!(
        "{SELECT_JOINED} WHERE lr.employee_id = ? ORDER BY lr.created_at DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

pub async fn update_fields(
    pool: &MySqlPool,
    id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET start_date = ?, end_date = ?, reason = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Guarded transition: only a pending row is touched, so a concurrent
/// approve/reject cannot flip an already-terminal request.
pub async fn update_status(
    pool: &MySqlPool,
    id: u64,
    status: LeaveStatus,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, updated_at = ?
        WHERE id = ? AND status = 'pending'
        "#,
    )
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete(pool: &MySqlPool, id: u64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM leave_requests WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count_by_status(
    pool: &MySqlPool,
    status: LeaveStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_requests WHERE status = ?")
        .bind(status.as_str())
        .fetch_one(pool)
        .await
}
