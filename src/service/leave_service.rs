use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::model::{leave_request::LeaveRequestRow, status::LeaveStatus};
use crate::repo::{leave_repo, user_repo};

pub const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    pub id: u64,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestResponse {
    pub id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
    pub employee: EmployeeInfo,
}

/// Field validation shared by create and update. The not-in-the-past rule
/// applies at creation only; an old pending request stays editable even
/// after its start date has passed.
pub fn validate_fields(
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
    reject_past_start: bool,
) -> ApiResult<()> {
    let mut errors = ValidationErrors::new();

    if reject_past_start && start_date < Utc::now().date_naive() {
        errors.add("startDate", "Start date cannot be in the past");
    }

    if end_date < start_date {
        errors.add("endDate", "End date must be on or after start date");
    }

    if reason.trim().is_empty() {
        errors.add("reason", "Reason is required");
    } else if reason.chars().count() > MAX_REASON_LEN {
        errors.add("reason", "Reason cannot exceed 500 characters");
    }

    errors.into_result()
}

pub async fn create(
    pool: &MySqlPool,
    employee_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> ApiResult<LeaveRequestResponse> {
    validate_fields(start_date, end_date, reason, true)?;

    if user_repo::find_by_id(pool, employee_id).await?.is_none() {
        return Err(ApiError::not_found("Employee"));
    }

    let id = leave_repo::insert(pool, employee_id, start_date, end_date, reason).await?;
    info!(id, employee_id, "leave request created");

    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::internal("created leave request vanished"))?;

    Ok(map_response(row))
}

pub async fn update(
    pool: &MySqlPool,
    id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> ApiResult<LeaveRequestResponse> {
    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request"))?;

    ensure_pending(row.status, "modified")?;
    validate_fields(start_date, end_date, reason, false)?;

    leave_repo::update_fields(pool, id, start_date, end_date, reason).await?;

    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request"))?;

    Ok(map_response(row))
}

pub async fn delete(pool: &MySqlPool, id: u64) -> ApiResult<()> {
    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request"))?;

    ensure_pending(row.status, "deleted")?;

    leave_repo::delete(pool, id).await?;
    info!(id, "leave request deleted");
    Ok(())
}

pub async fn approve(pool: &MySqlPool, id: u64) -> ApiResult<()> {
    transition(pool, id, LeaveStatus::Approved).await
}

pub async fn reject(pool: &MySqlPool, id: u64) -> ApiResult<()> {
    transition(pool, id, LeaveStatus::Rejected).await
}

/// Pending -> terminal, nothing else. A request that is already approved
/// or rejected is never flipped nor re-confirmed.
async fn transition(pool: &MySqlPool, id: u64, next: LeaveStatus) -> ApiResult<()> {
    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request"))?;

    if !row.status.can_transition_to(next) {
        return Err(ApiError::conflict("Leave request already processed"));
    }

    // The guarded UPDATE re-checks pending, so a racing admin loses cleanly.
    let affected = leave_repo::update_status(pool, id, next).await?;
    if affected == 0 {
        return Err(ApiError::conflict("Leave request already processed"));
    }

    info!(id, status = next.as_str(), "leave request transitioned");
    Ok(())
}

pub async fn get_by_id(pool: &MySqlPool, id: u64) -> ApiResult<LeaveRequestResponse> {
    let row = leave_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request"))?;

    Ok(map_response(row))
}

pub async fn get_all(pool: &MySqlPool) -> ApiResult<Vec<LeaveRequestResponse>> {
    let rows = leave_repo::list_all(pool).await?;
    Ok(rows.into_iter().map(map_response).collect())
}

pub async fn get_by_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> ApiResult<Vec<LeaveRequestResponse>> {
    let rows = leave_repo::list_by_employee(pool, employee_id).await?;
    Ok(rows.into_iter().map(map_response).collect())
}

pub async fn count_by_status(pool: &MySqlPool, status: LeaveStatus) -> ApiResult<i64> {
    Ok(leave_repo::count_by_status(pool, status).await?)
}

pub fn ensure_pending(status: LeaveStatus, action: &str) -> ApiResult<()> {
    if status.is_pending() {
        Ok(())
    } else {
        Err(ApiError::conflict(format!(
            "Only pending leave requests can be {action}"
        )))
    }
}

/// A missing employee join never fails the response; the caller gets an
/// explicit placeholder instead.
pub fn map_response(row: LeaveRequestRow) -> LeaveRequestResponse {
    let employee = match (row.employee_full_name, row.employee_email) {
        (Some(full_name), Some(email)) => EmployeeInfo {
            id: row.employee_id,
            full_name,
            email,
        },
        _ => EmployeeInfo {
            id: row.employee_id,
            full_name: "Unknown Employee".to_string(),
            email: "No email available".to_string(),
        },
    };

    LeaveRequestResponse {
        id: row.id,
        employee_id: row.employee_id,
        start_date: row.start_date,
        end_date: row.end_date,
        reason: row.reason,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
        employee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn row(status: LeaveStatus, employee: Option<(&str, &str)>) -> LeaveRequestRow {
        LeaveRequestRow {
            id: 7,
            employee_id: 3,
            start_date: today(),
            end_date: today(),
            reason: "Family matters".to_string(),
            status,
            created_at: Utc::now(),
            updated_at: None,
            employee_full_name: employee.map(|(n, _)| n.to_string()),
            employee_email: employee.map(|(_, e)| e.to_string()),
        }
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = validate_fields(today(), today() - Duration::days(1), "trip", false)
            .unwrap_err();
        match err {
            ApiError::Validation { errors } => {
                assert!(errors.fields.iter().any(|f| f.field == "endDate"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn single_day_leave_is_accepted() {
        assert!(validate_fields(today(), today(), "doctor visit", true).is_ok());
    }

    #[test]
    fn past_start_is_rejected_only_at_creation() {
        let yesterday = today() - Duration::days(1);
        assert!(validate_fields(yesterday, today(), "late entry", true).is_err());
        // Re-validation on update does not apply the rule.
        assert!(validate_fields(yesterday, today(), "late entry", false).is_ok());
    }

    #[test]
    fn reason_must_be_present_and_bounded() {
        assert!(validate_fields(today(), today(), "", true).is_err());
        assert!(validate_fields(today(), today(), "   ", true).is_err());

        let long = "x".repeat(MAX_REASON_LEN + 1);
        assert!(validate_fields(today(), today(), &long, true).is_err());

        let max = "x".repeat(MAX_REASON_LEN);
        assert!(validate_fields(today(), today(), &max, true).is_ok());
    }

    #[test]
    fn mutation_requires_pending() {
        assert!(ensure_pending(LeaveStatus::Pending, "modified").is_ok());
        for status in [LeaveStatus::Approved, LeaveStatus::Rejected] {
            let err = ensure_pending(status, "modified").unwrap_err();
            assert!(matches!(err, ApiError::Conflict { .. }));
        }
    }

    #[test]
    fn response_carries_employee_summary() {
        let resp = map_response(row(
            LeaveStatus::Pending,
            Some(("Jane Doe", "jane@company.com")),
        ));
        assert_eq!(resp.employee.id, 3);
        assert_eq!(resp.employee.full_name, "Jane Doe");
        assert_eq!(resp.employee.email, "jane@company.com");
        assert_eq!(resp.status, LeaveStatus::Pending);
        assert!(resp.updated_at.is_none());
    }

    #[test]
    fn missing_employee_join_falls_back_to_placeholder() {
        let resp = map_response(row(LeaveStatus::Approved, None));
        assert_eq!(resp.employee.full_name, "Unknown Employee");
        assert_eq!(resp.employee.email, "No email available");
        assert_eq!(resp.employee.id, resp.employee_id);
    }
}
