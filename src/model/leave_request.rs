use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::model::status::LeaveStatus;

/// A leave request row joined with its owning user.
///
/// The employee columns come from a LEFT JOIN and are absent when the
/// relation fails to load; response mapping substitutes a placeholder.
#[derive(Debug, Clone, FromRow)]
pub struct LeaveRequestRow {
    pub id: u64,
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub employee_full_name: Option<String>,
    pub employee_email: Option<String>,
}
