use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::extractor::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::service::leave_service::{self, LeaveRequestResponse};

/// Self-service payload; the owning employee always comes from the token.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMyLeaveRequest {
    #[schema(example = "2026-08-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-08-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMyLeaveRequest {
    #[schema(format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
}

/// A record owned by someone else is visible as 403, not 404: existence is
/// not hidden in this design.
fn ensure_owner(leave: &LeaveRequestResponse, auth: &AuthUser) -> ApiResult<()> {
    if leave.employee_id == auth.user_id {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "You can only access your own leave requests",
        ))
    }
}

#[utoipa::path(
    get,
    path = "/api/leave-requests/my-requests",
    responses(
        (status = 200, description = "Caller's leave requests", body = [LeaveRequestResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "My Requests"
)]
pub async fn my_leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> ApiResult<HttpResponse> {
    let leaves = leave_service::get_by_employee(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    get,
    path = "/api/leave-requests/my-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request", body = LeaveRequestResponse),
        (status = 403, description = "Owned by another employee"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "My Requests"
)]
pub async fn get_my_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let leave = leave_service::get_by_id(pool.get_ref(), path.into_inner()).await?;
    ensure_owner(&leave, &auth)?;

    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    post,
    path = "/api/leave-requests/my-requests",
    request_body = CreateMyLeaveRequest,
    responses(
        (status = 201, description = "Leave request created", body = LeaveRequestResponse),
        (status = 400, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "My Requests"
)]
pub async fn create_my_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateMyLeaveRequest>,
) -> ApiResult<HttpResponse> {
    let leave = leave_service::create(
        pool.get_ref(),
        auth.user_id,
        payload.start_date,
        payload.end_date,
        &payload.reason,
    )
    .await?;

    Ok(HttpResponse::Created().json(leave))
}

#[utoipa::path(
    put,
    path = "/api/leave-requests/my-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    request_body = UpdateMyLeaveRequest,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequestResponse),
        (status = 403, description = "Owned by another employee"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "My Requests"
)]
pub async fn update_my_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateMyLeaveRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let existing = leave_service::get_by_id(pool.get_ref(), id).await?;
    ensure_owner(&existing, &auth)?;
    // Checked again inside the service; kept here so the gate fires before
    // any validation output leaks details.
    leave_service::ensure_pending(existing.status, "modified")?;

    let leave = leave_service::update(
        pool.get_ref(),
        id,
        payload.start_date,
        payload.end_date,
        &payload.reason,
    )
    .await?;

    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    delete,
    path = "/api/leave-requests/my-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 403, description = "Owned by another employee"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "My Requests"
)]
pub async fn delete_my_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let existing = leave_service::get_by_id(pool.get_ref(), id).await?;
    ensure_owner(&existing, &auth)?;
    leave_service::ensure_pending(existing.status, "deleted")?;

    leave_service::delete(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::model::status::LeaveStatus;
    use crate::service::leave_service::EmployeeInfo;
    use chrono::Utc;

    fn leave_owned_by(employee_id: u64) -> LeaveRequestResponse {
        LeaveRequestResponse {
            id: 1,
            employee_id,
            start_date: Utc::now().date_naive(),
            end_date: Utc::now().date_naive(),
            reason: "vacation".to_string(),
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            employee: EmployeeInfo {
                id: employee_id,
                full_name: "Someone".to_string(),
                email: "someone@company.com".to_string(),
            },
        }
    }

    fn employee(user_id: u64) -> AuthUser {
        AuthUser {
            user_id,
            email: "a@company.com".to_string(),
            role: Role::Employee,
        }
    }

    #[test]
    fn foreign_record_is_forbidden_not_hidden() {
        let err = ensure_owner(&leave_owned_by(2), &employee(1)).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }

    #[test]
    fn own_record_passes_the_gate() {
        assert!(ensure_owner(&leave_owned_by(1), &employee(1)).is_ok());
    }
}
