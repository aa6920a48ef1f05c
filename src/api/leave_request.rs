use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::auth::extractor::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::model::status::LeaveStatus;
use crate::service::leave_service;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    /// Employee the request is created for.
    pub employee_id: u64,
    #[schema(example = "2026-08-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-08-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaveRequest {
    #[schema(format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
}

/// List every leave request.
#[utoipa::path(
    get,
    path = "/api/leave-requests",
    responses(
        (status = 200, description = "All leave requests", body = [leave_service::LeaveRequestResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let leaves = leave_service::get_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    get,
    path = "/api/leave-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request", body = leave_service::LeaveRequestResponse),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let leave = leave_service::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    get,
    path = "/api/leave-requests/employee/{employee_id}",
    params(("employee_id" = u64, Path, description = "Owning employee id")),
    responses(
        (status = 200, description = "Leave requests of one employee", body = [leave_service::LeaveRequestResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn leaves_by_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let leaves = leave_service::get_by_employee(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/// Create a leave request on behalf of any employee.
#[utoipa::path(
    post,
    path = "/api/leave-requests",
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Leave request created", body = leave_service::LeaveRequestResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let leave = leave_service::create(
        pool.get_ref(),
        payload.employee_id,
        payload.start_date,
        payload.end_date,
        &payload.reason,
    )
    .await?;

    Ok(HttpResponse::Created().json(leave))
}

#[utoipa::path(
    put,
    path = "/api/leave-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    request_body = UpdateLeaveRequest,
    responses(
        (status = 200, description = "Leave request updated", body = leave_service::LeaveRequestResponse),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn update_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeaveRequest>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let leave = leave_service::update(
        pool.get_ref(),
        path.into_inner(),
        payload.start_date,
        payload.end_date,
        &payload.reason,
    )
    .await?;

    Ok(HttpResponse::Ok().json(leave))
}

#[utoipa::path(
    delete,
    path = "/api/leave-requests/{id}",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request is no longer pending")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn delete_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    leave_service::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    patch,
    path = "/api/leave-requests/{id}/approve",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request approved"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    leave_service::approve(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Leave request approved." })))
}

#[utoipa::path(
    patch,
    path = "/api/leave-requests/{id}/reject",
    params(("id" = u64, Path, description = "Leave request id")),
    responses(
        (status = 200, description = "Leave request rejected"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    leave_service::reject(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Leave request rejected." })))
}

/// Per-status totals for the dashboard tiles.
#[utoipa::path(
    get,
    path = "/api/leave-requests/stats/{status}",
    params(("status" = String, Path, description = "pending | approved | rejected")),
    responses(
        (status = 200, description = "Count for the status"),
        (status = 404, description = "Unknown status")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave Requests"
)]
pub async fn leave_stats(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    auth.require_admin()?;

    let status = LeaveStatus::from_str(&path.into_inner())
        .ok_or_else(|| ApiError::not_found("Status"))?;

    let count = leave_service::count_by_status(pool.get_ref(), status).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}
