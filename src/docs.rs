use crate::api::leave_request::{CreateLeaveRequest, UpdateLeaveRequest};
use crate::api::my_requests::{CreateMyLeaveRequest, UpdateMyLeaveRequest};
use crate::api::user::{CreateUserRequest, UpdateUserRequest};
use crate::auth::handlers::{LoginRequest, RegisterRequest};
use crate::model::role::Role;
use crate::model::status::LeaveStatus;
use crate::service::leave_service::{EmployeeInfo, LeaveRequestResponse};
use crate::service::user_service::UserResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leaves API",
        version = "1.0.0",
        description = "Leave management: employees submit leave requests, administrators approve or reject them."
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::leaves_by_employee,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::leave_stats,

        crate::api::my_requests::my_leave_list,
        crate::api::my_requests::get_my_leave,
        crate::api::my_requests::create_my_leave,
        crate::api::my_requests::update_my_leave,
        crate::api::my_requests::delete_my_leave,

        crate::api::user::list_users,
        crate::api::user::get_user,
        crate::api::user::create_user,
        crate::api::user::update_user,
        crate::api::user::delete_user
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            CreateLeaveRequest,
            UpdateLeaveRequest,
            CreateMyLeaveRequest,
            UpdateMyLeaveRequest,
            CreateUserRequest,
            UpdateUserRequest,
            LeaveRequestResponse,
            EmployeeInfo,
            UserResponse,
            Role,
            LeaveStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Leave Requests", description = "Administration of leave requests"),
        (name = "My Requests", description = "Self-service leave requests"),
        (name = "Users", description = "User administration"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
