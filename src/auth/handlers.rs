use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::auth::{jwt, password};
use crate::config::Config;
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::model::role::Role;
use crate::repo::user_repo;
use crate::service::user_service;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User self-registration. The role is always Employee here; only an admin
/// can create other admins through the users endpoint.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> ApiResult<HttpResponse> {
    user_service::create(
        pool.get_ref(),
        &config.argon2,
        &payload.full_name,
        &payload.email,
        &payload.password,
        Role::Employee,
    )
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully"
    })))
}

/// Whether the email is unknown or the password wrong, the caller sees the
/// same message.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token and user profile"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(payload, pool, config), fields(email = %payload.email))]
pub async fn login(
    payload: web::Json<LoginRequest>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> ApiResult<HttpResponse> {
    info!("Login request received");

    let mut errors = ValidationErrors::new();
    if payload.email.trim().is_empty() {
        errors.add("email", "Email is required");
    }
    if payload.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()?;

    debug!("Fetching user from database");

    let user = user_repo::find_by_email(pool.get_ref(), &payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password."))?;

    debug!(user_id = user.id, "Verifying password");

    if password::verify_password(&payload.password, &user.password_hash).is_err() {
        return Err(ApiError::unauthorized("Invalid email or password."));
    }

    let token = jwt::generate_token(
        user.id,
        user.email.clone(),
        user.role_id,
        &config.jwt_secret,
        config.access_token_ttl,
    )
    .map_err(|e| ApiError::internal(format!("token signing failed: {e}")))?;

    let profile = user_service::map_response(&user)?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(json!({
        "token": token,
        "user": profile
    })))
}
