use actix_web::middleware::Next;
use actix_web::{
    Error, ResponseError,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::role::Role;

/// Gate for the protected scope: absent or invalid bearer token never
/// reaches a handler.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| ApiError::internal("App config missing"))?;

    let header_value = match req.headers().get("Authorization") {
        Some(h) => h
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?,
        None => {
            let resp = ApiError::unauthorized("Missing Authorization header").error_response();
            return Ok(req.into_response(resp));
        }
    };

    let token = match header_value.strip_prefix("Bearer ") {
        Some(t) => t,
        None => {
            let resp =
                ApiError::unauthorized("Authorization header must start with Bearer")
                    .error_response();
            return Ok(req.into_response(resp));
        }
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => {
            let resp = ApiError::unauthorized("Invalid or expired token").error_response();
            return Ok(req.into_response(resp));
        }
    };

    if Role::from_id(claims.role).is_none() {
        let resp = ApiError::unauthorized("Invalid role").error_response();
        return Ok(req.into_response(resp));
    }

    next.call(req).await
}
