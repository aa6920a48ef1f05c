use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::role::Role;

/// The acting identity, taken from the verified bearer token — never from
/// the request body.
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::forbidden("Admin only"))
        }
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ApiError::unauthorized("Missing token").into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(ApiError::internal("Config missing").into())),
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ApiError::unauthorized("Invalid token").into())),
        };

        let role = match Role::from_id(claims.role) {
            Some(r) => r,
            None => return ready(Err(ApiError::unauthorized("Invalid role").into())),
        };

        ready(Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.sub,
            role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_pass_the_role_gate() {
        let admin = AuthUser {
            user_id: 1,
            email: "admin@admin.com".to_string(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let employee = AuthUser {
            user_id: 2,
            email: "jane@company.com".to_string(),
            role: Role::Employee,
        };
        let err = employee.require_admin().unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }
}
