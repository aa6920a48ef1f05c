use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::password;
use crate::config::Argon2Cost;
use crate::error::{ApiError, ApiResult, ValidationErrors};
use crate::model::{role::Role, user::User};
use crate::repo::user_repo;

pub const MAX_FULL_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

pub fn validate_profile(full_name: &str, email: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if full_name.trim().is_empty() {
        errors.add("fullName", "Full name is required");
    } else if full_name.chars().count() > MAX_FULL_NAME_LEN {
        errors.add("fullName", "Full name cannot exceed 100 characters");
    }

    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !looks_like_email(email) {
        errors.add("email", "Invalid email format");
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.add("email", "Email cannot exceed 255 characters");
    }

    errors
}

pub fn validate_password(password: &str, errors: &mut ValidationErrors) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters long");
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Password is required and hashed here; it is the only place a password
/// enters the system.
pub async fn create(
    pool: &MySqlPool,
    cost: &Argon2Cost,
    full_name: &str,
    email: &str,
    plain_password: &str,
    role: Role,
) -> ApiResult<UserResponse> {
    let mut errors = validate_profile(full_name, email);
    validate_password(plain_password, &mut errors);
    errors.into_result()?;

    if user_repo::email_taken(pool, email, None).await? {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = password::hash_password(plain_password, cost)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let id = match user_repo::insert(pool, full_name.trim(), email.trim(), &password_hash, role.as_u8())
        .await
    {
        Ok(id) => id,
        // The unique index wins the race the pre-check can lose.
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23000") => {
            return Err(ApiError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    info!(id, email = %email, "user created");

    let user = user_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::internal("created user vanished"))?;

    map_response(&user)
}

/// No password field on update: passwords cannot be changed here.
pub async fn update(
    pool: &MySqlPool,
    id: u64,
    full_name: &str,
    email: &str,
    role: Role,
) -> ApiResult<UserResponse> {
    validate_profile(full_name, email).into_result()?;

    if user_repo::find_by_id(pool, id).await?.is_none() {
        return Err(ApiError::not_found("User"));
    }

    if user_repo::email_taken(pool, email, Some(id)).await? {
        return Err(ApiError::conflict("Email already registered"));
    }

    user_repo::update(pool, id, full_name.trim(), email.trim(), role.as_u8()).await?;

    let user = user_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    map_response(&user)
}

pub async fn delete(pool: &MySqlPool, id: u64) -> ApiResult<()> {
    let affected = user_repo::delete(pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("User"));
    }
    info!(id, "user deleted");
    Ok(())
}

pub async fn get_by_id(pool: &MySqlPool, id: u64) -> ApiResult<UserResponse> {
    let user = user_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    map_response(&user)
}

pub async fn get_all(pool: &MySqlPool) -> ApiResult<Vec<UserResponse>> {
    let users = user_repo::list_all(pool).await?;
    users.iter().map(map_response).collect()
}

pub fn map_response(user: &User) -> ApiResult<UserResponse> {
    let role = Role::from_id(user.role_id)
        .ok_or_else(|| ApiError::internal(format!("unknown role id {}", user.role_id)))?;

    Ok(UserResponse {
        id: user.id,
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        role,
        created_at: user.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role_id: u8) -> User {
        User {
            id: 11,
            full_name: "Jane Doe".to_string(),
            email: "jane@company.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn profile_validation_flags_each_field() {
        let errors = validate_profile("", "not-an-email");
        let fields: Vec<_> = errors.fields.iter().map(|f| f.field.as_str()).collect();
        assert!(fields.contains(&"fullName"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let long = "a".repeat(MAX_FULL_NAME_LEN + 1);
        assert!(!validate_profile(&long, "jane@company.com").is_empty());
    }

    #[test]
    fn email_format_checks() {
        assert!(looks_like_email("jane@company.com"));
        assert!(!looks_like_email("janecompany.com"));
        assert!(!looks_like_email("jane@"));
        assert!(!looks_like_email("@company.com"));
        assert!(!looks_like_email("jane doe@company.com"));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut errors = ValidationErrors::new();
        validate_password("12345", &mut errors);
        assert!(!errors.is_empty());

        let mut errors = ValidationErrors::new();
        validate_password("123456", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn response_never_carries_the_hash() {
        let resp = map_response(&user(Role::Admin.as_u8())).unwrap();
        assert_eq!(resp.role, Role::Admin);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"fullName\":\"Jane Doe\""));
    }

    #[test]
    fn unknown_role_id_is_an_internal_error() {
        assert!(matches!(
            map_response(&user(42)),
            Err(ApiError::Internal { .. })
        ));
    }
}
