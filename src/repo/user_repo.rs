use chrono::Utc;
use sqlx::MySqlPool;

use crate::model::user::User;

const USER_COLUMNS: &str =
    "id, full_name, email, password_hash, role_id, created_at, updated_at";

pub async fn insert(
    pool: &MySqlPool,
    full_name: &str,
    email: &str,
    password_hash: &str,
    role_id: u8,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (full_name, email, password_hash, role_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(password_hash)
    .bind(role_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

pub async fn find_by_id(pool: &MySqlPool, id: u64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Email lookup is case-insensitive; the unique index on `email` is the
/// final arbiter under concurrent registration.
pub async fn find_by_email(pool: &MySqlPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER(?)"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn email_taken(
    pool: &MySqlPool,
    email: &str,
    exclude_id: Option<u64>,
) -> Result<bool, sqlx::Error> {
    let taken = match exclude_id {
        Some(id) => {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) AND id <> ?)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER(?))",
            )
            .bind(email)
            .fetch_one(pool)
            .await?
        }
    };
    Ok(taken)
}

pub async fn list_all(pool: &MySqlPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn update(
    pool: &MySqlPool,
    id: u64,
    full_name: &str,
    email: &str,
    role_id: u8,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET full_name = ?, email = ?, role_id = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(role_id)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Owned leave requests go with the user via the FK cascade.
pub async fn delete(pool: &MySqlPool, id: u64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
