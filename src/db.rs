use anyhow::Result;
use sqlx::MySqlPool;
use tracing::info;

use crate::auth::password;
use crate::config::Config;
use crate::model::role::Role;
use crate::repo::user_repo;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    full_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role_id TINYINT UNSIGNED NOT NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NULL,
    UNIQUE KEY uq_users_email (email)
)
"#;

const CREATE_LEAVE_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS leave_requests (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    employee_id BIGINT UNSIGNED NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    reason VARCHAR(500) NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at DATETIME NOT NULL,
    updated_at DATETIME NULL,
    KEY idx_leave_requests_employee (employee_id),
    CONSTRAINT fk_leave_requests_employee
        FOREIGN KEY (employee_id) REFERENCES users (id)
        ON DELETE CASCADE
)
"#;

/// Idempotent startup migration. The FK cascades so deleting a user removes
/// their leave requests.
pub async fn migrate(pool: &MySqlPool) -> Result<()> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_LEAVE_REQUESTS).execute(pool).await?;
    info!("schema migration complete");
    Ok(())
}

/// Creates the admin account if it is absent; reruns are no-ops.
pub async fn seed_admin(pool: &MySqlPool, config: &Config) -> Result<()> {
    if user_repo::find_by_email(pool, &config.seed_admin_email)
        .await?
        .is_some()
    {
        info!(email = %config.seed_admin_email, "admin user already present");
        return Ok(());
    }

    let hash = password::hash_password(&config.seed_admin_password, &config.argon2)?;
    let id = user_repo::insert(
        pool,
        &config.seed_admin_name,
        &config.seed_admin_email,
        &hash,
        Role::Admin.as_u8(),
    )
    .await?;

    info!(id, email = %config.seed_admin_email, "admin user created");
    Ok(())
}
