use dotenvy::dotenv;
use std::env;

/// Argon2 work factors. Configuration values, not hardcoded: operators tune
/// them per deployment.
#[derive(Clone)]
pub struct Argon2Cost {
    pub m_cost_kib: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub argon2: Argon2Cost,

    // Idempotent startup seed
    pub seed_admin_name: String,
    pub seed_admin_email: String,
    pub seed_admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env::var("ACCESS_TOKEN_TTL")
                .unwrap_or_else(|_| "900".to_string()) // default 15 min
                .parse()
                .unwrap(),

            rate_login_per_min: env::var("RATE_LOGIN_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_register_per_min: env::var("RATE_REGISTER_PER_MIN")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            argon2: Argon2Cost {
                m_cost_kib: env::var("ARGON2_M_COST_KIB")
                    .unwrap_or_else(|_| "19456".to_string())
                    .parse()
                    .unwrap(),
                t_cost: env::var("ARGON2_T_COST")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap(),
                p_cost: env::var("ARGON2_P_COST")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse()
                    .unwrap(),
            },

            seed_admin_name: env::var("SEED_ADMIN_NAME")
                .unwrap_or_else(|_| "Administrator".to_string()),
            seed_admin_email: env::var("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@admin.com".to_string()),
            seed_admin_password: env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}
