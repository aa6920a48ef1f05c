use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    /// User email.
    pub sub: String,
    /// Role id, see `model::role::Role`.
    pub role: u8,
    pub exp: usize,
    pub jti: String,
}
