use anyhow::{Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::Argon2Cost;

/// Salted argon2id hash with work factors taken from configuration.
pub fn hash_password(password: &str, cost: &Argon2Cost) -> Result<String> {
    let params = Params::new(cost.m_cost_kib, cost.t_cost, cost.p_cost, None)
        .map_err(|e| anyhow!("invalid argon2 parameters: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hashing failed: {e}"))?;

    Ok(hash.to_string())
}

/// Verification reads the work factors back out of the PHC string.
pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hashed)?;
    Argon2::default().verify_password(password.as_bytes(), &parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cost() -> Argon2Cost {
        // Cheap parameters keep the tests fast; production values come
        // from the environment.
        Argon2Cost {
            m_cost_kib: 1024,
            t_cost: 1,
            p_cost: 1,
        }
    }

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret123", &test_cost()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret123", &hash).is_ok());
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("secret123", &test_cost()).unwrap();
        assert!(verify_password("secret124", &hash).is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret123", &test_cost()).unwrap();
        let b = hash_password("secret123", &test_cost()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_fails_verification() {
        assert!(verify_password("secret123", "not-a-phc-string").is_err());
    }
}
