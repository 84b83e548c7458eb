use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};

pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("argon2: {0}")]
    Argon2(argon2::password_hash::Error),
}

pub fn hash_password(plain: &str) -> Result<String, HashError> {
    Ok(bcrypt::hash(plain, BCRYPT_COST)?)
}

/// Accepts bcrypt (`$2a$`, `$2b$`, `$2y$`) and argon2 PHC hashes.
///
/// `Err` only when the stored hash itself is unreadable; a wrong password
/// is `Ok(false)`.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, HashError> {
    if hashed.starts_with("$2") {
        return Ok(bcrypt::verify(plain, hashed)?);
    }

    let parsed_hash = PasswordHash::new(hashed).map_err(HashError::Argon2)?;
    let ok = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString};
    use rand::rngs::OsRng;

    #[test]
    fn hashes_are_salted_bcrypt_at_cost_ten() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$2b$10$"));
        assert!(!first.contains("correct horse"));

        assert!(verify_password("correct horse", &first).unwrap());
        assert!(!verify_password("battery staple", &first).unwrap());
    }

    #[test]
    fn legacy_2a_prefix_still_verifies() {
        let hashed = hash_password("doctor-pass").unwrap().replacen("$2b$", "$2a$", 1);
        assert!(verify_password("doctor-pass", &hashed).unwrap());
        assert!(!verify_password("nurse-pass", &hashed).unwrap());
    }

    #[test]
    fn argon2_hashes_still_verify() {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = Argon2::default()
            .hash_password(b"correct horse", &salt)
            .unwrap()
            .to_string();
        assert!(verify_password("correct horse", &hashed).unwrap());
        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
        assert!(verify_password("anything", "$2b$10$short").is_err());
    }
}
