use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Hashes and checks account passwords. Account services never compare
/// plaintext themselves.
pub trait CredentialVerifier: Send + Sync {
    fn hash_password(&self, plain: &str) -> Result<String>;
    fn verify_password(&self, plain: &str, hashed: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Default)]
pub struct Argon2Credentials;

impl CredentialVerifier for Argon2Credentials {
    fn hash_password(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();
        Ok(password_hash)
    }

    fn verify_password(&self, plain: &str, hashed: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hashed)
            .map_err(|e| Error::Internal(format!("Stored password hash is malformed: {}", e)))?;
        let ok = Argon2::default()
            .verify_password(plain.as_bytes(), &parsed_hash)
            .is_ok();
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let creds = Argon2Credentials;
        let hash = creds.hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(creds.verify_password("s3cret", &hash).unwrap());
        assert!(!creds.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let creds = Argon2Credentials;
        assert!(creds.verify_password("x", "not-a-phc-string").is_err());
    }
}
