//! # Password hashing for local accounts: Argon2id
//!
//! [`LocalAuth`](super::LocalAuth) never keeps plaintext passwords. [`hash_password`]
//! salts with [`OsRng`] and returns a PHC-format string
//! (`$argon2id$v=19$m=19456,t=2,p=1$...`); [`verify_password`] checks a candidate
//! against it and returns `Ok(false)` on mismatch, `Err` only if the stored hash is
//! malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::{AuthError, AuthErrorKind};

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            AuthError::new(AuthErrorKind::Provider, format!("Failed to hash password: {e}"))
        })?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| {
        AuthError::new(AuthErrorKind::Provider, format!("Invalid password hash: {e}"))
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
