use crate::error::LiftError;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hashes a plaintext password into a self-describing PHC string
/// (Argon2id, per-hash random salt). The plaintext is never stored.
pub fn hash(password: &str) -> Result<String, LiftError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LiftError::Internal(format!("password hashing failed: {e}")))
}

/// Compares a plaintext candidate against a stored PHC string. A mismatch is
/// `Ok(false)`; `Err` means the stored hash itself is unreadable.
pub fn verify(password: &str, stored: &str) -> Result<bool, LiftError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| LiftError::Internal(format!("stored password hash unreadable: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
