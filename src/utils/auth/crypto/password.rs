//! Password hashing and verification using Argon2

use crate::utils::error::{ApiError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::OnceLock;

/// Hash a password using Argon2 with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::hash(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a password against its hash.
///
/// A wrong password is [`ApiError::CredentialMismatch`]; an unreadable hash is an internal error.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::hash(format!("Failed to parse password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(ApiError::CredentialMismatch),
        Err(e) => Err(ApiError::hash(format!("Password verification failed: {}", e))),
    }
}

/// Spend the same verification cost as a real login for an unknown account.
///
/// Always ends in [`ApiError::CredentialMismatch`] so both paths look alike to the caller.
pub fn verify_unknown_account(password: &str) -> Result<()> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    let hash = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => {
            let hash = hash_password("bugby-unknown-account")?;
            DUMMY_HASH.get_or_init(|| hash)
        }
    };

    verify_password(password, hash)?;
    Err(ApiError::CredentialMismatch)
}
