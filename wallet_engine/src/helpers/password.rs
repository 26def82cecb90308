//! Password hashing. Hashes are Argon2id PHC strings, so the salt and parameters travel with the hash.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::error;
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};

#[derive(Debug, Clone, Error)]
#[error("Password hashing error: {0}")]
pub struct PasswordError(String);

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Returns `Ok(false)` for a wrong password, and an error only if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

impl From<JoinError> for PasswordError {
    fn from(e: JoinError) -> Self {
        error!("🔐️ Password hashing task did not complete. {e}");
        Self(e.to_string())
    }
}

/// [`hash_password`] on the blocking thread pool. Argon2 must not run on an async worker.
pub async fn hash_password_async(password: String) -> Result<String, PasswordError> {
    spawn_blocking(move || hash_password(&password)).await?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, PasswordError> {
    spawn_blocking(move || verify_password(&password, &hash)).await?
}
