use thiserror::Error;

use crate::db_types::User;

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Could not process the password: {0}")]
    PasswordHashError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Fetches the user record, including the password hash, for the given (normalised) email address.
    async fn fetch_login_details(&self, email: &str) -> Result<Option<User>, AuthApiError>;
}
