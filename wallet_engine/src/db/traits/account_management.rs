use thiserror::Error;

use crate::db_types::{Transaction, User};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// The `AccountManagement` trait defines read-only queries over user accounts and their ledgers.
///
/// Mutations go through [`crate::traits::LedgerManagement`].
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches the user with the given id. If no user exists, `None` is returned.
    async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError>;

    /// Fetches the user with the given (normalised) email address. If no user exists, `None` is returned.
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AccountApiError>;

    /// Returns at most `limit` of the user's transactions, newest first.
    async fn fetch_recent_transactions(&self, user_id: i64, limit: u32) -> Result<Vec<Transaction>, AccountApiError>;
}
