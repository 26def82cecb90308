use thiserror::Error;
use wallet_common::Paise;

use crate::db_types::{Deposit, NewUser, Transaction, User};

#[derive(Debug, Clone, Error)]
pub enum LedgerApiError {
    #[error("User {0} does not exist")]
    UserNotFound(i64),
    #[error("Payment {0} has already been processed")]
    DuplicatePayment(String),
    #[error("A user with this email address already exists")]
    EmailAlreadyRegistered,
    #[error("Invalid amount: {0}")]
    InvalidAmount(Paise),
    #[error("Invalid account details: {0}")]
    InvalidAccountDetails(String),
    #[error("Could not process the password: {0}")]
    PasswordHashError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for LedgerApiError {
    fn from(e: sqlx::Error) -> Self {
        LedgerApiError::DatabaseError(e.to_string())
    }
}

/// Backend operations that change balances.
///
/// Implementations must apply each method atomically. If any step fails, no balance is changed and no transaction
/// record is left behind. A payment id can fund at most one transaction, ever.
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    /// Adds the deposit amount to the user's balance and records a completed credit transaction for it.
    /// Returns the updated user and the new transaction.
    async fn credit_deposit(&self, user_id: i64, deposit: &Deposit) -> Result<(User, Transaction), LedgerApiError>;

    /// Creates a new user whose opening balance is the deposit amount, and records the matching credit transaction.
    async fn register_with_deposit(
        &self,
        user: NewUser,
        deposit: &Deposit,
    ) -> Result<(User, Transaction), LedgerApiError>;
}
