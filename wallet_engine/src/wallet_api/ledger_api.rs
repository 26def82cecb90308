//! The only way to change a balance.
//!
//! Every method takes a [`VerifiedPayment`], so a payment has to pass signature verification before it can be
//! credited.
use std::fmt::Debug;

use log::*;
use wallet_common::Paise;

use crate::{
    account_objects::{normalize_email, LedgerEntry, NewAccount},
    db_types::{Deposit, NewUser},
    helpers::{hash_password_async, VerifiedPayment},
    traits::{LedgerApiError, LedgerManagement},
};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_USERNAME_LENGTH: usize = 3;

pub struct LedgerApi<B> {
    db: B,
}

impl<B: Debug> Debug for LedgerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LedgerApi ({:?})", self.db)
    }
}

impl<B> LedgerApi<B>
where B: LedgerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Credits a verified deposit to an existing user. The balance update and the transaction record are written
    /// atomically.
    pub async fn credit_deposit(
        &self,
        user_id: i64,
        payment: &VerifiedPayment,
        amount: Paise,
    ) -> Result<LedgerEntry, LedgerApiError> {
        let deposit = deposit_for(payment, amount)?;
        let (user, transaction) = self.db.credit_deposit(user_id, &deposit).await?;
        info!("🔐️ Deposit {deposit} credited to user #{user_id}. New balance: {}", user.balance);
        Ok(LedgerEntry { user, transaction })
    }

    /// Creates a new account funded by a verified opening deposit. The user and the opening transaction are written
    /// atomically.
    pub async fn register_with_deposit(
        &self,
        account: NewAccount,
        payment: &VerifiedPayment,
        amount: Paise,
    ) -> Result<LedgerEntry, LedgerApiError> {
        let deposit = deposit_for(payment, amount)?;
        let user = validate_new_account(account).await?;
        let email = user.email.clone();
        let (user, transaction) = self.db.register_with_deposit(user, &deposit).await?;
        info!("🔐️ New user #{} ({email}) registered with opening deposit {deposit}", user.id);
        Ok(LedgerEntry { user, transaction })
    }
}

fn deposit_for(payment: &VerifiedPayment, amount: Paise) -> Result<Deposit, LedgerApiError> {
    if !amount.is_positive() {
        return Err(LedgerApiError::InvalidAmount(amount));
    }
    Ok(Deposit {
        order_id: payment.order_id().to_string(),
        payment_id: payment.payment_id().to_string(),
        amount,
    })
}

/// Basic sanity checks on the registration details, then hashes the password.
/// Checks the account details and hashes the password.
pub async fn validate_new_account(account: NewAccount) -> Result<NewUser, LedgerApiError> {
    let email = normalize_email(&account.email);
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace),
        None => false,
    };
    if !valid_email {
        return Err(LedgerApiError::InvalidAccountDetails("A valid email address is required".into()));
    }
    let username = account.username.trim().to_string();
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(LedgerApiError::InvalidAccountDetails(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if account.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(LedgerApiError::InvalidAccountDetails(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    let password_hash =
        hash_password_async(account.password).await.map_err(|e| LedgerApiError::PasswordHashError(e.to_string()))?;
    Ok(NewUser { email, username, password_hash })
}
