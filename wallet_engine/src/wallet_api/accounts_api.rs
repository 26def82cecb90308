//! Unifies API for accessing accounts.
use std::fmt::Debug;

use log::trace;

use crate::{
    account_objects::{normalize_email, UserData},
    db_types::User,
    traits::{AccountApiError, AccountManagement},
};

/// The number of transactions returned with the user's data.
pub const RECENT_TRANSACTIONS_LIMIT: u32 = 10;

/// The `AccountApi` provides a unified API for reading accounts.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Fetches the user for the given id. If no user exists, `None` is returned.
    pub async fn user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError> {
        self.db.fetch_user_by_id(user_id).await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, AccountApiError> {
        self.db.fetch_user_by_email(&normalize_email(email)).await
    }

    /// Fetches the user and their [`RECENT_TRANSACTIONS_LIMIT`] most recent transactions, newest first.
    /// Returns `None` if the user does not exist.
    pub async fn user_data(&self, user_id: i64) -> Result<Option<UserData>, AccountApiError> {
        let Some(user) = self.db.fetch_user_by_id(user_id).await? else {
            trace!("🧑️ User #{user_id} not found");
            return Ok(None);
        };
        let transactions = self.db.fetch_recent_transactions(user_id, RECENT_TRANSACTIONS_LIMIT).await?;
        trace!("🧑️ Fetched {} transactions for user #{user_id}", transactions.len());
        Ok(Some(UserData { user, transactions }))
    }
}
