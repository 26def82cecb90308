//! `SqliteDatabase` is a concrete implementation of a wallet engine backend.
//!
//! It uses SQLite as the store and implements all the traits defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::{db_url, new_pool, transactions, unique_violation_on, users};
use crate::{
    db_types::{Deposit, NewUser, Transaction, User},
    traits::{
        AccountApiError,
        AccountManagement,
        AuthApiError,
        AuthManagement,
        LedgerApiError,
        LedgerManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

fn map_insert_error(e: sqlx::Error, deposit: &Deposit) -> LedgerApiError {
    if unique_violation_on(&e, "transactions.payment_id") {
        LedgerApiError::DuplicatePayment(deposit.payment_id.clone())
    } else if unique_violation_on(&e, "users.email") {
        LedgerApiError::EmailAlreadyRegistered
    } else {
        LedgerApiError::from(e)
    }
}

impl LedgerManagement for SqliteDatabase {
    /// In a single atomic transaction:
    /// * adds the deposit to the user's balance,
    /// * rejects the deposit if its payment id has been recorded before,
    /// * records a completed credit transaction.
    ///
    /// The balance update runs first so that concurrent deposits serialise on the write lock.
    async fn credit_deposit(&self, user_id: i64, deposit: &Deposit) -> Result<(User, Transaction), LedgerApiError> {
        let mut tx = self.pool.begin().await?;
        let user = users::increment_balance(user_id, deposit.amount, &mut tx)
            .await?
            .ok_or(LedgerApiError::UserNotFound(user_id))?;
        if transactions::payment_exists(&deposit.payment_id, &mut tx).await? {
            warn!("🗃️ Payment {} has already been credited. Rolling back.", deposit.payment_id);
            return Err(LedgerApiError::DuplicatePayment(deposit.payment_id.clone()));
        }
        let transaction = transactions::insert_transaction(user_id, deposit.as_transaction(), &mut tx)
            .await
            .map_err(|e| map_insert_error(e, deposit))?;
        tx.commit().await?;
        debug!("🗃️ Deposit {deposit} credited to user #{user_id}. Transaction #{}", transaction.id);
        Ok((user, transaction))
    }

    async fn register_with_deposit(
        &self,
        user: NewUser,
        deposit: &Deposit,
    ) -> Result<(User, Transaction), LedgerApiError> {
        let mut tx = self.pool.begin().await?;
        let user = users::insert_user(user, deposit.amount, &mut tx).await.map_err(|e| map_insert_error(e, deposit))?;
        if transactions::payment_exists(&deposit.payment_id, &mut tx).await? {
            warn!("🗃️ Payment {} has already been used. Registration of {} rolled back.", deposit.payment_id, user.email);
            return Err(LedgerApiError::DuplicatePayment(deposit.payment_id.clone()));
        }
        let transaction = transactions::insert_transaction(user.id, deposit.as_transaction(), &mut tx)
            .await
            .map_err(|e| map_insert_error(e, deposit))?;
        tx.commit().await?;
        debug!("🗃️ User #{} registered with opening deposit {deposit}", user.id);
        Ok((user, transaction))
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_id(user_id, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_email(email, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_recent_transactions(&self, user_id: i64, limit: u32) -> Result<Vec<Transaction>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let txs = transactions::fetch_recent_transactions(user_id, limit, &mut conn).await?;
        Ok(txs)
    }
}

impl AuthManagement for SqliteDatabase {
    async fn fetch_login_details(&self, email: &str) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_email(email, &mut conn).await?;
        Ok(user)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `WALLET_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
