//! SQLite database module for the wallet engine.
mod errors;
mod sqlite_impl;

pub mod transactions;
pub mod users;

use std::{env, str::FromStr};

pub use errors::unique_violation_on;
use log::info;
pub use sqlite_impl::SqliteDatabase;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

const SQLITE_DB_URL: &str = "sqlite://data/wallet.db";

pub fn db_url() -> String {
    let result = env::var("WALLET_DATABASE_URL").unwrap_or_else(|_| {
        info!("WALLET_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true).journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
