//! Sqlite database operations for ledger transactions.
use sqlx::SqliteConnection;

use crate::db_types::{NewTransaction, Transaction};

pub async fn payment_exists(payment_id: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT count(id) FROM transactions WHERE payment_id = ?")
        .bind(payment_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert_transaction(
    user_id: i64,
    tx: NewTransaction,
    conn: &mut SqliteConnection,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"INSERT INTO transactions (user_id, amount, tx_type, status, payment_id)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *"#,
    )
    .bind(user_id)
    .bind(tx.amount)
    .bind(tx.tx_type)
    .bind(tx.status)
    .bind(tx.payment_id)
    .fetch_one(conn)
    .await
}

/// Newest first. Transactions written in the same instant are ordered by id.
pub async fn fetch_recent_transactions(
    user_id: i64,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"SELECT * FROM transactions
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?"#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(conn)
    .await
}
