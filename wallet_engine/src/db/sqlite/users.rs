//! Sqlite database operations for user records.
//!
//! Generally clients should never call these methods directly, and prefer to use the [`crate::traits`] methods
//! implemented on [`super::SqliteDatabase`] instead.
use log::trace;
use sqlx::SqliteConnection;
use wallet_common::Paise;

use crate::db_types::{NewUser, User};

pub async fn fetch_user_by_id(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?").bind(user_id).fetch_optional(conn).await
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?").bind(email).fetch_optional(conn).await
}

/// Inserts a new user with the given opening balance. Fails with a UNIQUE constraint error if the email is taken.
pub async fn insert_user(user: NewUser, balance: Paise, conn: &mut SqliteConnection) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"INSERT INTO users (email, username, password_hash, balance)
        VALUES (?, ?, ?, ?)
        RETURNING *"#,
    )
    .bind(user.email)
    .bind(user.username)
    .bind(user.password_hash)
    .bind(balance)
    .fetch_one(conn)
    .await?;
    trace!("🧑️ User #{} created", user.id);
    Ok(user)
}

/// Adds `amount` to the user's balance. Returns `None` if the user does not exist.
pub async fn increment_balance(
    user_id: i64,
    amount: Paise,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"UPDATE users
        SET balance = balance + ?, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE id = ?
        RETURNING *"#,
    )
    .bind(amount)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    if let Some(u) = &user {
        trace!("🧑️ Balance for user #{user_id} is now {}", u.balance);
    }
    Ok(user)
}
