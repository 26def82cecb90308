use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
pub use wallet_common::Paise;
use wallet_common::rupees;

//--------------------------------------        User         ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Argon2 hash in PHC string format. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Stored in paise, reported in rupees
    #[serde(with = "rupees")]
    pub balance: Paise,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewUser       ---------------------------------------------------------
/// A user record that is ready to be inserted. The password has already been hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

//--------------------------------------   TransactionType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the wallet, e.g. a deposit via the payment gateway.
    Credit,
    /// Money leaving the wallet.
    Debit,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "credit"),
            TransactionType::Debit => write!(f, "debit"),
        }
    }
}

//--------------------------------------  TransactionStatus  ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

//--------------------------------------     Transaction     ---------------------------------------------------------
/// A single ledger entry. Transactions are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    #[serde(with = "rupees")]
    pub amount: Paise,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    /// The payment gateway's reference for the payment that funded this transaction
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   NewTransaction    ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: Paise,
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub payment_id: Option<String>,
}

impl NewTransaction {
    pub fn completed_credit(amount: Paise, payment_id: &str) -> Self {
        Self {
            amount,
            tx_type: TransactionType::Credit,
            status: TransactionStatus::Completed,
            payment_id: Some(payment_id.to_string()),
        }
    }
}

//--------------------------------------       Deposit       ---------------------------------------------------------
/// A deposit that has passed signature verification and is ready to be written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub order_id: String,
    pub payment_id: String,
    pub amount: Paise,
}

impl Deposit {
    pub fn as_transaction(&self) -> NewTransaction {
        NewTransaction::completed_credit(self.amount, &self.payment_id)
    }
}

impl Display for Deposit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (payment {}, order {})", self.amount, self.payment_id, self.order_id)
    }
}
