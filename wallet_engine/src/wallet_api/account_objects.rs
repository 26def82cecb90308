use serde::{Deserialize, Serialize};

use crate::db_types::{Transaction, User};

/// Everything the dashboard needs: the user record (with balance) and the most recent transactions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
    pub transactions: Vec<Transaction>,
}

/// The details a new user supplies at registration. The password is still in plain text here.
#[derive(Clone, Default, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NewAccount {{ email: {}, username: {}, password: **** }}", self.email, self.username)
    }
}

impl NewAccount {
    pub fn new<S: Into<String>>(email: S, username: S, password: S) -> Self {
        Self { email: email.into(), username: username.into(), password: password.into() }
    }
}

/// The outcome of a successful ledger write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub user: User,
    pub transaction: Transaction,
}

/// Trims and lowercases an email address so that lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
