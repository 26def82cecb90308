//! Wallet Engine
//!
//! The wallet engine holds the core logic of the wallet server: user accounts, the balance ledger and the
//! verification of payment gateway callbacks. It is transport-agnostic; the HTTP layer lives in `wallet_server`.
//!
//! The library is divided into three sections:
//! 1. Database management ([`mod@db`]). SQLite is the supported backend. You should never need to access the
//!    database directly. Use the public API instead. The data types stored in the database are defined in
//!    [`db_types`] and are public.
//! 2. The public API ([`wallet_api`]). [`AccountApi`] reads balances and history, [`LedgerApi`] applies verified
//!    deposits, and [`AuthApi`] checks login credentials. Backends implement the traits in [`traits`] to plug in.
//! 3. [`helpers`]: the payment signature verifier and password hashing.
//!
//! A ledger write can only be requested with a [`helpers::VerifiedPayment`], which in turn can only be obtained by
//! checking the gateway's signature. A payment that fails verification therefore cannot touch a balance.
mod db;

pub mod db_types;
pub mod helpers;
pub mod wallet_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use db::traits;
pub use traits::{AccountApiError, AccountManagement, AuthApiError, AuthManagement, LedgerApiError, LedgerManagement};
pub use wallet_api::{
    account_objects,
    accounts_api::{AccountApi, RECENT_TRANSACTIONS_LIMIT},
    auth_api::AuthApi,
    ledger_api::LedgerApi,
};
