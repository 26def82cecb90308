//! # Wallet engine public API
//!
//! The `wallet_api` module exposes the programmatic API for the wallet engine.
//! The API is modular, so that clients can pick and choose the functionality they want.
//!
//! * [`accounts_api`] reads user accounts: balances and recent transaction history.
//! * [`ledger_api`] applies verified gateway payments to balances, including the opening deposit at registration.
//! * [`auth_api`] checks login credentials.
//!
//! # API usage
//!
//! An API instance is created by supplying a database backend that implements the backend traits the API needs.
//!
//! ```rust,ignore
//! use wallet_engine::{AccountApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements AccountManagement
//! let api = AccountApi::new(db);
//! let data = api.user_data(user_id).await?;
//! ```
pub mod account_objects;
pub mod accounts_api;
pub mod auth_api;
pub mod ledger_api;
