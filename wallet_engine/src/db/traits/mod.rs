//! #  Database management and control.
//!
//! This module defines the interface contracts that the wallet engine database *backends* must honour.
//!
//! * [`AccountManagement`] provides read-only queries over users and their transaction history.
//! * [`LedgerManagement`] applies verified deposits to balances. Every method is atomic: the balance change and the
//!   transaction record are written together or not at all.
//! * [`AuthManagement`] exposes the stored credentials needed to log a user in.
mod account_management;
mod auth_management;
mod ledger_management;

pub use account_management::{AccountApiError, AccountManagement};
pub use auth_management::{AuthApiError, AuthManagement};
pub use ledger_management::{LedgerApiError, LedgerManagement};
