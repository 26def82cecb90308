//! # Wallet server
//! This crate hosts the HTTP server for the wallet. It is responsible for:
//! * Creating payment gateway orders for the checkout widget.
//! * Verifying the gateway's payment callbacks and crediting the verified amount to a user's balance.
//! * Registering new users against an opening deposit, and logging users in.
//! * Serving a user's balance and recent transactions to the dashboard.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/order`: Creates a gateway order for a rupee amount.
//! * `/register`: Verifies the opening payment and creates the user.
//! * `/auth`: Exchanges an email and password for an access token.
//! * `/api/transaction`: Verifies a deposit and credits it to the caller's balance. Requires an access token.
//! * `/api/user/data`: The caller's balance and ten most recent transactions. Requires an access token.
pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
