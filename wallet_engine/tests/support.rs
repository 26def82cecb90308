#![allow(dead_code)]

use wallet_common::{Paise, Secret};
use wallet_engine::{
    account_objects::NewAccount,
    helpers::{PaymentSignature, VerifiedPayment},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    LedgerApi,
    SqliteDatabase,
};

pub const GATEWAY_SECRET: &str = "rzp_test_secret";

pub async fn new_db() -> SqliteDatabase {
    prepare_test_env(&random_db_path()).await
}

pub fn verified(order_id: &str, payment_id: &str) -> VerifiedPayment {
    let secret = Secret::new(GATEWAY_SECRET.to_string());
    PaymentSignature::create(order_id, payment_id, &secret)
        .and_then(|sig| sig.verify(&secret))
        .expect("signature should verify")
}

/// Registers a user with the given opening deposit and returns their id.
pub async fn register(db: &SqliteDatabase, email: &str, rupees: i64) -> i64 {
    let api = LedgerApi::new(db.clone());
    let account = NewAccount::new(email, "test user", "password123");
    let payment = verified(&format!("order_{email}"), &format!("pay_{email}"));
    let entry = api.register_with_deposit(account, &payment, Paise::from_rupees(rupees)).await.expect("registration failed");
    entry.user.id
}
