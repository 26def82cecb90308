use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use wallet_common::Paise;
use wallet_engine::{helpers::PaymentSignature, traits::LedgerApiError, LedgerApi};

use super::{
    helpers::{
        gateway_order,
        issue_token,
        issuer,
        post_json,
        post_json_with_options,
        signed_payment,
        test_transaction,
        test_user,
        valid_token,
    },
    mocks::{MockGateway, MockLedgerManager},
};
use crate::{
    config::ServerOptions,
    data_objects::{DepositResponse, RegisterResponse},
    integrations::PaymentGatewayError,
    middleware::JwtMiddlewareFactory,
    routes::{DepositRoute, RegisterRoute},
};

const ORDER_ID: &str = "order_IluGWxBm9U8zJ8";
const PAYMENT_ID: &str = "pay_IluGWxBm9U8zJ9";

fn with_fields(payment: &PaymentSignature, fields: Value) -> Value {
    let mut body = serde_json::to_value(payment).unwrap();
    let (Value::Object(body_map), Value::Object(extra)) = (&mut body, fields) else {
        panic!("request bodies must be JSON objects");
    };
    body_map.extend(extra);
    body
}

fn registration_body(payment: &PaymentSignature) -> Value {
    with_fields(
        payment,
        json!({"email": "Alice@Example.in", "username": "alice", "password": "password123", "balance": "500"}),
    )
}

fn order_for(amount: i64) -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_order()
        .withf(|id| id == ORDER_ID)
        .returning(move |id| Ok(gateway_order(id, Paise::from(amount))));
    gateway
}

fn configure_register(ledger: MockLedgerManager, gateway: MockGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(RegisterRoute::<MockLedgerManager, MockGateway>::new())
            .app_data(web::Data::new(LedgerApi::new(ledger)))
            .app_data(web::Data::new(gateway));
    }
}

fn configure_deposit(ledger: MockLedgerManager, gateway: MockGateway) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let scope = web::scope("/api")
            .wrap(JwtMiddlewareFactory::new(issuer()))
            .service(DepositRoute::<MockLedgerManager, MockGateway>::new());
        cfg.service(scope)
            .app_data(web::Data::new(LedgerApi::new(ledger)))
            .app_data(web::Data::new(gateway));
    }
}

//----------------------------------------------   Registration  ----------------------------------------------------

#[actix_web::test]
async fn register_new_user() {
    let _ = env_logger::try_init();
    let mut ledger = MockLedgerManager::new();
    ledger
        .expect_register_with_deposit()
        .withf(|user, deposit| {
            user.email == "alice@example.in" &&
                user.username == "alice" &&
                user.password_hash.starts_with("$argon2") &&
                deposit.payment_id == PAYMENT_ID &&
                deposit.amount == Paise::from(50_000)
        })
        .times(1)
        .returning(|user, deposit| {
            let mut new_user = test_user(7, &user.email, deposit.amount);
            new_user.username = user.username;
            Ok((new_user, test_transaction(1, 7, deposit.amount, &deposit.payment_id)))
        });
    let body = registration_body(&signed_payment(ORDER_ID, PAYMENT_ID));
    let (status, body) = post_json("/register", None, body, configure_register(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(!body.contains("password"), "{body}");
    let response: RegisterResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.message, "Payment verified and user registered");
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.user.id, 7);
    assert_eq!(response.user.balance, Paise::from(50_000));
    assert_eq!(response.transaction.payment_id.as_deref(), Some(PAYMENT_ID));
    let claims = issuer().validate(&response.access_token).unwrap();
    assert_eq!(claims.sub, 7);
}

#[actix_web::test]
async fn register_with_forged_signature() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_register_with_deposit().never();
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_order().never();
    let mut payment = signed_payment(ORDER_ID, PAYMENT_ID);
    payment.payment_id = "pay_SomeoneElse0001".into();
    let body = registration_body(&payment);
    let (status, body) = post_json("/register", None, body, configure_register(ledger, gateway)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid payment signature"}"#);
}

#[actix_web::test]
async fn register_with_missing_callback_fields() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_register_with_deposit().never();
    let body = json!({"email": "alice@example.in", "username": "alice", "password": "password123", "amount": 500});
    let (status, body) = post_json("/register", None, body, configure_register(ledger, MockGateway::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid payment signature"}"#);
}

#[actix_web::test]
async fn register_with_inflated_amount() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_register_with_deposit().never();
    let body = registration_body(&signed_payment(ORDER_ID, PAYMENT_ID));
    // The order was only for ₹5
    let (status, body) = post_json("/register", None, body, configure_register(ledger, order_for(500))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"The payment amount does not match the order"}"#);
}

#[actix_web::test]
async fn register_without_order_amount_check() {
    let mut ledger = MockLedgerManager::new();
    ledger
        .expect_register_with_deposit()
        .times(1)
        .returning(|user, deposit| Ok((test_user(8, &user.email, deposit.amount), test_transaction(2, 8, deposit.amount, &deposit.payment_id))));
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_order().never();
    let body = registration_body(&signed_payment(ORDER_ID, PAYMENT_ID));
    let options = ServerOptions { verify_order_amount: false };
    let (status, body) =
        post_json_with_options("/register", None, body, options, configure_register(ledger, gateway)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[actix_web::test]
async fn register_existing_email() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_register_with_deposit().returning(|_, _| Err(LedgerApiError::EmailAlreadyRegistered));
    let body = registration_body(&signed_payment(ORDER_ID, PAYMENT_ID));
    let (status, body) = post_json("/register", None, body, configure_register(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"A user with this email address already exists"}"#);
}

#[actix_web::test]
async fn register_with_short_password() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_register_with_deposit().never();
    let payment = signed_payment(ORDER_ID, PAYMENT_ID);
    let body =
        with_fields(&payment, json!({"email": "alice@example.in", "username": "alice", "password": "hunter2", "amount": 500}));
    let (status, body) = post_json("/register", None, body, configure_register(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid account details. Password must be at least 8 characters"}"#);
}

//----------------------------------------------   Deposits  ----------------------------------------------------

fn deposit_body() -> Value {
    with_fields(&signed_payment(ORDER_ID, PAYMENT_ID), json!({"amount": "500"}))
}

#[actix_web::test]
async fn deposit_without_token() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_credit_deposit().never();
    let (status, body) =
        post_json("/api/transaction", None, deposit_body(), configure_deposit(ledger, MockGateway::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No access token was provided."}"#);
}

#[actix_web::test]
async fn deposit_with_expired_token() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_credit_deposit().never();
    let token = issue_token(3, "user@example.in", Utc::now() - Duration::hours(2));
    let (status, _) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, MockGateway::new()))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn deposit_credits_the_token_holder() {
    let _ = env_logger::try_init();
    let mut ledger = MockLedgerManager::new();
    ledger
        .expect_credit_deposit()
        .withf(|user_id, deposit| {
            *user_id == 3 && deposit.order_id == ORDER_ID && deposit.amount == Paise::from(50_000)
        })
        .times(1)
        .returning(|user_id, deposit| {
            let user = test_user(user_id, "user@example.in", Paise::from(150_000));
            Ok((user, test_transaction(11, user_id, deposit.amount, &deposit.payment_id)))
        });
    let token = valid_token(3);
    let (status, body) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.contains(r#""balance":1500,"#), "{body}");
    assert!(body.contains(r#""amount":500,"#), "{body}");
    let response: DepositResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.message, "Payment verified and balance updated");
    assert_eq!(response.balance, Paise::from(150_000));
    assert_eq!(response.transaction.user_id, 3);
    assert_eq!(response.transaction.amount, Paise::from(50_000));
}

#[actix_web::test]
async fn deposit_replayed_payment() {
    let mut ledger = MockLedgerManager::new();
    ledger
        .expect_credit_deposit()
        .returning(|_, deposit| Err(LedgerApiError::DuplicatePayment(deposit.payment_id.clone())));
    let token = valid_token(3);
    let (status, body) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"This payment has already been processed"}"#);
}

#[actix_web::test]
async fn deposit_for_deleted_user() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_credit_deposit().returning(|user_id, _| Err(LedgerApiError::UserNotFound(user_id)));
    let token = valid_token(99);
    let (status, body) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[actix_web::test]
async fn deposit_when_database_fails() {
    let mut ledger = MockLedgerManager::new();
    ledger
        .expect_credit_deposit()
        .returning(|_, _| Err(LedgerApiError::DatabaseError("database is locked".into())));
    let token = valid_token(3);
    let (status, body) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, order_for(50_000))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Payment processing failed"}"#);
}

#[actix_web::test]
async fn deposit_with_forged_signature() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_credit_deposit().never();
    let mut payment = signed_payment(ORDER_ID, PAYMENT_ID);
    payment.signature = "0".repeat(64);
    let body = with_fields(&payment, json!({"amount": "500"}));
    let token = valid_token(3);
    let (status, body) =
        post_json("/api/transaction", Some(&token), body, configure_deposit(ledger, MockGateway::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid payment signature"}"#);
}

#[actix_web::test]
async fn deposit_when_gateway_is_unreachable() {
    let mut ledger = MockLedgerManager::new();
    ledger.expect_credit_deposit().never();
    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_order()
        .returning(|_| Err(PaymentGatewayError::CommunicationError("timed out".into())));
    let token = valid_token(3);
    let (status, body) =
        post_json("/api/transaction", Some(&token), deposit_body(), configure_deposit(ledger, gateway)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Payment processing failed"}"#);
}
