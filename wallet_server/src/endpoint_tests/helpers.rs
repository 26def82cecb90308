use actix_web::{
    body::to_bytes,
    dev::ServiceResponse,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use wallet_common::{Paise, Secret};
use wallet_engine::{
    db_types::{Transaction, TransactionStatus, TransactionType, User},
    helpers::PaymentSignature,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::{AuthConfig, ServerOptions},
    integrations::{GatewayOrder, PaymentVerifier},
    server::json_config,
};

// Test-only secrets. DO NOT re-use these anywhere.
pub const TEST_JWT_SECRET: &str = "endpoint-test-jwt-secret";
pub const TEST_GATEWAY_SECRET: &str = "endpoint-test-razorpay-secret";

pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new(TEST_JWT_SECRET, Duration::hours(24))
}

pub fn issuer() -> TokenIssuer {
    TokenIssuer::new(&get_auth_config())
}

pub fn issue_token(user_id: i64, email: &str, expiry: DateTime<Utc>) -> String {
    issuer().sign(&JwtClaims::new(user_id, email, expiry)).expect("Failed to sign token")
}

pub fn valid_token(user_id: i64) -> String {
    issue_token(user_id, "user@example.in", Utc::now() + Duration::hours(1))
}

pub fn signed_payment(order_id: &str, payment_id: &str) -> PaymentSignature {
    PaymentSignature::create(order_id, payment_id, &Secret::new(TEST_GATEWAY_SECRET.to_string()))
        .expect("Failed to sign payment")
}

pub fn test_user(id: i64, email: &str, balance: Paise) -> User {
    let now = Utc::now();
    User {
        id,
        email: email.to_string(),
        username: "test user".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        balance,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_transaction(id: i64, user_id: i64, amount: Paise, payment_id: &str) -> Transaction {
    Transaction {
        id,
        user_id,
        amount,
        tx_type: TransactionType::Credit,
        status: TransactionStatus::Completed,
        payment_id: Some(payment_id.to_string()),
        created_at: Utc::now(),
    }
}

pub fn gateway_order(id: &str, amount: Paise) -> GatewayOrder {
    GatewayOrder {
        id: id.to_string(),
        amount,
        currency: "INR".to_string(),
        receipt: Some("receipt_1717236000000".to_string()),
        status: "paid".to_string(),
    }
}

/// Sends the request to an app built with the test token issuer, the test gateway secret and `options`, and returns
/// the status and body. Errors raised by middleware are rendered the same way the server would render them.
pub async fn send_request<F>(req: TestRequest, options: ServerOptions, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let verifier = PaymentVerifier::new(Secret::new(TEST_GATEWAY_SECRET.to_string()));
    let app = App::new()
        .app_data(json_config())
        .app_data(web::Data::new(issuer()))
        .app_data(web::Data::new(verifier))
        .app_data(web::Data::new(options))
        .configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => read_response(res).await,
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let body = to_bytes(res.into_body()).await.expect("Could not read error body");
            (status, String::from_utf8_lossy(&body).into_owned())
        },
    }
}

async fn read_response<B: actix_web::body::MessageBody>(res: ServiceResponse<B>) -> (StatusCode, String) {
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn post_json<F>(path: &str, token: Option<&str>, body: serde_json::Value, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    post_json_with_options(path, token, body, ServerOptions::default(), configure).await
}

pub async fn post_json_with_options<F>(
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
    options: ServerOptions,
    configure: F,
) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
{
    let mut req = TestRequest::post().uri(path).set_json(body);
    if let Some(token) = token {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    send_request(req, options, configure).await
}

pub async fn get_request<F>(path: &str, auth_header: Option<&str>, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::get().uri(path);
    if let Some(header) = auth_header {
        req = req.insert_header(("Authorization", header.to_string()));
    }
    send_request(req, ServerOptions::default(), configure).await
}
