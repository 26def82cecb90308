use actix_web::{http::StatusCode, web, web::ServiceConfig};
use serde_json::Value;
use wallet_common::Paise;
use wallet_engine::{traits::AccountApiError, AccountApi};

use super::{
    helpers::{get_request, issuer, test_transaction, test_user, valid_token},
    mocks::MockAccountManager,
};
use crate::{middleware::JwtMiddlewareFactory, routes::UserDataRoute};

fn configure(accounts: MockAccountManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let scope = web::scope("/api")
            .wrap(JwtMiddlewareFactory::new(issuer()))
            .service(UserDataRoute::<MockAccountManager>::new());
        cfg.service(scope).app_data(web::Data::new(AccountApi::new(accounts)));
    }
}

fn untouched_accounts() -> MockAccountManager {
    let mut accounts = MockAccountManager::new();
    accounts.expect_fetch_user_by_id().never();
    accounts.expect_fetch_recent_transactions().never();
    accounts
}

#[actix_web::test]
async fn user_data_without_token() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("/api/user/data", None, configure(untouched_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Authentication Error. No access token was provided."}"#);
}

#[actix_web::test]
async fn user_data_with_malformed_header() {
    let token = valid_token(5);
    let header = format!("Token {token}");
    let (status, _) = get_request("/api/user/data", Some(&header), configure(untouched_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_request("/api/user/data", Some("Bearer not.a.jwt"), configure(untouched_accounts())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn user_data_for_token_holder() {
    let mut accounts = MockAccountManager::new();
    accounts
        .expect_fetch_user_by_id()
        .withf(|id| *id == 5)
        .times(1)
        .returning(|id| Ok(Some(test_user(id, "user@example.in", Paise::from(75_050)))));
    accounts.expect_fetch_recent_transactions().withf(|id, limit| *id == 5 && *limit == 10).times(1).returning(
        |id, _| {
            Ok(vec![
                test_transaction(2, id, Paise::from(25_050), "pay_2"),
                test_transaction(1, id, Paise::from(50_000), "pay_1"),
            ])
        },
    );
    let header = format!("Bearer {}", valid_token(5));
    let (status, body) = get_request("/api/user/data", Some(&header), configure(accounts)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(!body.contains("password_hash"), "{body}");
    let data: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(data["user"]["id"], 5);
    assert_eq!(data["user"]["balance"], 750.5);
    let transactions = data["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["payment_id"], "pay_2");
    assert_eq!(transactions[0]["type"], "credit");
    assert_eq!(transactions[0]["status"], "completed");
}

#[actix_web::test]
async fn user_data_for_deleted_user() {
    let mut accounts = MockAccountManager::new();
    accounts.expect_fetch_user_by_id().returning(|_| Ok(None));
    accounts.expect_fetch_recent_transactions().never();
    let header = format!("Bearer {}", valid_token(5));
    let (status, body) = get_request("/api/user/data", Some(&header), configure(accounts)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[actix_web::test]
async fn user_data_when_database_fails() {
    let mut accounts = MockAccountManager::new();
    accounts
        .expect_fetch_user_by_id()
        .returning(|_| Err(AccountApiError::DatabaseError("no such table: users".into())));
    let header = format!("Bearer {}", valid_token(5));
    let (status, body) = get_request("/api/user/data", Some(&header), configure(accounts)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"An error occurred on the backend of the server."}"#);
}
