use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use razorpay_tools::RazorpayApi;
use wallet_engine::{AccountApi, AuthApi, LedgerApi, SqliteDatabase};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    integrations::PaymentVerifier,
    middleware::JwtMiddlewareFactory,
    routes::{health, AuthRoute, CreateOrderRoute, DepositRoute, RegisterRoute, UserDataRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.migrate().await.map_err(|e| ServerError::InitializeError(format!("Could not migrate database. {e}")))?;
    }
    if config.razorpay.key_secret.is_empty() {
        warn!("🚨️ RAZORPAY_KEY_SECRET is not set. Every payment will be rejected.");
    }
    let gateway =
        RazorpayApi::new(config.razorpay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db, gateway)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Rejects malformed JSON bodies with the same `{"error": ...}` body as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: RazorpayApi,
) -> Result<Server, ServerError> {
    let bind_addr = (config.host.clone(), config.port);
    let srv = HttpServer::new(move || {
        let accounts_api = AccountApi::new(db.clone());
        let ledger_api = LedgerApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let verifier = PaymentVerifier::new(config.razorpay.key_secret.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("wallet::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(ledger_api))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::new(config.options()))
            .app_data(web::Data::new(jwt_signer.clone()));
        // Routes that require authentication
        let auth_scope = web::scope("/api")
            .wrap(JwtMiddlewareFactory::new(jwt_signer))
            .service(DepositRoute::<SqliteDatabase, RazorpayApi>::new())
            .service(UserDataRoute::<SqliteDatabase>::new());
        app.service(health)
            .service(CreateOrderRoute::<RazorpayApi>::new())
            .service(RegisterRoute::<SqliteDatabase, RazorpayApi>::new())
            .service(AuthRoute::<SqliteDatabase>::new())
            .service(auth_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind(bind_addr)?
    .run();
    Ok(srv)
}
