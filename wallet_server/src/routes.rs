//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate function. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Async handlers get executed concurrently by worker threads and thus don’t block
//! execution.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use wallet_common::Paise;
use wallet_engine::{
    helpers::VerifiedPayment,
    traits::{AccountManagement, AuthManagement, LedgerManagement},
    AccountApi,
    AuthApi,
    LedgerApi,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::ServerOptions,
    data_objects::{
        AccessTokenResponse,
        CreateOrderRequest,
        DepositRequest,
        DepositResponse,
        LoginRequest,
        OrderResponse,
        RegisterRequest,
        RegisterResponse,
    },
    errors::ServerError,
    integrations::{NewGatewayOrder, PaymentGateway, PaymentVerifier},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl PaymentGateway);
/// Route handler for the order endpoint
///
/// Creates a payment gateway order for the given rupee amount. The checkout widget takes the returned order id and
/// collects the payment against it. The returned amount is in paise.
pub async fn create_order<G: PaymentGateway>(
    body: web::Json<CreateOrderRequest>,
    gateway: web::Data<G>,
) -> Result<HttpResponse, ServerError> {
    let amount = body.into_inner().amount;
    debug!("💻️ POST order for {amount}");
    if !amount.is_positive() {
        return Err(ServerError::InvalidAmount);
    }
    let order = gateway.create_order(NewGatewayOrder::new(amount)).await.map_err(|e| {
        error!("💻️ Could not create payment order. {e}");
        ServerError::CouldNotCreateOrder(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

//----------------------------------------------   Register  ----------------------------------------------------
route!(register => Post "/register" impl LedgerManagement, PaymentGateway);
/// Route handler for the registration endpoint
///
/// New users pay an opening deposit before their account exists. The client forwards the gateway callback fields along
/// with the account details. If the payment signature is valid (and, optionally, the amount matches the gateway
/// order), the user is created with the deposit as their opening balance and an access token is issued.
pub async fn register<L: LedgerManagement, G: PaymentGateway>(
    body: web::Json<RegisterRequest>,
    api: web::Data<LedgerApi<L>>,
    gateway: web::Data<G>,
    verifier: web::Data<PaymentVerifier>,
    signer: web::Data<TokenIssuer>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let (account, payment, amount) = body.into_inner().into_parts();
    debug!("💻️ POST register for {} with opening deposit {amount}", account.email);
    let verified = verifier.verify(&payment)?;
    check_order_amount(&verified, amount, gateway.as_ref(), options.as_ref()).await?;
    let entry = api.register_with_deposit(account, &verified, amount).await?;
    let access_token = signer.issue_token(&entry.user)?;
    let response = RegisterResponse {
        status: "success".into(),
        message: "Payment verified and user registered".into(),
        access_token,
        token_type: "Bearer".into(),
        user: entry.user,
        transaction: entry.transaction,
    };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(auth => Post "/auth" impl AuthManagement);
/// Route handler for the auth endpoint
///
/// This route is used to authenticate a user with their email and password and issue a JWT access token.
/// The token must be supplied as `Authorization: Bearer <token>` on all `/api` routes.
/// The token is valid for the configured lifetime and will NOT refresh.
pub async fn auth<A: AuthManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<A>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let LoginRequest { email, password } = body.into_inner();
    trace!("💻️ Received auth request for {email}");
    let user = api.authenticate(&email, &password).await?;
    let access_token = signer.issue_token(&user)?;
    trace!("💻️ Issued access token for user #{}", user.id);
    Ok(HttpResponse::Ok().json(AccessTokenResponse::bearer(access_token, signer.lifetime().num_seconds())))
}

//----------------------------------------------   Deposits  ----------------------------------------------------
route!(deposit => Post "/transaction" impl LedgerManagement, PaymentGateway);
/// Route handler for the deposit endpoint
///
/// Credits a verified gateway payment to the authenticated user's balance. The balance update and the transaction
/// record are written atomically, and a payment can only ever be credited once.
pub async fn deposit<L: LedgerManagement, G: PaymentGateway>(
    claims: JwtClaims,
    body: web::Json<DepositRequest>,
    api: web::Data<LedgerApi<L>>,
    gateway: web::Data<G>,
    verifier: web::Data<PaymentVerifier>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let DepositRequest { payment, amount } = body.into_inner();
    debug!("💻️ POST deposit of {amount} for user #{}", claims.sub);
    let verified = verifier.verify(&payment)?;
    check_order_amount(&verified, amount, gateway.as_ref(), options.as_ref()).await?;
    let entry = api.credit_deposit(claims.user_id(), &verified, amount).await?;
    let response = DepositResponse {
        status: "success".into(),
        message: "Payment verified and balance updated".into(),
        balance: entry.user.balance,
        transaction: entry.transaction,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Confirms that the amount the client claims matches what the gateway order was created for. Skipped when
/// `verify_order_amount` is off.
async fn check_order_amount<G: PaymentGateway>(
    payment: &VerifiedPayment,
    amount: Paise,
    gateway: &G,
    options: &ServerOptions,
) -> Result<(), ServerError> {
    if !options.verify_order_amount {
        return Ok(());
    }
    let order = gateway.fetch_order(payment.order_id()).await?;
    if order.amount == amount {
        Ok(())
    } else {
        warn!(
            "💻️ Amount mismatch for order {}. Client claimed {amount}, but the order is for {}",
            order.id, order.amount
        );
        Err(ServerError::AmountMismatch)
    }
}

//----------------------------------------------   User data  ----------------------------------------------------
route!(user_data => Get "/user/data" impl AccountManagement);
/// Route handler for the user data endpoint
///
/// Returns the authenticated user (including their balance) and their ten most recent transactions, newest first.
pub async fn user_data<B: AccountManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET user data for user #{}", claims.sub);
    let data = api
        .user_data(claims.user_id())
        .await?
        .ok_or_else(|| ServerError::NoRecordFound("User not found".into()))?;
    Ok(HttpResponse::Ok().json(data))
}
