use serde::{Deserialize, Serialize};
use wallet_common::{rupees, Paise};
use wallet_engine::{
    account_objects::NewAccount,
    db_types::{Transaction, User},
    helpers::PaymentSignature,
};

use crate::integrations::GatewayOrder;

//----------------------------------------------   Orders  ----------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The order amount, in rupees
    #[serde(with = "rupees")]
    pub amount: Paise,
}

/// The gateway order, as the checkout widget needs it. `amount` is in paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub amount: Paise,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

impl From<GatewayOrder> for OrderResponse {
    fn from(order: GatewayOrder) -> Self {
        Self { id: order.id, amount: order.amount, currency: order.currency, receipt: order.receipt, status: order.status }
    }
}

//----------------------------------------------   Registration  ----------------------------------------------------
/// The gateway callback fields plus the new user's details.
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(flatten)]
    pub payment: PaymentSignature,
    pub email: String,
    pub username: String,
    pub password: String,
    /// The opening deposit, in rupees
    #[serde(with = "rupees", alias = "balance")]
    pub amount: Paise,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RegisterRequest {{ email: {}, username: {}, amount: {}, payment: {:?} }}",
            self.email, self.username, self.amount, self.payment
        )
    }
}

impl RegisterRequest {
    pub fn into_parts(self) -> (NewAccount, PaymentSignature, Paise) {
        let account = NewAccount { email: self.email, username: self.username, password: self.password };
        (account, self.payment, self.amount)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user: User,
    pub transaction: Transaction,
}

//----------------------------------------------   Auth  ----------------------------------------------------
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

impl AccessTokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self { access_token, token_type: "Bearer".into(), expires_in }
    }
}

//----------------------------------------------   Deposits  ----------------------------------------------------
/// The gateway callback fields plus the amount being deposited.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositRequest {
    #[serde(flatten)]
    pub payment: PaymentSignature,
    /// The deposit amount, in rupees
    #[serde(with = "rupees")]
    pub amount: Paise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResponse {
    pub status: String,
    pub message: String,
    /// The new balance, in rupees
    #[serde(with = "rupees")]
    pub balance: Paise,
    pub transaction: Transaction,
}
