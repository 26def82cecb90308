use std::fmt::Debug;

use chrono::Utc;
use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wallet_common::{Paise, Secret, INR_CURRENCY_CODE};
use wallet_engine::helpers::{PaymentSignature, VerifiedPayment};

use crate::errors::ServerError;

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("The payment gateway rejected the request. {0}")]
    RequestRejected(String),
    #[error("Could not communicate with the payment gateway. {0}")]
    CommunicationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGatewayOrder {
    pub amount: Paise,
    pub currency: String,
    pub receipt: String,
}

impl NewGatewayOrder {
    /// An INR order with a `receipt_<unix millis>` receipt.
    pub fn new(amount: Paise) -> Self {
        let receipt = format!("receipt_{}", Utc::now().timestamp_millis());
        Self { amount, currency: INR_CURRENCY_CODE.to_string(), receipt }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: Paise,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

/// The payment gateway operations the server needs.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Creates an order for the checkout widget to pay against.
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError>;

    /// Fetches an existing order by its gateway id.
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentGatewayError>;
}

/// Checks gateway callback signatures using the merchant's key secret.
#[derive(Clone)]
pub struct PaymentVerifier {
    key_secret: Secret<String>,
}

impl Debug for PaymentVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentVerifier ({})", self.key_secret)
    }
}

impl PaymentVerifier {
    pub fn new(key_secret: Secret<String>) -> Self {
        Self { key_secret }
    }

    pub fn verify(&self, signature: &PaymentSignature) -> Result<VerifiedPayment, ServerError> {
        let verified = signature.verify(&self.key_secret).map_err(|e| {
            warn!("🔐️ Payment {} for order {} failed verification. {e}", signature.payment_id, signature.order_id);
            e
        })?;
        debug!("🔐️ Payment {} for order {} verified", verified.payment_id(), verified.order_id());
        Ok(verified)
    }
}
