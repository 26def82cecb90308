//! # Payment gateway callback signatures
//!
//! When a customer completes checkout, the payment gateway hands the client three values: the gateway order id, the
//! payment id and a signature. The client forwards them to us, so none of them can be trusted until the signature has
//! been checked against our merchant secret.
//!
//! ## Message format
//!
//! ```text
//!    {order_id}|{payment_id}
//! ```
//!
//! The signature is the lowercase hex encoding of `HMAC-SHA256(key_secret, message)`.
//!
//! [`PaymentSignature::verify`] is the only way to obtain a [`VerifiedPayment`], and the ledger only accepts a
//! [`VerifiedPayment`].
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use wallet_common::Secret;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentSignatureError {
    #[error("Payment details are incomplete: {0} is missing")]
    MissingField(&'static str),
    #[error("The payment signature is invalid")]
    InvalidSignature,
    #[error("No gateway secret has been configured")]
    MissingSecret,
    #[error("The gateway secret cannot be used as an HMAC key")]
    InvalidSecret,
}

/// The gateway's callback payload. Field names match what the gateway sends to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSignature {
    #[serde(rename = "razorpay_order_id", default)]
    pub order_id: String,
    #[serde(rename = "razorpay_payment_id", default)]
    pub payment_id: String,
    #[serde(rename = "razorpay_signature", default)]
    pub signature: String,
}

/// A payment whose gateway signature has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayment {
    order_id: String,
    payment_id: String,
}

impl VerifiedPayment {
    pub fn order_id(&self) -> &str {
        self.order_id.as_str()
    }

    pub fn payment_id(&self) -> &str {
        self.payment_id.as_str()
    }
}

impl PaymentSignature {
    pub fn new<S: Into<String>>(order_id: S, payment_id: S, signature: S) -> Self {
        Self { order_id: order_id.into(), payment_id: payment_id.into(), signature: signature.into() }
    }

    /// Signs the order and payment id pair the same way the gateway does.
    pub fn create(order_id: &str, payment_id: &str, secret: &Secret<String>) -> Result<Self, PaymentSignatureError> {
        let signature = calculate_signature(order_id, payment_id, secret)?;
        Ok(Self::new(order_id, payment_id, signature.as_str()))
    }

    pub fn message(&self) -> String {
        signature_message(&self.order_id, &self.payment_id)
    }

    pub fn verify(&self, secret: &Secret<String>) -> Result<VerifiedPayment, PaymentSignatureError> {
        if secret.is_empty() {
            return Err(PaymentSignatureError::MissingSecret);
        }
        if self.order_id.is_empty() {
            return Err(PaymentSignatureError::MissingField("razorpay_order_id"));
        }
        if self.payment_id.is_empty() {
            return Err(PaymentSignatureError::MissingField("razorpay_payment_id"));
        }
        if self.signature.is_empty() {
            return Err(PaymentSignatureError::MissingField("razorpay_signature"));
        }
        let expected = calculate_signature(&self.order_id, &self.payment_id, secret)?;
        if bool::from(expected.as_bytes().ct_eq(self.signature.as_bytes())) {
            Ok(VerifiedPayment { order_id: self.order_id.clone(), payment_id: self.payment_id.clone() })
        } else {
            Err(PaymentSignatureError::InvalidSignature)
        }
    }
}

pub fn signature_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Lowercase hex HMAC-SHA256 of `order_id|payment_id`.
pub fn calculate_signature(
    order_id: &str,
    payment_id: &str,
    secret: &Secret<String>,
) -> Result<String, PaymentSignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.reveal().as_bytes())
        .map_err(|_| PaymentSignatureError::InvalidSecret)?;
    mac.update(signature_message(order_id, payment_id).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
