use serde::{Deserialize, Serialize};
use serde_json::Value;
use wallet_common::{Paise, INR_CURRENCY_CODE};

/// Request body for `POST /v1/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRazorpayOrder {
    /// Amount in the currency's smallest unit (paise for INR).
    pub amount: Paise,
    pub currency: String,
    pub receipt: String,
    /// `1` asks Razorpay to capture the payment automatically once it is authorized.
    pub payment_capture: u8,
}

impl NewRazorpayOrder {
    pub fn new(amount: Paise, receipt: &str) -> Self {
        Self { amount, currency: INR_CURRENCY_CODE.to_string(), receipt: receipt.to_string(), payment_capture: 1 }
    }
}

/// An order as returned by the Orders API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RazorpayOrder {
    pub id: String,
    #[serde(default)]
    pub entity: String,
    pub amount: Paise,
    #[serde(default)]
    pub amount_paid: Paise,
    #[serde(default)]
    pub amount_due: Paise,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
    #[serde(default)]
    pub attempts: u32,
    /// Razorpay sends an empty array when there are no notes, and an object otherwise.
    #[serde(default)]
    pub notes: Value,
    pub created_at: i64,
}

/// The envelope Razorpay wraps around every error response.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorResponse {
    pub error: RazorpayErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}
