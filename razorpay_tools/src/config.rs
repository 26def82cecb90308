use log::*;
use wallet_common::Secret;

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    /// The public key id, e.g. `rzp_test_XXXXXXXXXXXXXX`. The checkout widget uses the same value.
    pub key_id: String,
    /// The API secret. Razorpay also signs checkout callbacks with this key.
    pub key_secret: Secret<String>,
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            key_id: key_id.to_string(),
            key_secret: Secret::new(key_secret.to_string()),
            api_url: DEFAULT_RAZORPAY_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn new_from_env_or_default() -> Self {
        let key_id = std::env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| {
            error!("🪛️ RAZORPAY_KEY_ID is not set. Orders cannot be created until it is.");
            String::default()
        });
        let key_secret = Secret::new(std::env::var("RAZORPAY_KEY_SECRET").unwrap_or_else(|_| {
            error!("🪛️ RAZORPAY_KEY_SECRET is not set. Orders cannot be created, nor payments verified, until it is.");
            String::default()
        }));
        let api_url = std::env::var("RAZORPAY_API_URL").unwrap_or_else(|_| {
            debug!("RAZORPAY_API_URL not set, using {DEFAULT_RAZORPAY_API_URL}");
            DEFAULT_RAZORPAY_API_URL.to_string()
        });
        Self { key_id, key_secret, api_url: api_url.trim_end_matches('/').to_string() }
    }
}
