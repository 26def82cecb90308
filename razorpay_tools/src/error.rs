use thiserror::Error;

#[derive(Debug, Error)]
pub enum RazorpayApiError {
    #[error("Could not initialize the Razorpay client: {0}")]
    Initialization(String),
    #[error("Razorpay rejected the API key. Check RAZORPAY_KEY_ID and RAZORPAY_KEY_SECRET.")]
    InvalidCredentials,
    #[error("No response from Razorpay: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize the Razorpay response: {0}")]
    JsonError(String),
    #[error("Razorpay returned {status} ({code}). {message}")]
    QueryError { status: u16, code: String, message: String },
}

impl RazorpayApiError {
    /// Builds the error for a non-success response. Razorpay wraps errors in an `{"error": {"code", "description"}}`
    /// envelope; anything else is passed through as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::InvalidCredentials;
        }
        match serde_json::from_str::<crate::data_objects::RazorpayErrorResponse>(body) {
            Ok(envelope) => {
                Self::QueryError { status, code: envelope.error.code, message: envelope.error.description }
            },
            Err(_) => Self::QueryError { status, code: "UNKNOWN".into(), message: body.to_string() },
        }
    }
}
