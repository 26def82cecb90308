use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use thiserror::Error;
use wallet_engine::{
    helpers::PaymentSignatureError,
    traits::{AccountApiError, AuthApiError, LedgerApiError},
};

use crate::integrations::PaymentGatewayError;

/// Every error a request handler can return. The `Display` text is what the client sees, so variants that wrap
/// backend details keep them out of the message.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server.")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Invalid payment signature")]
    InvalidPaymentSignature,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("The payment amount does not match the order")]
    AmountMismatch,
    #[error("This payment has already been processed")]
    DuplicatePayment,
    #[error("A user with this email address already exists")]
    EmailAlreadyRegistered,
    #[error("Invalid account details. {0}")]
    InvalidAccountDetails(String),
    #[error("Error creating payment order")]
    CouldNotCreateOrder(String),
    #[error("Payment processing failed")]
    PaymentProcessingFailed(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidPaymentSignature => StatusCode::BAD_REQUEST,
            Self::InvalidAmount => StatusCode::BAD_REQUEST,
            Self::AmountMismatch => StatusCode::BAD_REQUEST,
            Self::DuplicatePayment => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyRegistered => StatusCode::BAD_REQUEST,
            Self::InvalidAccountDetails(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::CouldNotIssueToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CouldNotCreateOrder(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was provided.")]
    MissingToken,
    #[error("Access token is not in the correct format.")]
    PoorlyFormattedToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Could not issue an access token.")]
    CouldNotIssueToken(String),
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match e {
            AuthApiError::InvalidCredentials => Self::AuthenticationError(AuthError::InvalidCredentials),
            AuthApiError::PasswordHashError(_) | AuthApiError::DatabaseError(_) => {
                error!("🔐️ Could not authenticate user. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        error!("🗃️ Account query failed. {e}");
        Self::BackendError(e.to_string())
    }
}

impl From<LedgerApiError> for ServerError {
    fn from(e: LedgerApiError) -> Self {
        match e {
            LedgerApiError::UserNotFound(_) => Self::NoRecordFound("User not found".into()),
            LedgerApiError::DuplicatePayment(_) => Self::DuplicatePayment,
            LedgerApiError::EmailAlreadyRegistered => Self::EmailAlreadyRegistered,
            LedgerApiError::InvalidAmount(_) => Self::InvalidAmount,
            LedgerApiError::InvalidAccountDetails(s) => Self::InvalidAccountDetails(s),
            LedgerApiError::PasswordHashError(_) | LedgerApiError::DatabaseError(_) => {
                error!("🗃️ Ledger update failed. {e}");
                Self::PaymentProcessingFailed(e.to_string())
            },
        }
    }
}

impl From<PaymentSignatureError> for ServerError {
    fn from(e: PaymentSignatureError) -> Self {
        match e {
            PaymentSignatureError::InvalidSignature | PaymentSignatureError::MissingField(_) => {
                Self::InvalidPaymentSignature
            },
            PaymentSignatureError::MissingSecret | PaymentSignatureError::InvalidSecret => {
                error!("🔐️ Payment signatures cannot be checked. {e}. Set RAZORPAY_KEY_SECRET.");
                Self::ConfigurationError(e.to_string())
            },
        }
    }
}

impl From<PaymentGatewayError> for ServerError {
    fn from(e: PaymentGatewayError) -> Self {
        error!("💻️ Payment gateway request failed. {e}");
        Self::PaymentProcessingFailed(e.to_string())
    }
}
