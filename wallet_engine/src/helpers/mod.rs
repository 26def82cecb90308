mod password;
mod payment_signature;

pub use password::{hash_password, hash_password_async, verify_password, verify_password_async, PasswordError};
pub use payment_signature::{calculate_signature, PaymentSignature, PaymentSignatureError, VerifiedPayment};
