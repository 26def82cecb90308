//! Adapters between the server and third-party services.
mod payment_gateway;
pub mod razorpay;

pub use payment_gateway::{GatewayOrder, NewGatewayOrder, PaymentGateway, PaymentGatewayError, PaymentVerifier};
