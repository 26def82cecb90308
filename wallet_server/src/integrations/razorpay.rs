//! [`PaymentGateway`] implementation backed by the Razorpay Orders API.
use log::*;
use razorpay_tools::{NewRazorpayOrder, RazorpayApi, RazorpayApiError, RazorpayOrder};

use super::{GatewayOrder, NewGatewayOrder, PaymentGateway, PaymentGatewayError};

impl From<RazorpayApiError> for PaymentGatewayError {
    fn from(e: RazorpayApiError) -> Self {
        match e {
            RazorpayApiError::QueryError { .. } | RazorpayApiError::InvalidCredentials => {
                PaymentGatewayError::RequestRejected(e.to_string())
            },
            _ => PaymentGatewayError::CommunicationError(e.to_string()),
        }
    }
}

impl From<RazorpayOrder> for GatewayOrder {
    fn from(order: RazorpayOrder) -> Self {
        Self { id: order.id, amount: order.amount, currency: order.currency, receipt: order.receipt, status: order.status }
    }
}

impl PaymentGateway for RazorpayApi {
    async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, PaymentGatewayError> {
        let NewGatewayOrder { amount, currency, receipt } = order;
        let mut request = NewRazorpayOrder::new(amount, &receipt);
        request.currency = currency;
        let order = RazorpayApi::create_order(self, request).await?;
        info!("💻️ Razorpay order {} created for {}", order.id, order.amount);
        Ok(order.into())
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, PaymentGatewayError> {
        let order = RazorpayApi::fetch_order(self, order_id).await?;
        trace!("💻️ Razorpay order {} is {} ({} paid)", order.id, order.status, order.amount_paid);
        Ok(order.into())
    }
}
