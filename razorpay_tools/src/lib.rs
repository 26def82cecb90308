//! A minimal client for the parts of the Razorpay Orders API that the wallet server needs.
//!
//! * [`RazorpayApi::create_order`] creates the order the checkout widget pays against.
//! * [`RazorpayApi::fetch_order`] reads an order back, e.g. to confirm what amount was actually paid for.
//!
//! The payment signature that Razorpay hands back to the checkout widget is verified by the wallet engine, not here.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::RazorpayApi;
pub use config::{RazorpayConfig, DEFAULT_RAZORPAY_API_URL};
pub use data_objects::{NewRazorpayOrder, RazorpayOrder};
pub use error::RazorpayApiError;
