//! Billing HTTP adapter - checkout and payment webhooks.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{
    BillingApiError, BillingAppState, SQUARESPACE_SIGNATURE_HEADER, STRIPE_SIGNATURE_HEADER,
};
pub use routes::billing_router;
