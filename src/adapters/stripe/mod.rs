//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration:
//! - Customer creation
//! - Incomplete subscription creation with the payment intent client secret
//!
//! Webhook verification lives in the domain (`StripeWebhookVerifier`) since it
//! needs no network access.
//!
//! # Security
//!
//! - The secret API key is held as `secrecy::SecretString`

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use api_types::{
    Expandable, StripeApiError, StripeCustomer, StripeErrorBody, StripeInvoice,
    StripePaymentIntent, StripeSubscription,
};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter, STRIPE_API_BASE_URL};
