//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over ports.

pub mod billing;

pub use billing::{
    ActivateSellerSubscriptionCommand, ActivateSellerSubscriptionHandler, ActivationResult,
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
    HandleSquarespaceWebhookCommand, HandleSquarespaceWebhookHandler,
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, PriceCatalog,
    SquarespaceWebhookOutcome, StripeWebhookOutcome,
};
