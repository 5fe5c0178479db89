//! Billing command handlers.

mod activate_seller_subscription;
mod create_subscription;
mod handle_squarespace_webhook;
mod handle_stripe_webhook;

pub use activate_seller_subscription::{
    ActivateSellerSubscriptionCommand, ActivateSellerSubscriptionHandler, ActivationResult,
};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult, PriceCatalog,
};
pub use handle_squarespace_webhook::{
    HandleSquarespaceWebhookCommand, HandleSquarespaceWebhookHandler, SquarespaceWebhookOutcome,
};
pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, StripeWebhookOutcome,
};
