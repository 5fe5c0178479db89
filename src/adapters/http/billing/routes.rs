//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    create_subscription, handle_squarespace_webhook, handle_stripe_webhook, BillingAppState,
};

/// Create the billing router.
///
/// # Routes
///
/// ## Checkout
/// - `POST /api/subscription/create` - Create customer and incomplete subscription
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /api/stripe/webhook` - Stripe billing events
/// - `POST /webhook/squarespace` - Storefront order events
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .route("/api/subscription/create", post(create_subscription))
        .route("/api/stripe/webhook", post(handle_stripe_webhook))
        .route("/webhook/squarespace", post(handle_squarespace_webhook))
}
