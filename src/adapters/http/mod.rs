//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter; `app_router` assembles them with the
//! shared middleware stack.

pub mod billing;
pub mod health;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export key types for convenience
pub use billing::{billing_router, BillingAppState};
pub use health::health_router;

/// Build the complete application router.
pub fn app_router(state: BillingAppState) -> Router {
    Router::new()
        .merge(health_router())
        .merge(billing_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
