//! Liveness and diagnostic endpoints.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "Ming Ming Stripe backend ✅";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /test - plain-text reachability check
pub async fn test_route() -> &'static str {
    "Test route works!"
}

/// Routes that need no state.
pub fn health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/test", get(test_route))
}
