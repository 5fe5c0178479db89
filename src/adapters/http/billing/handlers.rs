//! HTTP handlers for checkout and webhook endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.
//! Webhook handlers take the body as raw `Bytes` so signatures are checked
//! against exactly what was sent.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;

use crate::application::billing::{
    ActivateSellerSubscriptionHandler, CreateSubscriptionCommand, CreateSubscriptionHandler,
    HandleSquarespaceWebhookCommand, HandleSquarespaceWebhookHandler, HandleStripeWebhookCommand,
    HandleStripeWebhookHandler, PriceCatalog, SquarespaceWebhookOutcome,
};
use crate::domain::billing::{BillingError, StripeWebhookVerifier};
use crate::ports::{PaymentProvider, SubscriptionRepository, UserDirectory};

use super::dto::{
    CreateSubscriptionRequest, CreateSubscriptionResponse, ErrorResponse, EventIgnoredResponse,
    SellerActivatedResponse, WebhookReceivedResponse,
};

/// Header carrying the Stripe `t=...,v1=...` signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

/// Header carrying the `sha256=<hex>` storefront signature.
pub const SQUARESPACE_SIGNATURE_HEADER: &str = "x-squarespace-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct BillingAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub subscription_repository: Arc<dyn SubscriptionRepository>,
    pub prices: PriceCatalog,
    pub stripe_verifier: StripeWebhookVerifier,
    pub squarespace_secret: SecretString,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.payment_provider.clone(), self.prices.clone())
    }

    pub fn activate_seller_handler(&self) -> ActivateSellerSubscriptionHandler {
        ActivateSellerSubscriptionHandler::new(
            self.user_directory.clone(),
            self.subscription_repository.clone(),
        )
    }

    pub fn stripe_webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(self.stripe_verifier.clone())
    }

    pub fn squarespace_webhook_handler(&self) -> HandleSquarespaceWebhookHandler {
        HandleSquarespaceWebhookHandler::new(
            self.squarespace_secret.clone(),
            Arc::new(self.activate_seller_handler()),
        )
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/subscription/create - Create customer and incomplete subscription
pub async fn create_subscription(
    State(state): State<BillingAppState>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BillingApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected checkout request body");
        BillingError::validation("body", "Invalid request body")
    })?;

    let cmd = CreateSubscriptionCommand {
        email: request.email,
        plan_type: request.plan_type,
    };

    let result = state.create_subscription_handler().handle(cmd).await?;
    Ok(Json(CreateSubscriptionResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhooks
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/stripe/webhook - Verify, classify and log a Stripe event
///
/// Every rejection is a 400 with a plain-text `Webhook Error: ...` body.
pub async fn handle_stripe_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let cmd = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature: header_value(&headers, STRIPE_SIGNATURE_HEADER),
    };

    match state.stripe_webhook_handler().handle(cmd) {
        Ok(_) => Json(WebhookReceivedResponse { received: true }).into_response(),
        Err(e) => (e.status_code(), e.response_text()).into_response(),
    }
}

/// POST /webhook/squarespace - Verify an order webhook and activate the buyer
pub async fn handle_squarespace_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, BillingApiError> {
    let cmd = HandleSquarespaceWebhookCommand {
        payload: body.to_vec(),
        signature: header_value(&headers, SQUARESPACE_SIGNATURE_HEADER),
    };

    let response = match state.squarespace_webhook_handler().handle(cmd).await? {
        SquarespaceWebhookOutcome::Activated(result) => {
            Json(SellerActivatedResponse::from(result)).into_response()
        }
        SquarespaceWebhookOutcome::Ignored { reason, .. } => {
            Json(EventIgnoredResponse::new(reason)).into_response()
        }
    };

    Ok(response)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
#[derive(Debug)]
pub struct BillingApiError(BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BillingError::Validation { .. } => StatusCode::BAD_REQUEST,
            BillingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BillingError::NotFound(_) => StatusCode::NOT_FOUND,
            BillingError::Configuration(_) | BillingError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self.0 {
            BillingError::Upstream {
                message,
                details: Some(details),
            } => ErrorResponse::with_details(message, details),
            other => ErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBillingStore;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::billing::signature;
    use crate::domain::foundation::{Email, UserId};
    use crate::ports::PaymentError;
    use axum::http::HeaderValue;
    use serde_json::json;

    const SQUARESPACE_SECRET: &str = "whsec_sq";

    fn test_state(provider: &MockPaymentProvider, store: &InMemoryBillingStore) -> BillingAppState {
        BillingAppState {
            payment_provider: Arc::new(provider.clone()),
            user_directory: Arc::new(store.clone()),
            subscription_repository: Arc::new(store.clone()),
            prices: PriceCatalog::new(
                Some("price_monthly".to_string()),
                Some("price_yearly".to_string()),
            ),
            stripe_verifier: StripeWebhookVerifier::new("whsec_stripe"),
            squarespace_secret: SecretString::new(SQUARESPACE_SECRET.to_string()),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Checkout Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_subscription_returns_secret_and_id() {
        let provider = MockPaymentProvider::new();
        let store = InMemoryBillingStore::new();

        let request = CreateSubscriptionRequest {
            email: Some("buyer@example.com".to_string()),
            plan_type: Some("monthly".to_string()),
        };
        let response = create_subscription(State(test_state(&provider, &store)), Ok(Json(request)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["subscriptionId"].as_str().unwrap().starts_with("sub_mock_"));
        assert!(body["clientSecret"].is_string());
    }

    #[tokio::test]
    async fn create_subscription_without_email_is_400() {
        let provider = MockPaymentProvider::new();
        let store = InMemoryBillingStore::new();

        let response = create_subscription(
            State(test_state(&provider, &store)),
            Ok(Json(CreateSubscriptionRequest::default())),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Email is required"}));
    }

    #[tokio::test]
    async fn provider_failure_is_500_with_details() {
        let provider = MockPaymentProvider::new();
        provider.set_method_error("create_customer", PaymentError::authentication("Bad key"));
        let store = InMemoryBillingStore::new();

        let request = CreateSubscriptionRequest {
            email: Some("buyer@example.com".to_string()),
            plan_type: Some("yearly".to_string()),
        };
        let response = create_subscription(State(test_state(&provider, &store)), Ok(Json(request)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Bad key", "details": "authentication_error"})
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn stripe_webhook_without_signature_is_400_text() {
        let provider = MockPaymentProvider::new();
        let store = InMemoryBillingStore::new();

        let response = handle_stripe_webhook(
            State(test_state(&provider, &store)),
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("Webhook Error: "));
    }

    #[tokio::test]
    async fn squarespace_webhook_activates_known_buyer() {
        let provider = MockPaymentProvider::new();
        let store = InMemoryBillingStore::new();
        store
            .add_user(UserId::new("u-1").unwrap(), Email::new("buyer@example.com").unwrap())
            .await;

        let body = json!({
            "eventType": "order.create",
            "customerEmail": "buyer@example.com",
            "orderStatus": "PENDING_FULFILLMENT",
            "lineItems": [{"productName": "Seller Subscription"}]
        })
        .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(
            SQUARESPACE_SIGNATURE_HEADER,
            HeaderValue::from_str(&signature::sign(body.as_bytes(), SQUARESPACE_SECRET)).unwrap(),
        );

        let response = handle_squarespace_webhook(
            State(test_state(&provider, &store)),
            headers,
            Bytes::from(body),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Seller subscription activated",
                "userId": "u-1",
                "email": "buyer@example.com"
            })
        );
        assert_eq!(store.subscription_count().await, 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_validation_to_400() {
        let err = BillingApiError(BillingError::validation("email", "Email is required"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_authentication_to_401() {
        let err = BillingApiError(BillingError::authentication("Invalid signature"));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_not_found_to_404() {
        let err = BillingApiError(BillingError::not_found("User not found"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_configuration_to_500() {
        let err = BillingApiError(BillingError::configuration("missing"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_upstream_to_500() {
        let err = BillingApiError(BillingError::upstream("Failed to activate subscription"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
