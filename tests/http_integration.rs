//! Integration tests for the billing HTTP surface.
//!
//! These tests drive the full router (middleware included) with
//! `tower::ServiceExt::oneshot`, backed by the in-memory store and the mock
//! payment provider:
//! 1. Health and diagnostic routes
//! 2. Checkout subscription creation
//! 3. Squarespace order webhooks end to end
//! 4. Stripe webhook verification

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use mingming_billing::adapters::http::{app_router, BillingAppState};
use mingming_billing::adapters::memory::InMemoryBillingStore;
use mingming_billing::adapters::stripe::MockPaymentProvider;
use mingming_billing::application::billing::PriceCatalog;
use mingming_billing::domain::billing::{signature, stripe_signature_header, StripeWebhookVerifier};
use mingming_billing::domain::foundation::{Email, UserId};
use mingming_billing::ports::{PaymentError, Subscription, SubscriptionRepository};

const STRIPE_SECRET: &str = "whsec_stripe_integration";
const SQUARESPACE_SECRET: &str = "whsec_squarespace_integration";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    store: InMemoryBillingStore,
    provider: MockPaymentProvider,
}

async fn test_app_with_prices(prices: PriceCatalog) -> TestApp {
    let store = InMemoryBillingStore::new();
    store
        .add_user(
            UserId::new("user-1").unwrap(),
            Email::new("seller@example.com").unwrap(),
        )
        .await;
    let provider = MockPaymentProvider::new();

    let state = BillingAppState {
        payment_provider: Arc::new(provider.clone()),
        user_directory: Arc::new(store.clone()),
        subscription_repository: Arc::new(store.clone()),
        prices,
        stripe_verifier: StripeWebhookVerifier::new(STRIPE_SECRET),
        squarespace_secret: SecretString::new(SQUARESPACE_SECRET.to_string()),
    };

    TestApp {
        router: app_router(state),
        store,
        provider,
    }
}

async fn test_app() -> TestApp {
    test_app_with_prices(PriceCatalog::new(
        Some("price_monthly".to_string()),
        Some("price_yearly".to_string()),
    ))
    .await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn checkout_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/subscription/create")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn squarespace_request(body: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook/squarespace")
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("x-squarespace-signature", sig);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn signed_squarespace_request(body: &str) -> Request<Body> {
    squarespace_request(body, Some(signature::sign(body.as_bytes(), SQUARESPACE_SECRET)))
}

fn stripe_request(body: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/stripe/webhook")
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        builder = builder.header("stripe-signature", sig);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn seller_order(email: &str) -> String {
    json!({
        "eventType": "order.create",
        "customerEmail": email,
        "orderStatus": "FULFILLED",
        "lineItems": [{"productName": "Seller Subscription (Monthly)"}]
    })
    .to_string()
}

// =============================================================================
// Health Routes
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app().await;
    let request = Request::get("/health").body(Body::empty()).unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({"ok": true, "service": "Ming Ming Stripe backend ✅"})
    );
}

#[tokio::test]
async fn test_route_returns_text() {
    let app = test_app().await;
    let request = Request::get("/test").body(Body::empty()).unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Test route works!");
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn checkout_returns_client_secret_and_subscription_id() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        checkout_request(json!({"email": "a@b.com", "planType": "monthly"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert!(body["clientSecret"].as_str().unwrap().contains("price_monthly"));
    assert!(body["subscriptionId"].as_str().unwrap().starts_with("sub_mock_"));
}

#[tokio::test]
async fn checkout_without_email_is_400_and_makes_no_provider_call() {
    let app = test_app().await;

    let (status, body) = send(&app.router, checkout_request(json!({"planType": "monthly"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body), json!({"error": "Email is required"}));
    assert!(app.provider.calls().is_empty());
}

#[tokio::test]
async fn checkout_with_unknown_plan_is_400() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        checkout_request(json!({"email": "a@b.com", "planType": "weekly"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body), json!({"error": "Invalid plan type"}));
}

#[tokio::test]
async fn checkout_with_unconfigured_price_is_500() {
    let app = test_app_with_prices(PriceCatalog::new(Some("price_monthly".to_string()), None)).await;

    let (status, body) = send(
        &app.router,
        checkout_request(json!({"email": "a@b.com", "planType": "yearly"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        as_json(&body),
        json!({"error": "Price ID is missing in environment variables"})
    );
}

#[tokio::test]
async fn checkout_provider_failure_is_500_with_details() {
    let app = test_app().await;
    app.provider
        .set_method_error("create_subscription", PaymentError::invalid_request("No such price"));

    let (status, body) = send(
        &app.router,
        checkout_request(json!({"email": "a@b.com", "planType": "monthly"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        as_json(&body),
        json!({"error": "No such price", "details": "invalid_request"})
    );
}

#[tokio::test]
async fn checkout_without_client_secret_is_500() {
    let app = test_app().await;
    app.provider.set_subscription(Subscription {
        id: "sub_fixed".to_string(),
        customer_id: "cus_any".to_string(),
        status: "incomplete".to_string(),
        client_secret: None,
    });

    let (status, body) = send(
        &app.router,
        checkout_request(json!({"email": "a@b.com", "planType": "monthly"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        as_json(&body),
        json!({
            "error": "Subscription is missing a payment confirmation secret",
            "details": "missing_client_secret"
        })
    );
}

#[tokio::test]
async fn checkout_with_malformed_json_is_400() {
    let app = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/subscription/create")
        .header("content-type", "application/json")
        .body(Body::from("{oops"))
        .unwrap();

    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Squarespace Webhook
// =============================================================================

#[tokio::test]
async fn squarespace_seller_order_activates_subscription() {
    let app = test_app().await;

    let (status, body) =
        send(&app.router, signed_squarespace_request(&seller_order("seller@example.com"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({
            "message": "Seller subscription activated",
            "userId": "user-1",
            "email": "seller@example.com"
        })
    );

    let record = app
        .store
        .find_by_user_id(&UserId::new("user-1").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_active());
    assert_eq!(record.plan_id, "seller_account");
}

#[tokio::test]
async fn squarespace_invalid_signature_is_401_without_write() {
    let app = test_app().await;
    let body = seller_order("seller@example.com");
    let bad = signature::sign(body.as_bytes(), "some-other-secret");

    let (status, response) = send(&app.router, squarespace_request(&body, Some(bad))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(as_json(&response), json!({"error": "Invalid signature"}));
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn squarespace_missing_signature_is_401() {
    let app = test_app().await;

    let (status, _) =
        send(&app.router, squarespace_request(&seller_order("seller@example.com"), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn squarespace_irrelevant_order_is_acknowledged() {
    let app = test_app().await;
    let body = json!({
        "eventType": "order.create",
        "customerEmail": "seller@example.com",
        "orderStatus": "CANCELED",
        "lineItems": [{"productName": "Seller Subscription"}]
    })
    .to_string();

    let (status, response) = send(&app.router, signed_squarespace_request(&body)).await;

    assert_eq!(status, StatusCode::OK);
    let response = as_json(&response);
    assert_eq!(response["message"], "Event ignored");
    assert!(response["reason"].as_str().unwrap().contains("CANCELED"));
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn squarespace_order_with_malformed_email_is_acknowledged() {
    let app = test_app().await;

    let (status, response) =
        send(&app.router, signed_squarespace_request(&seller_order("seller-at-example.com"))).await;

    assert_eq!(status, StatusCode::OK);
    let response = as_json(&response);
    assert_eq!(response["message"], "Event ignored");
    assert_eq!(
        response["reason"],
        "customer email 'seller-at-example.com' is not valid"
    );
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn squarespace_unknown_buyer_is_404() {
    let app = test_app().await;

    let (status, body) =
        send(&app.router, signed_squarespace_request(&seller_order("nobody@example.com"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body), json!({"error": "User not found"}));
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn squarespace_store_failure_is_500() {
    let app = test_app().await;
    app.store.fail_writes(true);

    let (status, body) =
        send(&app.router, signed_squarespace_request(&seller_order("seller@example.com"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(as_json(&body), json!({"error": "Failed to activate subscription"}));
}

#[tokio::test]
async fn squarespace_malformed_body_is_400() {
    let app = test_app().await;

    let (status, _) = send(&app.router, signed_squarespace_request("not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn squarespace_redelivery_keeps_single_record() {
    let app = test_app().await;
    let body = seller_order("seller@example.com");

    let (first, _) = send(&app.router, signed_squarespace_request(&body)).await;
    let (second, _) = send(&app.router, signed_squarespace_request(&body)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(app.store.subscription_count().await, 1);
    assert_eq!(app.store.write_count(), 2);
}

// =============================================================================
// Stripe Webhook
// =============================================================================

fn stripe_event(event_type: &str) -> String {
    json!({
        "id": "evt_integration",
        "object": "event",
        "type": event_type,
        "created": 1704067200,
        "livemode": false,
        "data": {"object": {"id": "sub_1", "object": "subscription"}}
    })
    .to_string()
}

#[tokio::test]
async fn stripe_unparseable_signature_is_400_text() {
    let app = test_app().await;

    let (status, body) = send(
        &app.router,
        stripe_request(&stripe_event("invoice.paid"), Some("garbage".to_string())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().starts_with("Webhook Error: "));
}

#[tokio::test]
async fn stripe_missing_signature_is_400() {
    let app = test_app().await;

    let (status, _) = send(&app.router, stripe_request(&stripe_event("invoice.paid"), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stripe_signed_event_is_received() {
    let app = test_app().await;
    let body = stripe_event("customer.subscription.updated");
    let now = chrono::Utc::now().timestamp();
    let header = stripe_signature_header(STRIPE_SECRET, now, body.as_bytes());

    let (status, response) = send(&app.router, stripe_request(&body, Some(header))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&response), json!({"received": true}));
    // Stripe events are logged only.
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn stripe_unrecognized_event_is_still_received() {
    let app = test_app().await;
    let body = stripe_event("charge.refunded");
    let now = chrono::Utc::now().timestamp();
    let header = stripe_signature_header(STRIPE_SECRET, now, body.as_bytes());

    let (status, _) = send(&app.router, stripe_request(&body, Some(header))).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn stripe_stale_timestamp_is_400() {
    let app = test_app().await;
    let body = stripe_event("invoice.paid");
    let stale = chrono::Utc::now().timestamp() - 3600;
    let header = stripe_signature_header(STRIPE_SECRET, stale, body.as_bytes());

    let (status, response) = send(&app.router, stripe_request(&body, Some(header))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        String::from_utf8(response).unwrap(),
        "Webhook Error: Timestamp outside the tolerance zone"
    );
}

#[tokio::test]
async fn stripe_extreme_timestamps_are_400_not_a_crash() {
    let app = test_app().await;
    let body = stripe_event("invoice.paid");

    for extreme in [i64::MIN, i64::MAX] {
        let header = format!("t={},v1={}", extreme, "a".repeat(64));
        let (status, response) = send(&app.router, stripe_request(&body, Some(header))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            String::from_utf8(response).unwrap(),
            "Webhook Error: Timestamp outside the tolerance zone"
        );
    }
}
