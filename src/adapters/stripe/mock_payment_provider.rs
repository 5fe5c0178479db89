//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::Email;
use crate::ports::{
    CreateSubscriptionRequest, Customer, PaymentError, PaymentProvider, Subscription,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Inject errors
/// mock.set_method_error("create_subscription", PaymentError::card_declined("Test decline"));
///
/// // Use in tests
/// let result = mock.create_customer(&email).await;
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Customers created so far, by ID.
    customers: HashMap<String, Customer>,

    /// Next subscription to return.
    next_subscription: Option<Subscription>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the subscription to return on next `create_subscription` call.
    pub fn set_subscription(&self, subscription: Subscription) {
        self.inner.lock().unwrap().next_subscription = Some(subscription);
    }

    /// Set an error to return on the next call (any method).
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method (persists until cleared).
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertion Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Count calls to a specific method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_customer(&self, email: &Email) -> Result<Customer, PaymentError> {
        self.record_call("create_customer", vec![email.to_string()]);
        self.check_error("create_customer")?;

        let customer = Customer {
            id: format!("cus_mock_{}", short_id()),
            email: Some(email.to_string()),
        };

        self.inner
            .lock()
            .unwrap()
            .customers
            .insert(customer.id.clone(), customer.clone());

        Ok(customer)
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        self.record_call(
            "create_subscription",
            vec![request.customer_id.clone(), request.price_id.clone()],
        );
        self.check_error("create_subscription")?;

        let mut state = self.inner.lock().unwrap();

        if let Some(subscription) = state.next_subscription.take() {
            return Ok(subscription);
        }

        if !state.customers.contains_key(&request.customer_id) {
            return Err(PaymentError::invalid_request(format!(
                "No such customer: '{}'",
                request.customer_id
            )));
        }

        let id = short_id();
        Ok(Subscription {
            id: format!("sub_mock_{}", id),
            customer_id: request.customer_id,
            status: "incomplete".to_string(),
            client_secret: Some(format!("pi_mock_{}_secret_{}", id, request.price_id)),
        })
    }
}
