//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - Customer and subscription creation (Stripe)
//! - `UserDirectory` - Email to user lookup
//! - `SubscriptionRepository` - Seller subscription persistence

mod payment_provider;
mod store_error;
mod subscription_repository;
mod user_directory;

pub use payment_provider::{
    CreateSubscriptionRequest, Customer, PaymentError, PaymentErrorCode, PaymentProvider,
    Subscription,
};
pub use store_error::StoreError;
pub use subscription_repository::SubscriptionRepository;
pub use user_directory::{User, UserDirectory};
