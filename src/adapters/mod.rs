//! Adapters - Implementations of ports for external systems.
//!
//! - `http` - Axum routes, handlers and DTOs
//! - `stripe` - Stripe REST `PaymentProvider` plus a mock
//! - `supabase` - PostgREST `UserDirectory` and `SubscriptionRepository`
//! - `memory` - In-memory store for tests and local runs

pub mod http;
pub mod memory;
pub mod stripe;
pub mod supabase;
