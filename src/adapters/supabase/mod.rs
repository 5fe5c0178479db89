//! Supabase (PostgREST) adapters for user lookup and subscription storage.
//!
//! Both adapters share one `SupabaseClient` authenticated with the service
//! role key.

mod client;
mod subscription_repository;
mod user_directory;

pub use client::{
    SupabaseClient, SupabaseConfig, DEFAULT_SUBSCRIPTIONS_TABLE, DEFAULT_USERS_TABLE,
};
pub use subscription_repository::SupabaseSubscriptionRepository;
pub use user_directory::SupabaseUserDirectory;
