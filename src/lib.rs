//! Ming Ming billing service
//!
//! Accepts Stripe and Squarespace webhooks plus checkout requests, and
//! mirrors seller subscription state into Supabase.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
