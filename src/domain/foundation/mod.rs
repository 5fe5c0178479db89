//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the billing domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{Email, UserId};
pub use timestamp::Timestamp;
