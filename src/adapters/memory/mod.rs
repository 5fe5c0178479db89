//! In-memory adapters for tests and local runs.

mod in_memory_store;

pub use in_memory_store::InMemoryBillingStore;
