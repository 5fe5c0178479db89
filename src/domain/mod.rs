//! Domain layer - Business logic free of I/O.

pub mod billing;
pub mod foundation;
