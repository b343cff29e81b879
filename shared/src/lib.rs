//! Shared types and models for the Granizados POS platform
//!
//! This crate contains the domain types shared between the backend and the
//! test suites, plus the pure business computations (totals, stock alerts,
//! consumption planning) that must hold regardless of the datastore.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
