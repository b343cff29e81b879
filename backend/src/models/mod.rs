//! Database models for the Granizados POS backend
//!
//! Re-exports models and helpers from the shared crate

pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;
