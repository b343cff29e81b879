//! HTTP handlers for the Granizados POS backend

mod health;
mod inventory;
mod products;
mod sales;

pub use health::*;
pub use inventory::*;
pub use products::*;
pub use sales::*;
