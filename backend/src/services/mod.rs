//! Business logic services for the Granizados POS backend

pub mod consumption;
pub mod inventory;
pub mod products;
pub mod recipes;
pub mod sales;

pub use consumption::ConsumptionEngine;
pub use inventory::InventoryService;
pub use products::ProductService;
pub use recipes::RecipeService;
pub use sales::SaleService;
