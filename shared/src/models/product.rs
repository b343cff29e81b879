//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product. The catalog itself is managed elsewhere; the POS
/// backend only reads it for sale lines and recipe resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub nombre: String,
    pub precio: Decimal,
    pub activo: bool,
}
