//! Supply item (insumo) and stock movement models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MovementType;

/// A stocked ingredient or consumable, distinct from a sellable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyItem {
    pub id: Uuid,
    pub nombre: String,
    pub unidad_medida: String,
    pub stock: Decimal,
    pub minimo_stock: Decimal,
    pub costo_unitario: Decimal,
    pub alerta: bool,
    pub ultima_compra: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable audit record of one stock change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub id_insumo: Uuid,
    pub tipo: MovementType,
    pub cantidad: Decimal,
    pub motivo: String,
    pub fecha: DateTime<Utc>,
}

/// Result of one stock ledger operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub id_insumo: Uuid,
    pub stock: Decimal,
    pub alerta: bool,
}

/// Whether the low-stock alert is active for the given levels
///
/// Recomputed after every ledger mutation; the boundary counts as low.
pub fn stock_alert(stock: Decimal, minimo_stock: Decimal) -> bool {
    stock <= minimo_stock
}
