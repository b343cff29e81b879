//! Sale (venta) models and total computations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{PaymentMethod, SaleStatus};

/// A completed or voided customer transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub id_cliente: Option<Uuid>,
    pub id_empleado: Uuid,
    pub total: Decimal,
    pub metodo_pago: PaymentMethod,
    pub estado: SaleStatus,
    pub motivo_anulacion: Option<String>,
    pub fecha: DateTime<Utc>,
}

/// One product-quantity-price entry within a sale
///
/// The unit price is snapshotted at sale time, never a live catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub id: i64,
    pub id_venta: Uuid,
    pub id_producto: Uuid,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
    pub subtotal: Decimal,
}

/// Subtotal of one sale line
pub fn line_subtotal(cantidad: Decimal, precio_unitario: Decimal) -> Decimal {
    cantidad * precio_unitario
}

/// Total of a sale as the exact sum of its line subtotals
pub fn sale_total(lines: &[(Decimal, Decimal)]) -> Decimal {
    lines
        .iter()
        .map(|(cantidad, precio)| line_subtotal(*cantidad, *precio))
        .sum()
}
