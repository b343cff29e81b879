//! Recipe (receta) models and consumption planning

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a product's recipe: how much of a supply item one sold unit
/// consumes. The supply name is carried along for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLine {
    pub id_producto: Uuid,
    pub id_insumo: Uuid,
    pub nombre_insumo: String,
    pub cantidad_usada: Decimal,
}

/// A planned deduction against one supply item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDeduction {
    pub id_insumo: Uuid,
    pub nombre_insumo: String,
    pub requerido: Decimal,
}

/// Quantity of a supply required to sell `cantidad_vendida` units
pub fn required_quantity(cantidad_usada: Decimal, cantidad_vendida: Decimal) -> Decimal {
    cantidad_usada * cantidad_vendida
}

/// Expand a recipe into concrete per-supply deductions, in recipe order.
///
/// An empty recipe plans nothing: selling a product with no recipe is valid
/// and has no stock effect.
pub fn plan_consumption(recipe: &[RecipeLine], cantidad_vendida: Decimal) -> Vec<PlannedDeduction> {
    recipe
        .iter()
        .map(|line| PlannedDeduction {
            id_insumo: line.id_insumo,
            nombre_insumo: line.nombre_insumo.clone(),
            requerido: required_quantity(line.cantidad_usada, cantidad_vendida),
        })
        .collect()
}
