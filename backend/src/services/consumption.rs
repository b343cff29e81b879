//! Ingredient consumption engine
//!
//! Translates "N units of product P sold" into stock ledger deductions as
//! one all-or-nothing unit. The engine only ever runs inside a caller's
//! transaction; it never commits or rolls back on its own, so a failure at
//! any recipe line aborts the whole enclosing sale.

use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{plan_consumption, StockUpdate};
use crate::services::{InventoryService, RecipeService};

/// Consumption engine over the stock ledger and recipe resolver
pub struct ConsumptionEngine;

impl ConsumptionEngine {
    /// Consume the ingredients for `cantidad_vendida` units of a product.
    ///
    /// Two phases, both inside the caller's transaction: a read-only
    /// sufficiency pass that fails fast with a clear error before anything
    /// mutates, then the deduction pass. The pre-check is advisory; the row
    /// lock taken inside `remove_stock_with` is the authoritative guard.
    pub async fn consume(
        conn: &mut PgConnection,
        id_producto: Uuid,
        cantidad_vendida: Decimal,
        motivo_prefix: &str,
    ) -> AppResult<Vec<StockUpdate>> {
        let recipe = RecipeService::for_product(&mut *conn, id_producto).await?;
        if recipe.is_empty() {
            return Ok(Vec::new());
        }

        let plan = plan_consumption(&recipe, cantidad_vendida);

        // Validation pass
        for deduction in &plan {
            let stock: Decimal = sqlx::query_scalar("SELECT stock FROM insumos WHERE id = $1")
                .bind(deduction.id_insumo)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Insumo {}", deduction.nombre_insumo))
                })?;

            if stock < deduction.requerido {
                return Err(AppError::InsufficientStock {
                    insumo: deduction.nombre_insumo.clone(),
                    requerido: deduction.requerido,
                    disponible: stock,
                });
            }
        }

        // Deduction pass
        let motivo = format!("{} - producto {}", motivo_prefix, id_producto);
        let mut updates = Vec::with_capacity(plan.len());
        for deduction in &plan {
            let update = InventoryService::remove_stock_with(
                &mut *conn,
                deduction.id_insumo,
                deduction.requerido,
                &motivo,
            )
            .await?;
            updates.push(update);
        }

        Ok(updates)
    }

    /// Restore the ingredients consumed by `cantidad_vendida` units of a
    /// product, the symmetric reversal used when a sale is voided.
    pub async fn restock(
        conn: &mut PgConnection,
        id_producto: Uuid,
        cantidad_vendida: Decimal,
        motivo_prefix: &str,
    ) -> AppResult<Vec<StockUpdate>> {
        let recipe = RecipeService::for_product(&mut *conn, id_producto).await?;
        if recipe.is_empty() {
            return Ok(Vec::new());
        }

        let plan = plan_consumption(&recipe, cantidad_vendida);
        let motivo = format!("{} - producto {}", motivo_prefix, id_producto);

        let mut updates = Vec::with_capacity(plan.len());
        for deduction in &plan {
            let update = InventoryService::add_stock_with(
                &mut *conn,
                deduction.id_insumo,
                deduction.requerido,
                &motivo,
            )
            .await?;
            updates.push(update);
        }

        Ok(updates)
    }
}
