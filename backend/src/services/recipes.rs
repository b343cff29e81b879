//! Recipe resolution: read-only lookup of a product's ingredient needs
//!
//! Resolution runs against whatever executor the caller holds, so the sale
//! transaction can resolve inside its own transaction while the catalog
//! endpoints read straight from the pool.

use rust_decimal::Decimal;
use sqlx::{Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::RecipeLine;

/// Recipe resolver for product ingredient requirements
pub struct RecipeService;

/// Row for recipe queries
#[derive(Debug, FromRow)]
struct RecipeRow {
    id_producto: Uuid,
    id_insumo: Uuid,
    nombre_insumo: String,
    cantidad_usada: Decimal,
}

impl RecipeService {
    /// Get the ordered recipe for a product. An empty recipe is valid: the
    /// product consumes nothing when sold.
    pub async fn for_product<'e, E>(executor: E, id_producto: Uuid) -> AppResult<Vec<RecipeLine>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT r.id_producto, r.id_insumo, i.nombre AS nombre_insumo, r.cantidad_usada
            FROM recetas r
            JOIN insumos i ON i.id = r.id_insumo
            WHERE r.id_producto = $1
            ORDER BY i.nombre
            "#,
        )
        .bind(id_producto)
        .fetch_all(executor)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecipeLine {
                id_producto: r.id_producto,
                id_insumo: r.id_insumo,
                nombre_insumo: r.nombre_insumo,
                cantidad_usada: r.cantidad_usada,
            })
            .collect())
    }
}
