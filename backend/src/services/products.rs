//! Product catalog read surface
//!
//! The POS frontend builds its cart from this; catalog management itself
//! lives outside this backend.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Product, RecipeLine};
use crate::services::RecipeService;

/// Product service for catalog and recipe lookups
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    nombre: String,
    precio: Decimal,
    activo: bool,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            nombre: r.nombre,
            precio: r.precio,
            activo: r.activo,
        }
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List active products
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, nombre, precio, activo FROM productos WHERE activo = true ORDER BY nombre",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get the recipe of a product, 404 when the product is unknown.
    /// An existing product with no recipe resolves to an empty list.
    pub async fn get_recipe(&self, id_producto: Uuid) -> AppResult<Vec<RecipeLine>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM productos WHERE id = $1)")
                .bind(id_producto)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Producto".to_string()));
        }

        RecipeService::for_product(&self.db, id_producto).await
    }
}
