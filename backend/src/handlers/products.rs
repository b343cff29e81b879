//! HTTP handlers for the product catalog read surface

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Product, RecipeLine};
use crate::services::ProductService;
use crate::AppState;

/// List active products
pub async fn list_productos(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let productos = service.list_products().await?;
    Ok(Json(productos))
}

/// Get the recipe for a product
pub async fn get_receta(
    State(state): State<AppState>,
    Path(id_producto): Path<Uuid>,
) -> AppResult<Json<Vec<RecipeLine>>> {
    let service = ProductService::new(state.db);
    let receta = service.get_recipe(id_producto).await?;
    Ok(Json(receta))
}
