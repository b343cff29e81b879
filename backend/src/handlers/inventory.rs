//! HTTP handlers for supply and stock movement endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{StockMovement, StockUpdate, SupplyItem};
use crate::services::inventory::RecordMovementInput;
use crate::services::InventoryService;
use crate::AppState;

/// Query parameters for the movement listing
#[derive(Debug, Default, Deserialize)]
pub struct MovementsQuery {
    pub id_insumo: Option<Uuid>,
}

/// List all supply items
pub async fn list_insumos(State(state): State<AppState>) -> AppResult<Json<Vec<SupplyItem>>> {
    let service = InventoryService::new(state.db);
    let insumos = service.list_supplies().await?;
    Ok(Json(insumos))
}

/// Get a supply item by ID
pub async fn get_insumo(
    State(state): State<AppState>,
    Path(id_insumo): Path<Uuid>,
) -> AppResult<Json<SupplyItem>> {
    let service = InventoryService::new(state.db);
    let insumo = service.get_supply(id_insumo).await?;
    Ok(Json(insumo))
}

/// List supply items with an active low-stock alert
pub async fn list_alertas(State(state): State<AppState>) -> AppResult<Json<Vec<SupplyItem>>> {
    let service = InventoryService::new(state.db);
    let insumos = service.list_low_stock().await?;
    Ok(Json(insumos))
}

/// Record a manual stock movement
pub async fn record_movimiento(
    State(state): State<AppState>,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<StockUpdate>> {
    let service = InventoryService::new(state.db);
    let update = service.record_movement(input).await?;
    Ok(Json(update))
}

/// List stock movements, optionally for one supply item
pub async fn list_movimientos(
    State(state): State<AppState>,
    Query(query): Query<MovementsQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = InventoryService::new(state.db);
    let movimientos = service.list_movements(query.id_insumo).await?;
    Ok(Json(movimientos))
}
