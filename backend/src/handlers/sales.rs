//! HTTP handlers for sale endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Sale;
use crate::services::sales::{CreateSaleInput, SaleFilters, SaleSummary, SaleWithDetails};
use crate::services::SaleService;
use crate::AppState;

/// Response for a created sale
#[derive(Debug, Serialize)]
pub struct CreateSaleResponse {
    pub message: String,
    pub venta: SaleWithDetails,
}

/// Body for voiding a sale
#[derive(Debug, Default, Deserialize)]
pub struct VoidSaleInput {
    pub motivo_anulacion: Option<String>,
}

/// Create a sale with its line items and ingredient deductions
pub async fn create_venta(
    State(state): State<AppState>,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<(StatusCode, Json<CreateSaleResponse>)> {
    let service = SaleService::new(state.db, state.config.sales.clone());
    let venta = service.create_sale(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSaleResponse {
            message: "Venta registrada correctamente".to_string(),
            venta,
        }),
    ))
}

/// List sale summaries with optional date/employee/payment filters
pub async fn list_ventas(
    State(state): State<AppState>,
    Query(filters): Query<SaleFilters>,
) -> AppResult<Json<Vec<SaleSummary>>> {
    let service = SaleService::new(state.db, state.config.sales.clone());
    let ventas = service.list_sales(filters).await?;
    Ok(Json(ventas))
}

/// Get a full sale with its line items
pub async fn get_venta(
    State(state): State<AppState>,
    Path(id_venta): Path<Uuid>,
) -> AppResult<Json<SaleWithDetails>> {
    let service = SaleService::new(state.db, state.config.sales.clone());
    let venta = service.get_sale(id_venta).await?;
    Ok(Json(venta))
}

/// Void a sale
pub async fn anular_venta(
    State(state): State<AppState>,
    Path(id_venta): Path<Uuid>,
    Json(input): Json<VoidSaleInput>,
) -> AppResult<Json<Sale>> {
    let service = SaleService::new(state.db, state.config.sales.clone());
    let venta = service.void_sale(id_venta, input.motivo_anulacion).await?;
    Ok(Json(venta))
}

/// Hard-delete a sale (guarded by configuration)
pub async fn delete_venta(
    State(state): State<AppState>,
    Path(id_venta): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = SaleService::new(state.db, state.config.sales.clone());
    service.delete_sale(id_venta).await?;
    Ok(Json(()))
}
