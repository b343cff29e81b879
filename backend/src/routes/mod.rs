//! Route definitions for the Granizados POS backend

use axum::{
    routing::{get, patch},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Sales
        .nest("/ventas", sale_routes())
        // Supplies and stock movements
        .nest("/insumos", supply_routes())
        .nest("/movimientos", movement_routes())
        // Product catalog read surface
        .nest("/productos", product_routes())
}

/// Sale routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_ventas).post(handlers::create_venta))
        .route(
            "/:id_venta",
            get(handlers::get_venta).delete(handlers::delete_venta),
        )
        .route("/:id_venta/anular", patch(handlers::anular_venta))
}

/// Supply routes
fn supply_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_insumos))
        .route("/alertas", get(handlers::list_alertas))
        .route("/:id_insumo", get(handlers::get_insumo))
}

/// Stock movement routes
fn movement_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_movimientos).post(handlers::record_movimiento),
    )
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_productos))
        .route("/:id_producto/receta", get(handlers::get_receta))
}
