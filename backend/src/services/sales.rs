//! Sale transaction service
//!
//! Creating a sale is the highest-level atomic operation in the system: the
//! header, its line items and every ingredient deduction share one
//! transaction, so a failure at any line leaves no trace. Voiding walks the
//! `completada -> anulada` state machine and, when enabled, restores the
//! consumed ingredients.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::config::SalesConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    line_subtotal, sale_total, validate_metodo_pago, validate_sale_lines, PaymentMethod, Sale,
    SaleLine, SaleStatus,
};
use crate::services::ConsumptionEngine;

/// Sale service for the POS sale workflows
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
    config: SalesConfig,
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    pub id_cliente: Option<Uuid>,
    pub id_empleado: Uuid,
    pub metodo_pago: String,
    pub detalles: Vec<SaleLineInput>,
}

/// One requested line item; the unit price is the caller's snapshot
#[derive(Debug, Deserialize)]
pub struct SaleLineInput {
    pub id_producto: Uuid,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
}

/// Query filters for listing sales
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilters {
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub id_empleado: Option<Uuid>,
    pub metodo_pago: Option<String>,
}

/// A sale enriched with employee and client display names
#[derive(Debug, Clone, Serialize)]
pub struct SaleView {
    #[serde(flatten)]
    pub venta: Sale,
    pub nombre_empleado: String,
    pub nombre_cliente: Option<String>,
}

/// One sale line enriched with its product name
#[derive(Debug, Clone, Serialize)]
pub struct SaleLineView {
    #[serde(flatten)]
    pub detalle: SaleLine,
    pub nombre_producto: String,
}

/// Full sale with its line items
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithDetails {
    pub venta: SaleView,
    pub detalles: Vec<SaleLineView>,
}

/// Compact listing entry with joined names and item count
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleSummary {
    pub id: Uuid,
    pub fecha: DateTime<Utc>,
    pub total: Decimal,
    pub metodo_pago: String,
    pub estado: String,
    pub nombre_empleado: String,
    pub nombre_cliente: Option<String>,
    pub num_items: i64,
}

/// Row for sale header queries
#[derive(Debug, FromRow)]
struct VentaRow {
    id: Uuid,
    id_cliente: Option<Uuid>,
    id_empleado: Uuid,
    total: Decimal,
    metodo_pago: String,
    estado: String,
    motivo_anulacion: Option<String>,
    fecha: DateTime<Utc>,
}

impl TryFrom<VentaRow> for Sale {
    type Error = AppError;

    fn try_from(r: VentaRow) -> Result<Self, Self::Error> {
        let metodo_pago = PaymentMethod::from_str(&r.metodo_pago).ok_or_else(|| {
            AppError::Internal(format!("unknown metodo_pago '{}' in database", r.metodo_pago))
        })?;
        let estado = SaleStatus::from_str(&r.estado).ok_or_else(|| {
            AppError::Internal(format!("unknown estado '{}' in database", r.estado))
        })?;
        Ok(Sale {
            id: r.id,
            id_cliente: r.id_cliente,
            id_empleado: r.id_empleado,
            total: r.total,
            metodo_pago,
            estado,
            motivo_anulacion: r.motivo_anulacion,
            fecha: r.fecha,
        })
    }
}

/// Row for sale line queries
#[derive(Debug, FromRow)]
struct DetalleRow {
    id: i64,
    id_venta: Uuid,
    id_producto: Uuid,
    cantidad: Decimal,
    precio_unitario: Decimal,
    subtotal: Decimal,
}

impl From<DetalleRow> for SaleLine {
    fn from(r: DetalleRow) -> Self {
        SaleLine {
            id: r.id,
            id_venta: r.id_venta,
            id_producto: r.id_producto,
            cantidad: r.cantidad,
            precio_unitario: r.precio_unitario,
            subtotal: r.subtotal,
        }
    }
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool, config: SalesConfig) -> Self {
        Self { db, config }
    }

    /// Create a sale with its line items and ingredient deductions.
    ///
    /// Input is validated before any datastore work. Everything after
    /// `begin` shares one transaction: the header insert, every line insert
    /// and every stock deduction either all commit or all roll back.
    pub async fn create_sale(&self, input: CreateSaleInput) -> AppResult<SaleWithDetails> {
        validate_metodo_pago(&input.metodo_pago).map_err(|msg| AppError::Validation {
            field: "metodo_pago".to_string(),
            message: msg.to_string(),
            message_es: "El método de pago debe ser efectivo, tarjeta o transferencia".to_string(),
        })?;

        let lines: Vec<(Decimal, Decimal)> = input
            .detalles
            .iter()
            .map(|d| (d.cantidad, d.precio_unitario))
            .collect();
        validate_sale_lines(&lines).map_err(|msg| AppError::Validation {
            field: "detalles".to_string(),
            message: msg.to_string(),
            message_es: "Los detalles de la venta no son válidos".to_string(),
        })?;

        let total = sale_total(&lines);

        let mut tx = self.db.begin().await?;

        let nombre_empleado: String =
            sqlx::query_scalar("SELECT nombre FROM empleados WHERE id = $1")
                .bind(input.id_empleado)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Empleado".to_string()))?;

        let nombre_cliente: Option<String> = match input.id_cliente {
            Some(id_cliente) => Some(
                sqlx::query_scalar("SELECT nombre FROM clientes WHERE id = $1")
                    .bind(id_cliente)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?,
            ),
            None => None,
        };

        let venta_row = sqlx::query_as::<_, VentaRow>(
            r#"
            INSERT INTO ventas (id_cliente, id_empleado, total, metodo_pago, estado)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, id_cliente, id_empleado, total, metodo_pago, estado,
                      motivo_anulacion, fecha
            "#,
        )
        .bind(input.id_cliente)
        .bind(input.id_empleado)
        .bind(total)
        .bind(&input.metodo_pago)
        .bind(SaleStatus::Completada.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let motivo = format!("Venta {}", venta_row.id);
        let mut detalles = Vec::with_capacity(input.detalles.len());

        // Lines in input order; each insert is followed by its consumption,
        // so the first shortage aborts before later lines touch anything.
        for detalle in &input.detalles {
            let nombre_producto: String =
                sqlx::query_scalar("SELECT nombre FROM productos WHERE id = $1 AND activo = true")
                    .bind(detalle.id_producto)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Producto {}", detalle.id_producto))
                    })?;

            let subtotal = line_subtotal(detalle.cantidad, detalle.precio_unitario);

            let detalle_row = sqlx::query_as::<_, DetalleRow>(
                r#"
                INSERT INTO detalles_ventas (id_venta, id_producto, cantidad, precio_unitario, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, id_venta, id_producto, cantidad, precio_unitario, subtotal
                "#,
            )
            .bind(venta_row.id)
            .bind(detalle.id_producto)
            .bind(detalle.cantidad)
            .bind(detalle.precio_unitario)
            .bind(subtotal)
            .fetch_one(&mut *tx)
            .await?;

            ConsumptionEngine::consume(&mut *tx, detalle.id_producto, detalle.cantidad, &motivo)
                .await?;

            detalles.push(SaleLineView {
                detalle: detalle_row.into(),
                nombre_producto,
            });
        }

        tx.commit().await?;

        Ok(SaleWithDetails {
            venta: SaleView {
                venta: venta_row.try_into()?,
                nombre_empleado,
                nombre_cliente,
            },
            detalles,
        })
    }

    /// Get a full sale with its line items
    pub async fn get_sale(&self, id_venta: Uuid) -> AppResult<SaleWithDetails> {
        let header = sqlx::query_as::<_, SaleHeaderRow>(
            r#"
            SELECT v.id, v.id_cliente, v.id_empleado, v.total, v.metodo_pago, v.estado,
                   v.motivo_anulacion, v.fecha, e.nombre AS nombre_empleado,
                   c.nombre AS nombre_cliente
            FROM ventas v
            JOIN empleados e ON e.id = v.id_empleado
            LEFT JOIN clientes c ON c.id = v.id_cliente
            WHERE v.id = $1
            "#,
        )
        .bind(id_venta)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Venta".to_string()))?;

        let detalle_rows = sqlx::query_as::<_, DetalleViewRow>(
            r#"
            SELECT d.id, d.id_venta, d.id_producto, d.cantidad, d.precio_unitario,
                   d.subtotal, p.nombre AS nombre_producto
            FROM detalles_ventas d
            JOIN productos p ON p.id = d.id_producto
            WHERE d.id_venta = $1
            ORDER BY d.id
            "#,
        )
        .bind(id_venta)
        .fetch_all(&self.db)
        .await?;

        let nombre_empleado = header.nombre_empleado.clone();
        let nombre_cliente = header.nombre_cliente.clone();

        Ok(SaleWithDetails {
            venta: SaleView {
                venta: header.into_venta_row().try_into()?,
                nombre_empleado,
                nombre_cliente,
            },
            detalles: detalle_rows
                .into_iter()
                .map(|r| SaleLineView {
                    nombre_producto: r.nombre_producto.clone(),
                    detalle: r.into_detalle_row().into(),
                })
                .collect(),
        })
    }

    /// List sale summaries, newest first, with optional filters
    pub async fn list_sales(&self, filters: SaleFilters) -> AppResult<Vec<SaleSummary>> {
        if let Some(metodo) = &filters.metodo_pago {
            validate_metodo_pago(metodo).map_err(|msg| AppError::Validation {
                field: "metodo_pago".to_string(),
                message: msg.to_string(),
                message_es: "El método de pago debe ser efectivo, tarjeta o transferencia"
                    .to_string(),
            })?;
        }

        let summaries = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT v.id, v.fecha, v.total, v.metodo_pago, v.estado,
                   e.nombre AS nombre_empleado, c.nombre AS nombre_cliente,
                   COUNT(d.id) AS num_items
            FROM ventas v
            JOIN empleados e ON e.id = v.id_empleado
            LEFT JOIN clientes c ON c.id = v.id_cliente
            LEFT JOIN detalles_ventas d ON d.id_venta = v.id
            WHERE ($1::date IS NULL OR v.fecha::date >= $1)
              AND ($2::date IS NULL OR v.fecha::date <= $2)
              AND ($3::uuid IS NULL OR v.id_empleado = $3)
              AND ($4::text IS NULL OR v.metodo_pago = $4)
            GROUP BY v.id, e.nombre, c.nombre
            ORDER BY v.fecha DESC
            "#,
        )
        .bind(filters.fecha_inicio)
        .bind(filters.fecha_fin)
        .bind(filters.id_empleado)
        .bind(filters.metodo_pago)
        .fetch_all(&self.db)
        .await?;

        Ok(summaries)
    }

    /// Void a sale: `completada -> anulada`, the only permitted transition.
    ///
    /// The status row is locked so two concurrent voids cannot both pass the
    /// state check. When restock-on-void is enabled, the ingredients each
    /// line consumed are restored inside the same transaction.
    pub async fn void_sale(&self, id_venta: Uuid, motivo: Option<String>) -> AppResult<Sale> {
        let mut tx = self.db.begin().await?;

        let estado: String = sqlx::query_scalar("SELECT estado FROM ventas WHERE id = $1 FOR UPDATE")
            .bind(id_venta)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Venta".to_string()))?;

        let estado = SaleStatus::from_str(&estado).ok_or_else(|| {
            AppError::Internal(format!("unknown estado '{}' in database", estado))
        })?;
        if !estado.can_void() {
            return Err(AppError::AlreadyVoided(id_venta));
        }

        if self.config.restock_on_void {
            let detalles = sqlx::query_as::<_, (Uuid, Decimal)>(
                "SELECT id_producto, cantidad FROM detalles_ventas WHERE id_venta = $1 ORDER BY id",
            )
            .bind(id_venta)
            .fetch_all(&mut *tx)
            .await?;

            let motivo_restock = format!("Anulación venta {}", id_venta);
            for (id_producto, cantidad) in detalles {
                ConsumptionEngine::restock(&mut *tx, id_producto, cantidad, &motivo_restock)
                    .await?;
            }
        }

        let venta_row = sqlx::query_as::<_, VentaRow>(
            r#"
            UPDATE ventas
            SET estado = $1, motivo_anulacion = $2
            WHERE id = $3
            RETURNING id, id_cliente, id_empleado, total, metodo_pago, estado,
                      motivo_anulacion, fecha
            "#,
        )
        .bind(SaleStatus::Anulada.as_str())
        .bind(motivo)
        .bind(id_venta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        venta_row.try_into()
    }

    /// Hard-delete a sale and its lines without reverting stock.
    ///
    /// Disabled by default: deletion desynchronizes stock from sale history,
    /// so `void_sale` is the normal path.
    pub async fn delete_sale(&self, id_venta: Uuid) -> AppResult<()> {
        if !self.config.allow_hard_delete {
            return Err(AppError::OperationDisabled(
                "Hard-deleting sales is disabled; void the sale instead".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM ventas WHERE id = $1")
            .bind(id_venta)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venta".to_string()));
        }

        Ok(())
    }
}

/// Row for the joined sale header query
#[derive(Debug, FromRow)]
struct SaleHeaderRow {
    id: Uuid,
    id_cliente: Option<Uuid>,
    id_empleado: Uuid,
    total: Decimal,
    metodo_pago: String,
    estado: String,
    motivo_anulacion: Option<String>,
    fecha: DateTime<Utc>,
    nombre_empleado: String,
    nombre_cliente: Option<String>,
}

impl SaleHeaderRow {
    fn into_venta_row(self) -> VentaRow {
        VentaRow {
            id: self.id,
            id_cliente: self.id_cliente,
            id_empleado: self.id_empleado,
            total: self.total,
            metodo_pago: self.metodo_pago,
            estado: self.estado,
            motivo_anulacion: self.motivo_anulacion,
            fecha: self.fecha,
        }
    }
}

/// Row for the joined sale line query
#[derive(Debug, FromRow)]
struct DetalleViewRow {
    id: i64,
    id_venta: Uuid,
    id_producto: Uuid,
    cantidad: Decimal,
    precio_unitario: Decimal,
    subtotal: Decimal,
    nombre_producto: String,
}

impl DetalleViewRow {
    fn into_detalle_row(self) -> DetalleRow {
        DetalleRow {
            id: self.id,
            id_venta: self.id_venta,
            id_producto: self.id_producto,
            cantidad: self.cantidad,
            precio_unitario: self.precio_unitario,
            subtotal: self.subtotal,
        }
    }
}
