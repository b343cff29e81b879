//! Stock ledger service: the only code path that mutates supply stock
//!
//! Every mutation pairs an `insumos` update with one immutable
//! `movimientos_inventario` record and a recomputed low-stock alert flag.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    stock_alert, validate_cantidad, validate_motivo, validate_tipo_movimiento, MovementType,
    StockMovement, StockUpdate, SupplyItem,
};

/// Inventory service for supply stock and movement history
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for recording a manual stock movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub id_insumo: Uuid,
    pub cantidad: Decimal,
    pub tipo_movimiento: String,
    pub motivo: String,
}

/// Row for supply queries
#[derive(Debug, FromRow)]
struct SupplyRow {
    id: Uuid,
    nombre: String,
    unidad_medida: String,
    stock: Decimal,
    minimo_stock: Decimal,
    costo_unitario: Decimal,
    alerta: bool,
    ultima_compra: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplyRow> for SupplyItem {
    fn from(r: SupplyRow) -> Self {
        SupplyItem {
            id: r.id,
            nombre: r.nombre,
            unidad_medida: r.unidad_medida,
            stock: r.stock,
            minimo_stock: r.minimo_stock,
            costo_unitario: r.costo_unitario,
            alerta: r.alerta,
            ultima_compra: r.ultima_compra,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Row for movement queries
#[derive(Debug, FromRow)]
struct MovementRow {
    id: i64,
    id_insumo: Uuid,
    tipo: String,
    cantidad: Decimal,
    motivo: String,
    fecha: DateTime<Utc>,
}

impl TryFrom<MovementRow> for StockMovement {
    type Error = AppError;

    fn try_from(r: MovementRow) -> Result<Self, Self::Error> {
        let tipo = MovementType::from_str(&r.tipo).ok_or_else(|| {
            AppError::Internal(format!("unknown movement type '{}' in database", r.tipo))
        })?;
        Ok(StockMovement {
            id: r.id,
            id_insumo: r.id_insumo,
            tipo,
            cantidad: r.cantidad,
            motivo: r.motivo,
            fecha: r.fecha,
        })
    }
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add stock to a supply item inside the caller's transaction.
    ///
    /// Increments stock, inserts an `entrada` movement and recomputes the
    /// alert flag. Never commits or rolls back on its own.
    pub async fn add_stock_with(
        conn: &mut PgConnection,
        id_insumo: Uuid,
        cantidad: Decimal,
        motivo: &str,
    ) -> AppResult<StockUpdate> {
        validate_cantidad(cantidad).map_err(|msg| AppError::Validation {
            field: "cantidad".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser positiva".to_string(),
        })?;

        let (stock, minimo_stock) = sqlx::query_as::<_, (Decimal, Decimal)>(
            "SELECT stock, minimo_stock FROM insumos WHERE id = $1 FOR UPDATE",
        )
        .bind(id_insumo)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        let nuevo_stock = stock + cantidad;
        let alerta = stock_alert(nuevo_stock, minimo_stock);

        sqlx::query("UPDATE insumos SET stock = $1, alerta = $2, updated_at = NOW() WHERE id = $3")
            .bind(nuevo_stock)
            .bind(alerta)
            .bind(id_insumo)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO movimientos_inventario (id_insumo, tipo, cantidad, motivo) VALUES ($1, $2, $3, $4)",
        )
        .bind(id_insumo)
        .bind(MovementType::Entrada.as_str())
        .bind(cantidad)
        .bind(motivo)
        .execute(&mut *conn)
        .await?;

        Ok(StockUpdate {
            id_insumo,
            stock: nuevo_stock,
            alerta,
        })
    }

    /// Remove stock from a supply item inside the caller's transaction.
    ///
    /// The row lock is acquired before the sufficiency check; concurrent
    /// consumers of the same supply serialize here, which is what prevents
    /// two simultaneous sales from overselling against stale stock.
    pub async fn remove_stock_with(
        conn: &mut PgConnection,
        id_insumo: Uuid,
        cantidad: Decimal,
        motivo: &str,
    ) -> AppResult<StockUpdate> {
        validate_cantidad(cantidad).map_err(|msg| AppError::Validation {
            field: "cantidad".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser positiva".to_string(),
        })?;

        let (nombre, stock, minimo_stock) = sqlx::query_as::<_, (String, Decimal, Decimal)>(
            "SELECT nombre, stock, minimo_stock FROM insumos WHERE id = $1 FOR UPDATE",
        )
        .bind(id_insumo)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        if stock < cantidad {
            return Err(AppError::InsufficientStock {
                insumo: nombre,
                requerido: cantidad,
                disponible: stock,
            });
        }

        let nuevo_stock = stock - cantidad;
        let alerta = stock_alert(nuevo_stock, minimo_stock);

        sqlx::query("UPDATE insumos SET stock = $1, alerta = $2, updated_at = NOW() WHERE id = $3")
            .bind(nuevo_stock)
            .bind(alerta)
            .bind(id_insumo)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO movimientos_inventario (id_insumo, tipo, cantidad, motivo) VALUES ($1, $2, $3, $4)",
        )
        .bind(id_insumo)
        .bind(MovementType::Salida.as_str())
        .bind(cantidad)
        .bind(motivo)
        .execute(&mut *conn)
        .await?;

        Ok(StockUpdate {
            id_insumo,
            stock: nuevo_stock,
            alerta,
        })
    }

    /// Record a manual stock movement in its own transaction.
    ///
    /// An `entrada` also stamps the supply's last purchase date, since
    /// manual intakes are how purchases reach the shelf.
    pub async fn record_movement(&self, input: RecordMovementInput) -> AppResult<StockUpdate> {
        let tipo = validate_tipo_movimiento(&input.tipo_movimiento).map_err(|msg| {
            AppError::Validation {
                field: "tipo_movimiento".to_string(),
                message: msg.to_string(),
                message_es: "El tipo de movimiento debe ser entrada o salida".to_string(),
            }
        })?;
        validate_motivo(&input.motivo).map_err(|msg| AppError::Validation {
            field: "motivo".to_string(),
            message: msg.to_string(),
            message_es: "Se requiere un motivo para el movimiento".to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let update = match tipo {
            MovementType::Entrada => {
                let update =
                    Self::add_stock_with(&mut *tx, input.id_insumo, input.cantidad, &input.motivo)
                        .await?;
                sqlx::query("UPDATE insumos SET ultima_compra = CURRENT_DATE WHERE id = $1")
                    .bind(input.id_insumo)
                    .execute(&mut *tx)
                    .await?;
                update
            }
            MovementType::Salida => {
                Self::remove_stock_with(&mut *tx, input.id_insumo, input.cantidad, &input.motivo)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(update)
    }

    /// Get a supply item by ID
    pub async fn get_supply(&self, id_insumo: Uuid) -> AppResult<SupplyItem> {
        let row = sqlx::query_as::<_, SupplyRow>(
            r#"
            SELECT id, nombre, unidad_medida, stock, minimo_stock, costo_unitario,
                   alerta, ultima_compra, created_at, updated_at
            FROM insumos
            WHERE id = $1
            "#,
        )
        .bind(id_insumo)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Insumo".to_string()))?;

        Ok(row.into())
    }

    /// List all supply items
    pub async fn list_supplies(&self) -> AppResult<Vec<SupplyItem>> {
        let rows = sqlx::query_as::<_, SupplyRow>(
            r#"
            SELECT id, nombre, unidad_medida, stock, minimo_stock, costo_unitario,
                   alerta, ultima_compra, created_at, updated_at
            FROM insumos
            ORDER BY nombre
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SupplyItem::from).collect())
    }

    /// List supply items whose low-stock alert is active
    pub async fn list_low_stock(&self) -> AppResult<Vec<SupplyItem>> {
        let rows = sqlx::query_as::<_, SupplyRow>(
            r#"
            SELECT id, nombre, unidad_medida, stock, minimo_stock, costo_unitario,
                   alerta, ultima_compra, created_at, updated_at
            FROM insumos
            WHERE alerta = true
            ORDER BY nombre
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SupplyItem::from).collect())
    }

    /// List stock movements, optionally filtered by supply item
    pub async fn list_movements(
        &self,
        id_insumo: Option<Uuid>,
    ) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, id_insumo, tipo, cantidad, motivo, fecha
            FROM movimientos_inventario
            WHERE ($1::uuid IS NULL OR id_insumo = $1)
            ORDER BY fecha DESC, id DESC
            "#,
        )
        .bind(id_insumo)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(StockMovement::try_from).collect()
    }
}
