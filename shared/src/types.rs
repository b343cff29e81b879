//! Common enums used across the platform
//!
//! Wire and database values are the Spanish terms the POS frontend and the
//! `ventas`/`movimientos_inventario` tables use; variants carry the same
//! names so serialization needs no renaming beyond lowercasing.

use serde::{Deserialize, Serialize};

/// Direction of an inventory movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Entrada,
    Salida,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entrada => "entrada",
            MovementType::Salida => "salida",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(MovementType::Entrada),
            "salida" => Some(MovementType::Salida),
            _ => None,
        }
    }
}

/// Payment method for a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Efectivo,
    Tarjeta,
    Transferencia,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Tarjeta => "tarjeta",
            PaymentMethod::Transferencia => "transferencia",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "efectivo" => Some(PaymentMethod::Efectivo),
            "tarjeta" => Some(PaymentMethod::Tarjeta),
            "transferencia" => Some(PaymentMethod::Transferencia),
            _ => None,
        }
    }
}

/// Lifecycle status of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Completada,
    Anulada,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completada => "completada",
            SaleStatus::Anulada => "anulada",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "completada" => Some(SaleStatus::Completada),
            "anulada" => Some(SaleStatus::Anulada),
            _ => None,
        }
    }

    /// The only permitted transition is `completada -> anulada`
    pub fn can_void(&self) -> bool {
        matches!(self, SaleStatus::Completada)
    }
}
