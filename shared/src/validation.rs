//! Validation utilities for the Granizados POS platform
//!
//! Pure input checks shared by the backend request boundary and the tests.
//! Everything here runs before any datastore work.

use rust_decimal::Decimal;

use crate::types::{MovementType, PaymentMethod};

// ============================================================================
// Quantity and Price Validations
// ============================================================================

/// Validate a stock or sale quantity is strictly positive
pub fn validate_cantidad(cantidad: Decimal) -> Result<(), &'static str> {
    if cantidad <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a snapshotted unit price (zero is allowed for giveaways)
pub fn validate_precio_unitario(precio: Decimal) -> Result<(), &'static str> {
    if precio < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Validate a minimum-stock threshold
pub fn validate_minimo_stock(minimo: Decimal) -> Result<(), &'static str> {
    if minimo < Decimal::ZERO {
        return Err("Minimum stock cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Enum Parsing Validations
// ============================================================================

/// Parse and validate a payment method string
pub fn validate_metodo_pago(metodo: &str) -> Result<PaymentMethod, &'static str> {
    PaymentMethod::from_str(metodo)
        .ok_or("Payment method must be one of: efectivo, tarjeta, transferencia")
}

/// Parse and validate a movement type string
pub fn validate_tipo_movimiento(tipo: &str) -> Result<MovementType, &'static str> {
    MovementType::from_str(tipo).ok_or("Movement type must be one of: entrada, salida")
}

// ============================================================================
// Sale Input Validations
// ============================================================================

/// Validate the line items of a sale request before any datastore work.
///
/// Lines are `(cantidad, precio_unitario)` pairs in input order.
pub fn validate_sale_lines(lines: &[(Decimal, Decimal)]) -> Result<(), &'static str> {
    if lines.is_empty() {
        return Err("A sale must have at least one line item");
    }
    for (cantidad, precio) in lines {
        validate_cantidad(*cantidad)?;
        validate_precio_unitario(*precio)?;
    }
    Ok(())
}

/// Validate a free-text movement reason
pub fn validate_motivo(motivo: &str) -> Result<(), &'static str> {
    if motivo.trim().is_empty() {
        return Err("A movement reason is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ========================================================================
    // Quantity and Price Tests
    // ========================================================================

    #[test]
    fn test_validate_cantidad_positive() {
        assert!(validate_cantidad(dec("0.06")).is_ok());
        assert!(validate_cantidad(dec("3")).is_ok());
    }

    #[test]
    fn test_validate_cantidad_rejects_zero_and_negative() {
        assert!(validate_cantidad(Decimal::ZERO).is_err());
        assert!(validate_cantidad(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_precio_allows_zero() {
        assert!(validate_precio_unitario(Decimal::ZERO).is_ok());
        assert!(validate_precio_unitario(dec("45.50")).is_ok());
        assert!(validate_precio_unitario(dec("-0.01")).is_err());
    }

    // ========================================================================
    // Enum Parsing Tests
    // ========================================================================

    #[test]
    fn test_validate_metodo_pago() {
        assert_eq!(validate_metodo_pago("efectivo"), Ok(PaymentMethod::Efectivo));
        assert_eq!(validate_metodo_pago("tarjeta"), Ok(PaymentMethod::Tarjeta));
        assert_eq!(
            validate_metodo_pago("transferencia"),
            Ok(PaymentMethod::Transferencia)
        );
        assert!(validate_metodo_pago("bitcoin").is_err());
    }

    #[test]
    fn test_validate_tipo_movimiento() {
        assert_eq!(validate_tipo_movimiento("entrada"), Ok(MovementType::Entrada));
        assert_eq!(validate_tipo_movimiento("salida"), Ok(MovementType::Salida));
        assert!(validate_tipo_movimiento("ajuste").is_err());
    }

    // ========================================================================
    // Sale Input Tests
    // ========================================================================

    #[test]
    fn test_validate_sale_lines_rejects_empty() {
        assert!(validate_sale_lines(&[]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_rejects_bad_line() {
        assert!(validate_sale_lines(&[(dec("1"), dec("10")), (Decimal::ZERO, dec("5"))]).is_err());
        assert!(validate_sale_lines(&[(dec("1"), dec("-5"))]).is_err());
    }

    #[test]
    fn test_validate_sale_lines_accepts_valid() {
        assert!(validate_sale_lines(&[(dec("2"), dec("35")), (dec("1"), dec("0"))]).is_ok());
    }

    #[test]
    fn test_validate_motivo() {
        assert!(validate_motivo("Compra semanal").is_ok());
        assert!(validate_motivo("   ").is_err());
    }
}
