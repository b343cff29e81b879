//! Ingredient consumption tests
//!
//! Tests for the recipe-driven consumption planning:
//! - requerido = cantidad_usada x cantidad_vendida per recipe line
//! - An empty recipe plans zero deductions (no-op is success)
//! - A plan is accepted only when every supply covers its deduction, and
//!   the failing supply is identified with needed vs available quantities

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{plan_consumption, required_quantity, PlannedDeduction, RecipeLine};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn recipe_line(nombre: &str, cantidad_usada: Decimal) -> RecipeLine {
    RecipeLine {
        id_producto: Uuid::new_v4(),
        id_insumo: Uuid::new_v4(),
        nombre_insumo: nombre.to_string(),
        cantidad_usada,
    }
}

/// The sufficiency rule the consumption engine applies per planned
/// deduction, mirrored over an in-memory stock table
fn check_plan(
    plan: &[PlannedDeduction],
    stocks: &HashMap<Uuid, Decimal>,
) -> Result<(), (String, Decimal, Decimal)> {
    for deduction in plan {
        let disponible = stocks.get(&deduction.id_insumo).copied().unwrap_or(Decimal::ZERO);
        if disponible < deduction.requerido {
            return Err((
                deduction.nombre_insumo.clone(),
                deduction.requerido,
                disponible,
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a recipe of 1 to 8 lines with three-decimal per-unit usage
fn recipe_strategy() -> impl Strategy<Value = Vec<RecipeLine>> {
    prop::collection::vec((1..=50_000i64).prop_map(|n| Decimal::new(n, 3)), 1..=8).prop_map(
        |usages| {
            usages
                .into_iter()
                .enumerate()
                .map(|(i, cantidad_usada)| recipe_line(&format!("insumo-{}", i), cantidad_usada))
                .collect()
        },
    )
}

/// Generate a sold quantity (1 to 100 units)
fn cantidad_vendida_strategy() -> impl Strategy<Value = Decimal> {
    (1..=100i64).prop_map(Decimal::from)
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Every planned deduction scales linearly with the quantity sold
    #[test]
    fn test_plan_scales_with_quantity(
        recipe in recipe_strategy(),
        cantidad in cantidad_vendida_strategy()
    ) {
        let plan = plan_consumption(&recipe, cantidad);
        prop_assert_eq!(plan.len(), recipe.len());
        for (line, deduction) in recipe.iter().zip(&plan) {
            prop_assert_eq!(deduction.id_insumo, line.id_insumo);
            prop_assert_eq!(deduction.requerido, line.cantidad_usada * cantidad);
        }
    }

    /// Plans preserve recipe order
    #[test]
    fn test_plan_preserves_order(recipe in recipe_strategy()) {
        let plan = plan_consumption(&recipe, Decimal::ONE);
        let planned: Vec<Uuid> = plan.iter().map(|d| d.id_insumo).collect();
        let expected: Vec<Uuid> = recipe.iter().map(|l| l.id_insumo).collect();
        prop_assert_eq!(planned, expected);
    }

    /// A plan against exactly-sufficient stock is accepted
    #[test]
    fn test_exact_stock_is_sufficient(
        recipe in recipe_strategy(),
        cantidad in cantidad_vendida_strategy()
    ) {
        let plan = plan_consumption(&recipe, cantidad);
        let stocks: HashMap<Uuid, Decimal> =
            plan.iter().map(|d| (d.id_insumo, d.requerido)).collect();
        prop_assert!(check_plan(&plan, &stocks).is_ok());
    }

    /// Shorting any single supply by any amount fails the plan on that
    /// supply with the exact needed/available pair
    #[test]
    fn test_any_shortage_is_detected(
        recipe in recipe_strategy(),
        cantidad in cantidad_vendida_strategy(),
        short_index in 0..8usize,
        shortage in (1..=1000i64).prop_map(|n| Decimal::new(n, 3))
    ) {
        let plan = plan_consumption(&recipe, cantidad);
        let short_index = short_index % plan.len();
        let mut stocks: HashMap<Uuid, Decimal> =
            plan.iter().map(|d| (d.id_insumo, d.requerido)).collect();

        let victim = &plan[short_index];
        let disponible = victim.requerido - shortage;
        stocks.insert(victim.id_insumo, disponible.max(Decimal::ZERO));

        let err = check_plan(&plan, &stocks);
        prop_assert!(err.is_err());
        let (nombre, requerido, _) = err.unwrap_err();
        // The first failing supply in plan order is reported
        prop_assert!(plan.iter().any(|d| d.nombre_insumo == nombre));
        prop_assert!(requerido > Decimal::ZERO);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// An empty recipe plans nothing: the sale proceeds with no stock effect
    #[test]
    fn test_empty_recipe_is_noop() {
        let plan = plan_consumption(&[], dec("5"));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_required_quantity_exact() {
        assert_eq!(required_quantity(dec("0.06"), dec("3")), dec("0.18"));
    }

    /// The Cuba Libre scenario: 0.06 units of Ron per drink, stock 5,
    /// minimum 2
    #[test]
    fn test_small_sale_within_stock() {
        let line = recipe_line("Ron", dec("0.06"));
        let plan = plan_consumption(std::slice::from_ref(&line), dec("3"));
        assert_eq!(plan[0].requerido, dec("0.18"));

        let stocks: HashMap<Uuid, Decimal> = [(line.id_insumo, dec("5"))].into_iter().collect();
        assert!(check_plan(&plan, &stocks).is_ok());

        // Applying the accepted plan leaves 4.82, above the minimum of 2
        let restante = dec("5") - plan[0].requerido;
        assert_eq!(restante, dec("4.82"));
        assert!(!shared::models::stock_alert(restante, dec("2")));
    }

    /// Selling 100 Cuba Libres needs 6 Ron against 5 available: rejected,
    /// identifying the supply and both quantities, stock untouched
    #[test]
    fn test_oversized_sale_rejected_with_detail() {
        let line = recipe_line("Ron", dec("0.06"));
        let plan = plan_consumption(std::slice::from_ref(&line), dec("100"));
        assert_eq!(plan[0].requerido, dec("6.00"));

        let stocks: HashMap<Uuid, Decimal> = [(line.id_insumo, dec("5"))].into_iter().collect();
        let (nombre, requerido, disponible) = check_plan(&plan, &stocks).unwrap_err();
        assert_eq!(nombre, "Ron");
        assert_eq!(requerido, dec("6.00"));
        assert_eq!(disponible, dec("5"));
    }

    /// A multi-line plan fails on the first short supply in plan order
    #[test]
    fn test_first_shortage_reported() {
        let ron = recipe_line("Ron", dec("0.06"));
        let cola = recipe_line("Cola", dec("0.25"));
        let recipe = vec![ron.clone(), cola.clone()];

        let plan = plan_consumption(&recipe, dec("10"));
        let stocks: HashMap<Uuid, Decimal> = [
            (ron.id_insumo, dec("0.1")),  // needs 0.6
            (cola.id_insumo, dec("0.1")), // needs 2.5
        ]
        .into_iter()
        .collect();

        let (nombre, _, _) = check_plan(&plan, &stocks).unwrap_err();
        assert_eq!(nombre, "Ron");
    }
}
