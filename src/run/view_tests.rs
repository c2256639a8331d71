#![allow(clippy::unwrap_used)]

use chrono::TimeZone;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Bag, Budget, PriceTier};
use crate::validate::{validate, RawBudgetRequest};

fn quoted() -> QuotedBudget {
    let mut customer = Customer::new("Constructora Sur".into());
    customer.id = Some(1);
    let mut material = BuildingMaterial::new("Lana de vidrio".into());
    material.id = Some(2);
    material.set_tier(PriceTier::new(100, dec!(10)));
    let mut bag = Bag::new("Bolsa 4,5 m²".into(), material);
    bag.id = Some(3);

    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    QuotedBudget {
        budget: Budget {
            id: Some(12),
            customer_id: 1,
            bag_id: 3,
            layer_thickness_mm: 75,
            area_to_cover: dec!(10),
            price: dec!(100),
            bags_quantity: dec!(10) * dec!(75) / dec!(450),
            expires_at: Utc.with_ymd_and_hms(2024, 3, 31, 9, 0, 0).unwrap(),
            created_at,
        },
        customer,
        bag,
    }
}

#[test]
fn test_render_budget() {
    let now = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
    let out = render_budget(&quoted(), now);
    assert!(out.starts_with("Budget #12"));
    assert!(out.contains("Customer:        Constructora Sur"));
    assert!(out.contains("Material:        Lana de vidrio"));
    assert!(out.contains("Bag:             Bolsa 4,5 m²"));
    assert!(out.contains("Layer:           75 mm"));
    assert!(out.contains("Area:            10.00 m²"));
    assert!(out.contains("Price:           $100.00"));
    assert!(out.contains("Bags:            1.67 (buy 2)"));
    assert!(out.contains("Expires:         2024-03-31"));
    assert!(!out.contains("expired"));
}

#[test]
fn test_render_expired_budget() {
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let out = render_budget(&quoted(), now);
    assert!(out.contains("2024-03-31 (expired)"));
}

#[test]
fn test_render_unsaved_budget() {
    let mut q = quoted();
    q.budget.id = None;
    let out = render_budget(&q, q.budget.created_at);
    assert!(out.starts_with("Budget (unsaved)"));
}

#[test]
fn test_render_validation_errors() {
    let errors = validate(&RawBudgetRequest::default()).unwrap_err();
    let err = BudgetError::Validation(errors);
    let out = render_errors(&err);
    assert_eq!(out.lines().count(), 4);
    assert_eq!(out.lines().next(), Some("Debe ingresar el cliente."));
    assert_eq!(exit_status(&err), 2);
}

#[test]
fn test_render_not_found() {
    let err = BudgetError::NotFound("El cliente no existe.".into());
    assert_eq!(render_errors(&err), "El cliente no existe.");
    assert_eq!(exit_status(&err), 3);
    assert_eq!(exit_status(&BudgetError::Store("locked".into())), 3);
}

#[test]
fn test_render_material() {
    let q = quoted();
    let out = render_material(&q.bag.material, &["Bolsa 4,5 m²"]);
    assert!(out.starts_with("2    Lana de vidrio"));
    assert!(out.contains(" 100 mm  $10.00/m²"));
    assert!(out.contains("bag: Bolsa 4,5 m²"));
}

#[test]
fn test_render_material_without_prices() {
    let material = BuildingMaterial::new("Corcho".into());
    let out = render_material(&material, &[]);
    assert!(out.contains("no prices"));
}

#[test]
fn test_render_customer_row() {
    let q = quoted();
    assert_eq!(render_customer_row(&q.customer), "1    Constructora Sur");
}
