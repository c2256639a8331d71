#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn rockwool() -> BuildingMaterial {
    let mut material = BuildingMaterial::new("Lana de roca".into());
    material.set_tier(PriceTier::new(100, dec!(12.50)));
    material.set_tier(PriceTier::new(50, dec!(8.00)));
    material.set_tier(PriceTier::new(200, dec!(21.00)));
    material
}

// ── BuildingMaterial ──────────────────────────────────────────

#[test]
fn test_tiers_kept_sorted() {
    let material = rockwool();
    let thicknesses: Vec<i64> = material.price_tiers.iter().map(|t| t.thickness_mm).collect();
    assert_eq!(thicknesses, vec![50, 100, 200]);
}

#[test]
fn test_set_tier_replaces_existing() {
    let mut material = rockwool();
    material.set_tier(PriceTier::new(100, dec!(13.00)));
    assert_eq!(material.price_tiers.len(), 3);
    assert_eq!(material.unit_price_for_thickness(100), Some(dec!(13.00)));
}

#[test]
fn test_unit_price_exact_tier() {
    let material = rockwool();
    assert_eq!(material.unit_price_for_thickness(50), Some(dec!(8.00)));
    assert_eq!(material.unit_price_for_thickness(100), Some(dec!(12.50)));
    assert_eq!(material.unit_price_for_thickness(200), Some(dec!(21.00)));
}

#[test]
fn test_unit_price_between_tiers_uses_next_thicker() {
    let material = rockwool();
    assert_eq!(material.unit_price_for_thickness(75), Some(dec!(12.50)));
    assert_eq!(material.unit_price_for_thickness(101), Some(dec!(21.00)));
}

#[test]
fn test_unit_price_beyond_thickest_tier() {
    let mut material = BuildingMaterial::new("Celulosa".into());
    material.set_tier(PriceTier::new(120, dec!(9)));
    assert_eq!(material.unit_price_for_thickness(180), Some(dec!(9)));
}

#[test]
fn test_unit_price_without_tiers() {
    let material = BuildingMaterial::new("Sin precio".into());
    assert_eq!(material.unit_price_for_thickness(100), None);
}

#[test]
fn test_material_display() {
    assert_eq!(format!("{}", rockwool()), "Lana de roca");
}

// ── Customer / Bag ────────────────────────────────────────────

#[test]
fn test_customer_new_defaults() {
    let customer = Customer::new("Constructora Sur".into());
    assert!(customer.id.is_none());
    assert_eq!(customer.name, "Constructora Sur");
    assert!(!customer.created_at.is_empty());
    assert_eq!(format!("{customer}"), "Constructora Sur");
}

#[test]
fn test_bag_material_id() {
    let mut material = rockwool();
    material.id = Some(7);
    let bag = Bag::new("Bolsa 4,5 m²".into(), material);
    assert!(bag.id.is_none());
    assert_eq!(bag.material_id(), Some(7));
}

// ── Budget ────────────────────────────────────────────────────

fn make_budget(bags_quantity: Decimal) -> Budget {
    Budget {
        id: None,
        customer_id: 1,
        bag_id: 1,
        layer_thickness_mm: 100,
        area_to_cover: dec!(10),
        price: dec!(125),
        bags_quantity,
        expires_at: Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_bags_to_buy_rounds_up() {
    assert_eq!(make_budget(dec!(2.2222)).bags_to_buy(), dec!(3));
    assert_eq!(make_budget(dec!(2)).bags_to_buy(), dec!(2));
}

#[test]
fn test_budget_expiry() {
    let budget = make_budget(dec!(2));
    let before = Utc.with_ymd_and_hms(2024, 2, 14, 11, 59, 59).unwrap();
    assert!(!budget.is_expired(before));
    assert!(budget.is_expired(budget.expires_at));
}
