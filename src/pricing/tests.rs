#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn config() -> QuoteConfig {
    QuoteConfig::default()
}

// ── Price ─────────────────────────────────────────────────────

#[test]
fn test_price_is_area_times_unit_price() {
    assert_eq!(budget_price(dec!(9), dec!(10)), Some(dec!(90)));
    assert_eq!(budget_price(dec!(4.5), dec!(12.50)), Some(dec!(56.25)));
}

#[test]
fn test_price_never_negative_for_valid_input() {
    for area in [dec!(4.5), dec!(10), dec!(1000.75)] {
        for unit in [Decimal::ZERO, dec!(0.01), dec!(33.3)] {
            assert!(budget_price(area, unit).unwrap() >= Decimal::ZERO);
        }
    }
}

// ── Quantity ──────────────────────────────────────────────────

#[test]
fn test_reference_thickness() {
    assert_eq!(bags_quantity(dec!(9), 100, &config()), Some(dec!(2)));
    assert_eq!(bags_quantity(dec!(4.5), 100, &config()), Some(dec!(1)));
}

#[test]
fn test_half_thickness() {
    assert_eq!(bags_quantity(dec!(9), 50, &config()), Some(dec!(1)));
}

#[test]
fn test_double_thickness() {
    assert_eq!(bags_quantity(dec!(4.5), 200, &config()), Some(dec!(2)));
}

#[test]
fn test_non_reference_matches_formula() {
    for (area, mm) in [(dec!(10), 75), (dec!(27), 150), (dec!(6.3), 120)] {
        let expected = area * Decimal::from(mm) / (dec!(4.5) * dec!(100));
        assert_eq!(bags_quantity(area, mm, &config()).unwrap(), expected, "{area} m² at {mm} mm");
    }
}

#[test]
fn test_reference_branch_agrees_with_proportional_model() {
    let area = dec!(13.5);
    let reference = bags_quantity(area, 100, &config()).unwrap();
    let proportional = area * dec!(100) / dec!(450);
    assert_eq!(reference, proportional);
}

#[test]
fn test_quantity_scales_linearly_with_thickness() {
    let thin = bags_quantity(dec!(18), 60, &config()).unwrap();
    let thick = bags_quantity(dec!(18), 120, &config()).unwrap();
    assert_eq!(thick, thin * dec!(2));
}

#[test]
fn test_custom_reference_bag() {
    let config = QuoteConfig {
        reference_coverage_m2: dec!(5),
        reference_thickness_mm: 80,
        validity_days: 30,
    };
    assert_eq!(bags_quantity(dec!(10), 80, &config).unwrap(), dec!(2));
    assert_eq!(bags_quantity(dec!(10), 160, &config).unwrap(), dec!(4));
    // 100 mm is no longer the reference, so the scaled branch applies
    assert_eq!(bags_quantity(dec!(10), 100, &config).unwrap(), dec!(2.5));
}

// ── Overflow ──────────────────────────────────────────────────

#[test]
fn test_overflow_is_none() {
    let huge = Decimal::MAX / dec!(2);
    assert_eq!(budget_price(huge, dec!(10)), None);
    assert_eq!(bags_quantity(huge, 200, &config()), None);
}

#[test]
fn test_largest_area_at_reference_thickness_still_divides() {
    assert!(bags_quantity(Decimal::MAX, 100, &config()).is_some());
    assert_eq!(budget_price(Decimal::MAX, Decimal::ONE), Some(Decimal::MAX));
}
