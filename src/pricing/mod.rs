use rust_decimal::Decimal;

use crate::config::QuoteConfig;

/// Total cost of covering `area_to_cover` m² at `unit_price` per m².
/// `None` if the product does not fit in a `Decimal`.
pub(crate) fn budget_price(area_to_cover: Decimal, unit_price: Decimal) -> Option<Decimal> {
    area_to_cover.checked_mul(unit_price)
}

/// Bags needed to cover `area_to_cover` m² with a layer of `layer_thickness_mm`.
///
/// One reference bag covers `reference_coverage_m2` at `reference_thickness_mm`;
/// consumption scales linearly with both area and thickness. `None` on overflow.
pub(crate) fn bags_quantity(
    area_to_cover: Decimal,
    layer_thickness_mm: i64,
    config: &QuoteConfig,
) -> Option<Decimal> {
    if layer_thickness_mm == config.reference_thickness_mm {
        return area_to_cover.checked_div(config.reference_coverage_m2);
    }
    let volume = area_to_cover.checked_mul(Decimal::from(layer_thickness_mm))?;
    let per_bag = config
        .reference_coverage_m2
        .checked_mul(Decimal::from(config.reference_thickness_mm))?;
    volume.checked_div(per_bag)
}

#[cfg(test)]
mod tests;
