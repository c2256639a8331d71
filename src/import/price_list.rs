use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

use crate::validate::parse_number;

/// One `material, thickness_mm, unit_price` line of a price list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PriceListRow {
    pub(crate) material: String,
    pub(crate) thickness_mm: i64,
    pub(crate) unit_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PriceListSummary {
    pub(crate) materials_created: usize,
    pub(crate) tiers_written: usize,
    pub(crate) bags_created: usize,
}

/// Read a price list CSV. A first row with no numeric field is treated as a
/// header; rows with a blank material are skipped.
pub(crate) fn read_price_list(path: &Path) -> Result<Vec<PriceListRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut all_rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;
        all_rows.push(record.iter().map(|s| s.trim().to_string()).collect());
    }

    if all_rows.is_empty() {
        anyhow::bail!("CSV file is empty");
    }

    let skip = usize::from(looks_like_header(&all_rows[0]));
    let mut rows = Vec::new();

    for (i, row) in all_rows.iter().enumerate().skip(skip) {
        let line = i + 1;
        let material = row.first().map(String::as_str).unwrap_or_default();
        if material.is_empty() {
            continue;
        }

        let thickness_raw = row.get(1).map(String::as_str).unwrap_or_default();
        let thickness_mm = parse_thickness(thickness_raw)
            .with_context(|| format!("Row {line}: invalid thickness '{thickness_raw}'"))?;

        let price_raw = row.get(2).map(String::as_str).unwrap_or_default();
        let unit_price = parse_unit_price(price_raw)
            .with_context(|| format!("Row {line}: invalid unit price '{price_raw}'"))?;

        rows.push(PriceListRow {
            material: material.to_string(),
            thickness_mm,
            unit_price,
        });
    }

    Ok(rows)
}

fn looks_like_header(row: &[String]) -> bool {
    row.iter().all(|field| parse_number(field).is_none())
}

fn parse_thickness(s: &str) -> Result<i64> {
    let value = parse_number(s).ok_or_else(|| anyhow::anyhow!("not a number"))?;
    if !value.fract().is_zero() || value <= Decimal::ZERO {
        anyhow::bail!("thickness must be a positive whole number of millimeters");
    }
    value
        .to_i64()
        .ok_or_else(|| anyhow::anyhow!("thickness out of range"))
}

fn parse_unit_price(s: &str) -> Result<Decimal> {
    let cleaned = s.replace('$', "");
    let value = parse_number(&cleaned).ok_or_else(|| anyhow::anyhow!("not a number"))?;
    if value < Decimal::ZERO {
        anyhow::bail!("unit price cannot be negative");
    }
    Ok(value)
}

#[cfg(test)]
#[path = "price_list_tests.rs"]
mod tests;
