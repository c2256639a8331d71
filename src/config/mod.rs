use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

pub(crate) const ENV_REFERENCE_COVERAGE: &str = "INSULQUOTE_REFERENCE_COVERAGE";
pub(crate) const ENV_REFERENCE_THICKNESS: &str = "INSULQUOTE_REFERENCE_THICKNESS";
pub(crate) const ENV_VALIDITY_DAYS: &str = "INSULQUOTE_VALIDITY_DAYS";
pub(crate) const ENV_DB_PATH: &str = "INSULQUOTE_DB";

/// Constants of the reference bag and quote validity.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuoteConfig {
    /// Square meters one bag covers at the reference thickness.
    pub(crate) reference_coverage_m2: Decimal,
    pub(crate) reference_thickness_mm: i64,
    pub(crate) validity_days: i64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            reference_coverage_m2: Decimal::new(45, 1),
            reference_thickness_mm: 100,
            validity_days: 30,
        }
    }
}

impl QuoteConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_REFERENCE_COVERAGE) {
            let value = Decimal::from_str(raw.trim())
                .with_context(|| format!("{ENV_REFERENCE_COVERAGE} is not a number: {raw}"))?;
            if value <= Decimal::ZERO {
                anyhow::bail!("{ENV_REFERENCE_COVERAGE} must be greater than zero, got {raw}");
            }
            config.reference_coverage_m2 = value;
        }

        if let Some(raw) = lookup(ENV_REFERENCE_THICKNESS) {
            config.reference_thickness_mm = parse_positive(ENV_REFERENCE_THICKNESS, &raw)?;
        }

        if let Some(raw) = lookup(ENV_VALIDITY_DAYS) {
            config.validity_days = parse_positive(ENV_VALIDITY_DAYS, &raw)?;
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} is not an integer: {raw}"))?;
    if value <= 0 {
        anyhow::bail!("{key} must be greater than zero, got {raw}");
    }
    Ok(value)
}

pub(crate) fn db_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        return Ok(PathBuf::from(path));
    }
    let proj_dirs = directories::ProjectDirs::from("com", "insulquote", "InsulQuote")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("insulquote.db"))
}
