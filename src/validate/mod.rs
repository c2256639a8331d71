use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

// ── Messages ─────────────────────────────────────────────────

const CUSTOMER_REQUIRED: &str = "Debe ingresar el cliente.";
const CUSTOMER_MIN: &str = "El cliente ingresado no es correcto.";
const MATERIAL_REQUIRED: &str = "Debe ingresar el material aislante.";
const MATERIAL_MIN: &str = "El material aislante ingresado no es correcto.";
const THICKNESS_REQUIRED: &str = "Debe ingresar el espesor de la capa a aplicar.";
const THICKNESS_NUMERIC: &str = "El espesor de la capa a aplicar debe ser un número.";
const THICKNESS_MIN: &str = "Debe ingresar una capa de 50mm como mínimo.";
const THICKNESS_MAX: &str = "Debe ingresar una capa de 200mm como máximo.";
const AREA_REQUIRED: &str = "Debe ingresar el área a cubrir en metros cuadrados.";
const AREA_NUMERIC: &str = "El área a cubrir ingresada es incorrecta.";
const AREA_MIN: &str = "El área a cubrir ingresada es incorrecta, la superficie debe ser de 4,5 metros cuadrados como mínimo.";

pub(crate) const MIN_LAYER_THICKNESS_MM: i64 = 50;
pub(crate) const MAX_LAYER_THICKNESS_MM: i64 = 200;

/// 4.5 m²
fn min_area_to_cover() -> Decimal {
    Decimal::new(45, 1)
}

static NUMERIC: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").ok()
});

// ── Fields ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Field {
    CustomerId,
    InsulatingMaterialId,
    LayerThickness,
    AreaToCover,
}

impl Field {
    /// Form field name.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerId => "customerId",
            Self::InsulatingMaterialId => "insulatingMaterialId",
            Self::LayerThickness => "layerThickness",
            Self::AreaToCover => "areaToCover",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == s)
    }

    pub(crate) fn all() -> &'static [Field] {
        &[
            Self::CustomerId,
            Self::InsulatingMaterialId,
            Self::LayerThickness,
            Self::AreaToCover,
        ]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Messages per field, in field order. Never empty when returned from
/// [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_default().push(message.to_string());
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub(crate) fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<&str> = self.messages().collect();
        write!(f, "{}", lines.join("\n"))
    }
}

// ── Input ────────────────────────────────────────────────────

/// Form fields exactly as received.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawBudgetRequest {
    pub(crate) customer_id: Option<String>,
    pub(crate) insulating_material_id: Option<String>,
    pub(crate) layer_thickness: Option<String>,
    pub(crate) area_to_cover: Option<String>,
}

impl RawBudgetRequest {
    /// Collect known form fields from `name=value` pairs; unknown names are
    /// ignored and a repeated name keeps the last value.
    pub(crate) fn from_form<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut request = Self::default();
        for (name, value) in pairs {
            let slot = match Field::parse(name) {
                Some(Field::CustomerId) => &mut request.customer_id,
                Some(Field::InsulatingMaterialId) => &mut request.insulating_material_id,
                Some(Field::LayerThickness) => &mut request.layer_thickness,
                Some(Field::AreaToCover) => &mut request.area_to_cover,
                None => continue,
            };
            *slot = Some(value.to_string());
        }
        request
    }
}

/// Validated, typed quote input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetInput {
    pub(crate) customer_id: i64,
    pub(crate) insulating_material_id: i64,
    pub(crate) layer_thickness_mm: i64,
    /// Square meters.
    pub(crate) area_to_cover: Decimal,
}

/// Check every field, stopping at the first failing rule of each one.
pub(crate) fn validate(request: &RawBudgetRequest) -> Result<BudgetInput, FieldErrors> {
    let customer_id = validate_customer_id(request.customer_id.as_deref());
    let material_id = validate_material_id(request.insulating_material_id.as_deref());
    let thickness = validate_layer_thickness(request.layer_thickness.as_deref());
    let area = validate_area_to_cover(request.area_to_cover.as_deref());

    let mut errors = FieldErrors::default();
    collect(&mut errors, Field::CustomerId, &customer_id);
    collect(&mut errors, Field::InsulatingMaterialId, &material_id);
    collect(&mut errors, Field::LayerThickness, &thickness);
    collect(&mut errors, Field::AreaToCover, &area);

    match (customer_id, material_id, thickness, area) {
        (Ok(customer_id), Ok(insulating_material_id), Ok(layer_thickness_mm), Ok(area_to_cover)) => {
            Ok(BudgetInput {
                customer_id,
                insulating_material_id,
                layer_thickness_mm,
                area_to_cover,
            })
        }
        _ => Err(errors),
    }
}

/// Area errors for a value that validated but is too large to price.
pub(crate) fn area_out_of_range() -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.add(Field::AreaToCover, AREA_NUMERIC);
    errors
}

fn collect<T>(errors: &mut FieldErrors, field: Field, result: &Result<T, &'static str>) {
    if let Err(message) = result {
        errors.add(field, message);
    }
}

fn validate_customer_id(raw: Option<&str>) -> Result<i64, &'static str> {
    let value = required(raw, CUSTOMER_REQUIRED)?;
    positive_id(value, CUSTOMER_MIN)
}

fn validate_material_id(raw: Option<&str>) -> Result<i64, &'static str> {
    let value = required(raw, MATERIAL_REQUIRED)?;
    positive_id(value, MATERIAL_MIN)
}

fn validate_layer_thickness(raw: Option<&str>) -> Result<i64, &'static str> {
    let value = required(raw, THICKNESS_REQUIRED)?;
    let mm = numeric(value, THICKNESS_NUMERIC)?;
    let mm = whole(mm, THICKNESS_NUMERIC)?;
    if mm < MIN_LAYER_THICKNESS_MM {
        return Err(THICKNESS_MIN);
    }
    if mm > MAX_LAYER_THICKNESS_MM {
        return Err(THICKNESS_MAX);
    }
    Ok(mm)
}

fn validate_area_to_cover(raw: Option<&str>) -> Result<Decimal, &'static str> {
    let value = required(raw, AREA_REQUIRED)?;
    let area = numeric(value, AREA_NUMERIC)?;
    if area < min_area_to_cover() {
        return Err(AREA_MIN);
    }
    Ok(area)
}

// ── Rules ────────────────────────────────────────────────────

fn required<'a>(raw: Option<&'a str>, message: &'static str) -> Result<&'a str, &'static str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(message),
    }
}

fn positive_id(value: &str, message: &'static str) -> Result<i64, &'static str> {
    match value.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(message),
    }
}

fn numeric(value: &str, message: &'static str) -> Result<Decimal, &'static str> {
    parse_number(value).ok_or(message)
}

fn whole(value: Decimal, message: &'static str) -> Result<i64, &'static str> {
    if !value.fract().is_zero() {
        return Err(message);
    }
    value.to_i64().ok_or(message)
}

/// Parse a plain or scientific decimal literal. Magnitudes a `Decimal` cannot
/// hold (beyond about 7.9e28, or finer than 1e-28) are not numbers here.
pub(crate) fn parse_number(value: &str) -> Option<Decimal> {
    let value = value.trim();
    let is_numeric = NUMERIC.as_ref().is_some_and(|re| re.is_match(value));
    if !is_numeric {
        return None;
    }
    match value.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => {
            Decimal::from_scientific(&format!("{}e{exponent}", canonical_mantissa(mantissa))).ok()
        }
        None => Decimal::from_str(&canonical_mantissa(value)).ok(),
    }
}

/// `+.5` -> `0.5`, `-5.` -> `-5`
fn canonical_mantissa(mantissa: &str) -> String {
    let (sign, digits) = match mantissa.strip_prefix(['+', '-']) {
        Some(rest) if mantissa.starts_with('-') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", mantissa),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    if digits.starts_with('.') {
        format!("{sign}0{digits}")
    } else {
        format!("{sign}{digits}")
    }
}
