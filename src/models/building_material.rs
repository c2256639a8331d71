use rust_decimal::Decimal;

/// Unit price (per square meter) of a material applied at a given layer thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTier {
    pub thickness_mm: i64,
    pub unit_price: Decimal,
}

impl PriceTier {
    pub fn new(thickness_mm: i64, unit_price: Decimal) -> Self {
        Self {
            thickness_mm,
            unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingMaterial {
    pub id: Option<i64>,
    pub name: String,
    /// Sorted by thickness, ascending.
    pub price_tiers: Vec<PriceTier>,
}

impl BuildingMaterial {
    pub fn new(name: String) -> Self {
        Self {
            id: None,
            name,
            price_tiers: Vec::new(),
        }
    }

    /// Add or replace the tier for `tier.thickness_mm`, keeping tiers sorted.
    pub fn set_tier(&mut self, tier: PriceTier) {
        match self
            .price_tiers
            .binary_search_by_key(&tier.thickness_mm, |t| t.thickness_mm)
        {
            Ok(idx) => self.price_tiers[idx] = tier,
            Err(idx) => self.price_tiers.insert(idx, tier),
        }
    }

    /// Price of the thinnest tier that covers `thickness_mm`. Layers thicker
    /// than every tier are charged at the thickest tier's price.
    pub fn unit_price_for_thickness(&self, thickness_mm: i64) -> Option<Decimal> {
        self.price_tiers
            .iter()
            .find(|t| t.thickness_mm >= thickness_mm)
            .or_else(|| self.price_tiers.last())
            .map(|t| t.unit_price)
    }
}

impl std::fmt::Display for BuildingMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
