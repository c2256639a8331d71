use super::BuildingMaterial;

/// A purchasable package of a building material.
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
    pub id: Option<i64>,
    pub description: String,
    pub material: BuildingMaterial,
}

impl Bag {
    pub fn new(description: String, material: BuildingMaterial) -> Self {
        Self {
            id: None,
            description,
            material,
        }
    }

    pub fn material_id(&self) -> Option<i64> {
        self.material.id
    }
}
