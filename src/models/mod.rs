mod bag;
mod budget;
mod building_material;
mod customer;

pub use bag::Bag;
pub use budget::{Budget, QuotedBudget};
pub use building_material::{BuildingMaterial, PriceTier};
pub use customer::Customer;

#[cfg(test)]
mod tests;
