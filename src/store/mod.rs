use anyhow::Result;

use crate::models::{Bag, Budget, Customer};

/// Lookups and the single write a quote needs.
pub(crate) trait BudgetStore {
    fn find_customer(&self, id: i64) -> Result<Option<Customer>>;

    /// First bag (lowest id) packaging the given material.
    fn find_bag_by_material(&self, material_id: i64) -> Result<Option<Bag>>;

    /// Insert the budget and return its new id.
    fn save_budget(&mut self, budget: &Budget) -> Result<i64>;
}

#[cfg(test)]
pub(crate) mod memory;
