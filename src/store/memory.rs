use anyhow::Result;
use std::cell::Cell;

use super::BudgetStore;
use crate::models::{Bag, Budget, Customer};

/// Vec-backed store that records every call.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) customers: Vec<Customer>,
    pub(crate) bags: Vec<Bag>,
    pub(crate) budgets: Vec<Budget>,
    pub(crate) lookups: Cell<usize>,
    pub(crate) fail_saves: bool,
}

impl BudgetStore for MemoryStore {
    fn find_customer(&self, id: i64) -> Result<Option<Customer>> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.customers.iter().find(|c| c.id == Some(id)).cloned())
    }

    fn find_bag_by_material(&self, material_id: i64) -> Result<Option<Bag>> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self
            .bags
            .iter()
            .filter(|b| b.material_id() == Some(material_id))
            .min_by_key(|b| b.id)
            .cloned())
    }

    fn save_budget(&mut self, budget: &Budget) -> Result<i64> {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        let id = self.budgets.len() as i64 + 1;
        let mut saved = budget.clone();
        saved.id = Some(id);
        self.budgets.push(saved);
        Ok(id)
    }
}
