use crate::error::{BudgetError, Result};
use crate::models::{Bag, Customer};
use crate::store::BudgetStore;

const CUSTOMER_NOT_FOUND: &str = "El cliente no existe.";
const BAG_NOT_FOUND: &str = "La bolsa de aislante no existe.";

pub(crate) fn find_customer_or_fail(store: &impl BudgetStore, customer_id: i64) -> Result<Customer> {
    store
        .find_customer(customer_id)?
        .ok_or_else(|| BudgetError::NotFound(CUSTOMER_NOT_FOUND.into()))
}

pub(crate) fn find_bag_by_material_or_fail(store: &impl BudgetStore, material_id: i64) -> Result<Bag> {
    store
        .find_bag_by_material(material_id)?
        .ok_or_else(|| BudgetError::NotFound(BAG_NOT_FOUND.into()))
}
