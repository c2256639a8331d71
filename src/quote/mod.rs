mod lookup;

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::QuoteConfig;
use crate::error::{BudgetError, Result};
use crate::models::{Budget, QuotedBudget};
use crate::pricing;
use crate::store::BudgetStore;
use crate::validate::{self, RawBudgetRequest};

use lookup::{find_bag_by_material_or_fail, find_customer_or_fail};

const NO_PRICE_FOR_THICKNESS: &str =
    "El material aislante no tiene precio para el espesor indicado.";

/// Validate the request, price it against the customer's chosen material and
/// persist the resulting budget. Nothing is written unless every step succeeds.
pub(crate) fn create_budget(
    store: &mut impl BudgetStore,
    config: &QuoteConfig,
    request: &RawBudgetRequest,
    now: DateTime<Utc>,
) -> Result<QuotedBudget> {
    let input = validate::validate(request).inspect_err(|errors| {
        tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "budget request rejected");
    })?;

    let customer = find_customer_or_fail(&*store, input.customer_id).inspect_err(|e| {
        tracing::debug!(customer_id = input.customer_id, "{e}");
    })?;
    let bag = find_bag_by_material_or_fail(&*store, input.insulating_material_id).inspect_err(|e| {
        tracing::debug!(material_id = input.insulating_material_id, "{e}");
    })?;

    let unit_price = bag
        .material
        .unit_price_for_thickness(input.layer_thickness_mm)
        .ok_or_else(|| BudgetError::NotFound(NO_PRICE_FOR_THICKNESS.into()))?;

    let customer_id = customer
        .id
        .ok_or_else(|| BudgetError::Store("customer record has no id".into()))?;
    let bag_id = bag
        .id
        .ok_or_else(|| BudgetError::Store("bag record has no id".into()))?;

    let expires_at = TimeDelta::try_days(config.validity_days)
        .and_then(|validity| now.checked_add_signed(validity))
        .ok_or_else(|| BudgetError::Store("expiration date out of range".into()))?;

    let price = pricing::budget_price(input.area_to_cover, unit_price);
    let bags_quantity =
        pricing::bags_quantity(input.area_to_cover, input.layer_thickness_mm, config);
    let (Some(price), Some(bags_quantity)) = (price, bags_quantity) else {
        tracing::debug!(area = %input.area_to_cover, "budget amounts overflow");
        return Err(BudgetError::Validation(validate::area_out_of_range()));
    };

    let mut budget = Budget {
        id: None,
        customer_id,
        bag_id,
        layer_thickness_mm: input.layer_thickness_mm,
        area_to_cover: input.area_to_cover,
        price,
        bags_quantity,
        expires_at,
        created_at: now,
    };

    budget.id = Some(store.save_budget(&budget)?);
    tracing::info!(
        budget_id = budget.id,
        customer_id,
        bag_id,
        price = %budget.price,
        bags = %budget.bags_quantity,
        "budget saved"
    );

    Ok(QuotedBudget {
        budget,
        customer,
        bag,
    })
}
