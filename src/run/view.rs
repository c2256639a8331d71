use chrono::{DateTime, Utc};

use crate::error::BudgetError;
use crate::models::{BuildingMaterial, Customer, QuotedBudget};

const RULE_WIDTH: usize = 44;

/// Success view for a freshly created or stored budget.
pub(crate) fn render_budget(quoted: &QuotedBudget, now: DateTime<Utc>) -> String {
    let budget = &quoted.budget;
    let id = budget
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "(unsaved)".into());
    let status = if budget.is_expired(now) { " (expired)" } else { "" };

    let lines = vec![
        format!("Budget {id}"),
        "─".repeat(RULE_WIDTH),
        format!("  Customer:        {}", quoted.customer),
        format!("  Material:        {}", quoted.bag.material),
        format!("  Bag:             {}", quoted.bag.description),
        format!("  Layer:           {} mm", budget.layer_thickness_mm),
        format!("  Area:            {:.2} m²", budget.area_to_cover.round_dp(2)),
        format!("  Price:           ${:.2}", budget.price.round_dp(2)),
        format!(
            "  Bags:            {:.2} (buy {:.0})",
            budget.bags_quantity.round_dp(2),
            budget.bags_to_buy()
        ),
        format!(
            "  Expires:         {}{status}",
            budget.expires_at.format("%Y-%m-%d")
        ),
    ];
    lines.join("\n")
}

/// Error lines for a rejected quote, one message per line.
pub(crate) fn render_errors(err: &BudgetError) -> String {
    err.messages().join("\n")
}

/// Process exit status for a rejected quote.
pub(crate) fn exit_status(err: &BudgetError) -> u8 {
    match err.status_code() {
        422 => 2,
        _ => 3,
    }
}

pub(crate) fn render_material(material: &BuildingMaterial, bag_descriptions: &[&str]) -> String {
    let mut lines = vec![format!("{:<4} {}", material.id.unwrap_or(0), material.name)];
    if material.price_tiers.is_empty() {
        lines.push("       no prices".into());
    }
    for tier in &material.price_tiers {
        lines.push(format!(
            "       {:>4} mm  ${:.2}/m²",
            tier.thickness_mm,
            tier.unit_price.round_dp(2)
        ));
    }
    for description in bag_descriptions {
        lines.push(format!("       bag: {description}"));
    }
    lines.join("\n")
}

pub(crate) fn render_customer_row(customer: &Customer) -> String {
    format!("{:<4} {}", customer.id.unwrap_or(0), customer.name)
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
