use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{Bag, Customer};

/// A saved insulation quote. There is no update path: once stored, price,
/// quantity and expiration never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub bag_id: i64,
    pub layer_thickness_mm: i64,
    /// Square meters.
    pub area_to_cover: Decimal,
    pub price: Decimal,
    pub bags_quantity: Decimal,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whole bags needed to cover the area.
    pub fn bags_to_buy(&self) -> Decimal {
        self.bags_quantity.ceil()
    }
}

/// A budget together with the records it was priced from.
#[derive(Debug, Clone)]
pub struct QuotedBudget {
    pub budget: Budget,
    pub customer: Customer,
    pub bag: Bag,
}
