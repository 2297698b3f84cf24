//! Catalog domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ProductPrice classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Purchasable credit bundle (top-up).
    CreditBundle,
    /// Credit cost of publishing a post.
    CreditUtilization,
}

/// One ProductPrice row, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    /// Row ID.
    pub id: Uuid,
    /// Owning product's code.
    pub product_code: String,
    /// Bundle or utilization.
    pub price_type: PriceType,
    /// Credit cost (utilization) or credit value (bundle).
    pub unit_credit_value: Decimal,
    /// Monetary price.
    pub unit_price: Decimal,
    /// First day the price is effective.
    pub effective_date_start: NaiveDate,
    /// Last day the price is effective.
    pub effective_date_end: NaiveDate,
    /// Whether the row is visible at all.
    pub published: bool,
}

impl PriceRow {
    /// Returns true if the row is effective on the given day.
    #[must_use]
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.effective_date_start <= date && date <= self.effective_date_end
    }
}
