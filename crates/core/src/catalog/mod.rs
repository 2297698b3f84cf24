//! Posting-cost catalog logic.
//!
//! Selects which ProductPrice rows are surfaced as purchasable publish
//! options: currently-effective utilization prices, de-duplicated per product
//! code by lowest credit cost.

pub mod selection;
pub mod types;

pub use selection::select_effective_prices;
pub use types::{PriceRow, PriceType};
