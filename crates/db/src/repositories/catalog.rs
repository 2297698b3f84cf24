//! Posting-cost catalog reads.
//!
//! Loads active utilization prices with their owning products and delegates
//! the effective-price selection (lowest credit cost per product code) to
//! `hireboard_core::catalog`.

use std::collections::HashMap;

use chrono::NaiveDate;
use hireboard_core::catalog::{select_effective_prices, PriceRow};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{PriceType, RecordStatus};
use crate::entities::{product_prices, products};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One purchasable publish option, ready for display.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PostingOption {
    /// Price row id; passed back when creating an offline post.
    pub product_price_id: Uuid,
    /// Owning product's code.
    pub product_code: String,
    /// Owning product's display name.
    pub product_name: String,
    /// Credit cost of one publish.
    pub unit_credit_value: Decimal,
    /// Monetary price of the option.
    pub unit_price: Decimal,
    /// Last day the option stays valid.
    pub effective_date_end: NaiveDate,
}

/// Repository for the product and price catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the publish options effective on `today`: one per product
    /// code, the cheapest in credits, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn posting_cost_options(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<PostingOption>, CatalogError> {
        let rows = product_prices::Entity::find()
            .filter(product_prices::Column::Status.eq(RecordStatus::Active))
            .filter(product_prices::Column::PriceType.eq(PriceType::CreditUtilization))
            .filter(product_prices::Column::Published.eq(true))
            .find_also_related(products::Entity)
            .all(&self.db)
            .await?;

        let mut names: HashMap<String, String> = HashMap::new();
        let mut price_rows = Vec::with_capacity(rows.len());
        for (price, product) in rows {
            // A price without a live product is not purchasable.
            let Some(product) = product else { continue };
            if product.status != RecordStatus::Active {
                continue;
            }
            names.insert(product.code.clone(), product.name);
            price_rows.push(PriceRow {
                id: price.id,
                product_code: product.code,
                price_type: price.price_type.into(),
                unit_credit_value: price.unit_credit_value,
                unit_price: price.unit_price,
                effective_date_start: price.effective_date_start,
                effective_date_end: price.effective_date_end,
                published: price.published,
            });
        }

        let selected = select_effective_prices(price_rows, today);
        Ok(selected
            .into_iter()
            .map(|row| {
                let product_name = names.get(&row.product_code).cloned().unwrap_or_default();
                PostingOption {
                    product_price_id: row.id,
                    product_code: row.product_code,
                    product_name,
                    unit_credit_value: row.unit_credit_value,
                    unit_price: row.unit_price,
                    effective_date_end: row.effective_date_end,
                }
            })
            .collect())
    }
}
