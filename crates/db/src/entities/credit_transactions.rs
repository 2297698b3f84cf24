//! `SeaORM` Entity for the credit_transactions (ledger lot) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{RecordStatus, TrxType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub trx_type: TrxType,
    pub trx_date: DateTimeWithTimeZone,
    /// Signed movement: positive for inflows, negative for utilization.
    pub total_credit: Decimal,
    /// Remaining drawable balance of an inflow lot; meaningless for
    /// utilization records.
    pub total_credit_available: Decimal,
    pub product_id: Option<Uuid>,
    pub product_price_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    /// Invoice number stamped from the document sequence.
    pub document_number: Option<i64>,
    pub status: RecordStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_accounts::Entity",
        from = "Column::AccountId",
        to = "super::credit_accounts::Column::Id"
    )]
    CreditAccounts,
    #[sea_orm(
        belongs_to = "super::product_prices::Entity",
        from = "Column::ProductPriceId",
        to = "super::product_prices::Column::Id"
    )]
    ProductPrices,
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Jobs,
}

impl Related<super::credit_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditAccounts.def()
    }
}

impl Related<super::product_prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPrices.def()
    }
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
