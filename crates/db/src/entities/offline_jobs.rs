//! `SeaORM` Entity for the offline_jobs wrapper table.
//!
//! Offline jobs are recruiter posts paid for with posting credit; they carry
//! the chosen publish-option price and, once published, the ledger entry
//! that paid for it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PublishInd, WrapperStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "offline_jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub recruiter_id: Uuid,
    pub product_price_id: Uuid,
    /// Set by the publish transition; links to the utilization ledger entry.
    pub credit_trx_id: Option<Uuid>,
    pub status: WrapperStatus,
    pub publish_ind: PublishInd,
    pub last_publish_date: Option<DateTimeWithTimeZone>,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Jobs,
    #[sea_orm(
        belongs_to = "super::product_prices::Entity",
        from = "Column::ProductPriceId",
        to = "super::product_prices::Column::Id"
    )]
    ProductPrices,
    #[sea_orm(
        belongs_to = "super::credit_transactions::Entity",
        from = "Column::CreditTrxId",
        to = "super::credit_transactions::Column::Id"
    )]
    CreditTransactions,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl Related<super::product_prices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductPrices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
