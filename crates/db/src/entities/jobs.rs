//! `SeaORM` Entity for the jobs (posting content) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub employer_name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub publish_start: Date,
    pub publish_end: Date,
    pub status: RecordStatus,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::published_jobs::Entity")]
    PublishedJobs,
}

impl Related<super::published_jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PublishedJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
