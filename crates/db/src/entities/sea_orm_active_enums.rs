//! `SeaORM` active enums mapping to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use hireboard_core::catalog::PriceType as CorePriceType;
use hireboard_core::credit::{AccountStatus as CoreAccountStatus, TrxType as CoreTrxType};
use hireboard_core::job::{JobStatus as CoreJobStatus, PublishInd as CorePublishInd};

/// Ledger movement type (`trx_type`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "trx_type")]
#[serde(rename_all = "snake_case")]
pub enum TrxType {
    /// Purchased credit bundle.
    #[sea_orm(string_value = "top_up")]
    TopUp,
    /// Refunded credit.
    #[sea_orm(string_value = "refund")]
    Refund,
    /// Credit granted free of charge.
    #[sea_orm(string_value = "complimentary")]
    Complimentary,
    /// Credit consumed by a publish.
    #[sea_orm(string_value = "utilization")]
    Utilization,
    /// Credit expired by scheduled cleanup.
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// Credit account status (`account_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_status")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is usable.
    #[sea_orm(string_value = "active")]
    Active,
    /// Account lapsed.
    #[sea_orm(string_value = "expired")]
    Expired,
    /// Account closed by an administrator.
    #[sea_orm(string_value = "terminated")]
    Terminated,
    /// Soft-deleted.
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// Active/deleted flag shared by jobs, lots, snapshots, and catalog rows
/// (`record_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "record_status")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Live record.
    #[sea_orm(string_value = "active")]
    Active,
    /// Soft-deleted record.
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// Posting wrapper status (`wrapper_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "wrapper_status")]
#[serde(rename_all = "lowercase")]
pub enum WrapperStatus {
    /// Awaiting first publish.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Published at least once.
    #[sea_orm(string_value = "active")]
    Active,
    /// Soft-deleted.
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// Publication indicator (`publish_ind`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "publish_ind")]
#[serde(rename_all = "lowercase")]
pub enum PublishInd {
    /// Never published.
    #[sea_orm(string_value = "new")]
    New,
    /// Currently live.
    #[sea_orm(string_value = "published")]
    Published,
    /// Taken down.
    #[sea_orm(string_value = "unpublished")]
    Unpublished,
    /// Live again after an unpublish.
    #[sea_orm(string_value = "republished")]
    Republished,
}

/// ProductPrice classification (`price_type`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "price_type")]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Purchasable credit bundle.
    #[sea_orm(string_value = "credit_bundle")]
    CreditBundle,
    /// Credit cost of publishing.
    #[sea_orm(string_value = "credit_utilization")]
    CreditUtilization,
}

// ============================================================
// Conversions to/from the core domain enums
// ============================================================

impl From<TrxType> for CoreTrxType {
    fn from(value: TrxType) -> Self {
        match value {
            TrxType::TopUp => Self::TopUp,
            TrxType::Refund => Self::Refund,
            TrxType::Complimentary => Self::Complimentary,
            TrxType::Utilization => Self::Utilization,
            TrxType::Expired => Self::Expired,
        }
    }
}

impl From<CoreTrxType> for TrxType {
    fn from(value: CoreTrxType) -> Self {
        match value {
            CoreTrxType::TopUp => Self::TopUp,
            CoreTrxType::Refund => Self::Refund,
            CoreTrxType::Complimentary => Self::Complimentary,
            CoreTrxType::Utilization => Self::Utilization,
            CoreTrxType::Expired => Self::Expired,
        }
    }
}

impl From<AccountStatus> for CoreAccountStatus {
    fn from(value: AccountStatus) -> Self {
        match value {
            AccountStatus::Active => Self::Active,
            AccountStatus::Expired => Self::Expired,
            AccountStatus::Terminated => Self::Terminated,
            AccountStatus::Deleted => Self::Deleted,
        }
    }
}

impl From<WrapperStatus> for CoreJobStatus {
    fn from(value: WrapperStatus) -> Self {
        match value {
            WrapperStatus::Pending => Self::Pending,
            WrapperStatus::Active => Self::Active,
            WrapperStatus::Deleted => Self::Deleted,
        }
    }
}

impl From<CoreJobStatus> for WrapperStatus {
    fn from(value: CoreJobStatus) -> Self {
        match value {
            CoreJobStatus::Pending => Self::Pending,
            CoreJobStatus::Active => Self::Active,
            CoreJobStatus::Deleted => Self::Deleted,
        }
    }
}

impl From<PublishInd> for CorePublishInd {
    fn from(value: PublishInd) -> Self {
        match value {
            PublishInd::New => Self::New,
            PublishInd::Published => Self::Published,
            PublishInd::Unpublished => Self::Unpublished,
            PublishInd::Republished => Self::Republished,
        }
    }
}

impl From<CorePublishInd> for PublishInd {
    fn from(value: CorePublishInd) -> Self {
        match value {
            CorePublishInd::New => Self::New,
            CorePublishInd::Published => Self::Published,
            CorePublishInd::Unpublished => Self::Unpublished,
            CorePublishInd::Republished => Self::Republished,
        }
    }
}

impl From<PriceType> for CorePriceType {
    fn from(value: PriceType) -> Self {
        match value {
            PriceType::CreditBundle => Self::CreditBundle,
            PriceType::CreditUtilization => Self::CreditUtilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trx_type_round_trip() {
        for db_value in [
            TrxType::TopUp,
            TrxType::Refund,
            TrxType::Complimentary,
            TrxType::Utilization,
            TrxType::Expired,
        ] {
            let core: CoreTrxType = db_value.clone().into();
            let back: TrxType = core.into();
            assert_eq!(back, db_value);
        }
    }

    #[test]
    fn test_workflow_state_mapping() {
        let status: CoreJobStatus = WrapperStatus::Pending.into();
        assert_eq!(status, CoreJobStatus::Pending);
        let ind: CorePublishInd = PublishInd::Republished.into();
        assert_eq!(ind, CorePublishInd::Republished);
    }
}
