//! Credit account and ledger persistence.
//!
//! The deduction path composes the pure planning functions from
//! `hireboard_core::credit` with row-locked reads and writes. All mutations
//! for a single deduction happen inside the caller's transaction, so a
//! failure at any step leaves the ledger untouched.

use chrono::Utc;
use hireboard_core::credit::{
    apply_to_balance, check_available, plan_deduction, AccountBalances, AccountStatus,
    CreditError, LotSnapshot,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, RuntimeErr, Set,
};
use sqlx::error::DatabaseError as _;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::{RecordStatus, TrxType};
use crate::entities::{credit_accounts, credit_transactions};

/// Error types for credit store operations.
#[derive(Debug, thiserror::Error)]
pub enum CreditStoreError {
    /// Domain-level credit failure (insufficient balance, inactive account,
    /// invariant violations).
    #[error(transparent)]
    Credit(#[from] CreditError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[source] DbErr),
}

/// SQLSTATE codes Postgres raises when one of two colliding transactions
/// loses: serialization failure, deadlock, lock not available.
const LOCK_CONFLICT_SQLSTATES: [&str; 3] = ["40001", "40P01", "55P03"];

fn is_lock_conflict_code(code: &str) -> bool {
    LOCK_CONFLICT_SQLSTATES.contains(&code)
}

fn sqlstate_of(err: &DbErr) -> Option<String> {
    let (DbErr::Conn(RuntimeErr::SqlxError(source))
    | DbErr::Exec(RuntimeErr::SqlxError(source))
    | DbErr::Query(RuntimeErr::SqlxError(source))) = err
    else {
        return None;
    };
    source
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned())
}

impl From<DbErr> for CreditStoreError {
    fn from(err: DbErr) -> Self {
        match sqlstate_of(&err) {
            Some(code) if is_lock_conflict_code(&code) => {
                Self::Credit(CreditError::ConcurrentModification)
            }
            _ => Self::Database(err),
        }
    }
}

/// Input for a single credit deduction.
#[derive(Debug, Clone)]
pub struct DeductionInput {
    /// Account to deduct from.
    pub account_id: Uuid,
    /// Amount of credits to deduct. Must be positive.
    pub amount: Decimal,
    /// Job the deduction pays for.
    pub job_id: Uuid,
    /// Product being purchased.
    pub product_id: Option<Uuid>,
    /// Price row the cost was read from.
    pub product_price_id: Uuid,
    /// Pre-allocated invoice number for the utilization entry.
    pub document_number: Option<i64>,
}

/// Repository for credit accounts and their transaction ledger.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    db: DatabaseConnection,
}

impl CreditRepository {
    /// Creates a new credit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches an account by id.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::AccountNotFound` if no account exists, or a
    /// database error.
    pub async fn get_account(
        &self,
        account_id: Uuid,
    ) -> Result<credit_accounts::Model, CreditStoreError> {
        credit_accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CreditError::AccountNotFound(account_id).into())
    }

    /// Fetches the account belonging to a recruiter, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn find_account_by_recruiter(
        &self,
        recruiter_id: Uuid,
    ) -> Result<Option<credit_accounts::Model>, CreditStoreError> {
        Ok(credit_accounts::Entity::find()
            .filter(credit_accounts::Column::RecruiterId.eq(recruiter_id))
            .one(&self.db)
            .await?)
    }

    /// Lists the ledger entries for an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_ledger(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<credit_transactions::Model>, CreditStoreError> {
        Ok(credit_transactions::Entity::find()
            .filter(credit_transactions::Column::AccountId.eq(account_id))
            .filter(credit_transactions::Column::Status.eq(RecordStatus::Active))
            .order_by_desc(credit_transactions::Column::TrxDate)
            .all(&self.db)
            .await?)
    }

    /// Deducts `input.amount` credits from an account inside the caller's
    /// transaction, draining credit lots oldest first.
    ///
    /// Steps, in order:
    /// 1. Lock the account row and verify its status permits deduction.
    /// 2. Check available balance; an insufficient balance aborts before
    ///    any write.
    /// 3. Insert the utilization ledger entry.
    /// 4. Lock the drainable lots, plan the FIFO drain, and write back each
    ///    lot's reduced availability.
    /// 5. Update the account balance and last transaction date.
    ///
    /// Returns the inserted utilization entry.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InsufficientBalance` when the available balance
    /// does not cover the amount, `CreditError::AccountInactive` for
    /// suspended or closed accounts, invariant errors when the ledger is
    /// corrupt, or a database error.
    pub async fn deduct_in_txn(
        txn: &DatabaseTransaction,
        input: DeductionInput,
    ) -> Result<credit_transactions::Model, CreditStoreError> {
        let account = credit_accounts::Entity::find_by_id(input.account_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(CreditError::AccountNotFound(input.account_id))?;

        let status: AccountStatus = account.status.clone().into();
        if !status.allows_deduction() {
            return Err(CreditError::AccountInactive(account.id).into());
        }

        let balances = AccountBalances {
            balance: account.credit_balance,
            locked: account.credit_locked,
        };
        check_available(balances, input.amount)?;

        let now = Utc::now();
        let now_tz = now.into();

        let utilization = credit_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account.id),
            trx_type: Set(TrxType::Utilization),
            trx_date: Set(now_tz),
            total_credit: Set(-input.amount),
            total_credit_available: Set(Decimal::ZERO),
            product_id: Set(input.product_id),
            product_price_id: Set(Some(input.product_price_id)),
            job_id: Set(Some(input.job_id)),
            document_number: Set(input.document_number),
            status: Set(RecordStatus::Active),
            created_at: Set(now_tz),
            updated_at: Set(now_tz),
        }
        .insert(txn)
        .await?;

        let lots = credit_transactions::Entity::find()
            .filter(credit_transactions::Column::AccountId.eq(account.id))
            .filter(
                credit_transactions::Column::TrxType
                    .is_in([TrxType::TopUp, TrxType::Complimentary]),
            )
            .filter(credit_transactions::Column::TotalCreditAvailable.gt(Decimal::ZERO))
            .filter(credit_transactions::Column::Status.eq(RecordStatus::Active))
            .order_by_asc(credit_transactions::Column::TrxDate)
            .lock_exclusive()
            .all(txn)
            .await?;

        let snapshots: Vec<LotSnapshot> = lots
            .iter()
            .map(|lot| LotSnapshot {
                id: lot.id,
                trx_date: lot.trx_date.with_timezone(&Utc),
                available: lot.total_credit_available,
            })
            .collect();

        let plan = plan_deduction(account.id, &snapshots, input.amount)
            .map_err(|err| escalate_planning_shortfall(err, account.id))?;
        debug!(
            account_id = %account.id,
            amount = %input.amount,
            lots_drawn = plan.draws.len(),
            "planned credit deduction"
        );

        for draw in &plan.draws {
            let lot = lots
                .iter()
                .find(|l| l.id == draw.lot_id)
                .cloned()
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("credit lot {} vanished mid-plan", draw.lot_id))
                })?;
            let mut active: credit_transactions::ActiveModel = lot.into();
            active.total_credit_available = Set(draw.remaining_after);
            active.updated_at = Set(now_tz);
            active.update(txn).await?;
        }

        let new_balance = apply_to_balance(account.id, account.credit_balance, input.amount)?;
        let account_id = account.id;
        let mut active: credit_accounts::ActiveModel = account.into();
        active.credit_balance = Set(new_balance);
        active.last_trx_date = Set(Some(now_tz));
        active.updated_at = Set(now_tz);
        active.update(txn).await?;

        info!(
            account_id = %account_id,
            trx_id = %utilization.id,
            amount = %input.amount,
            new_balance = %new_balance,
            "credits deducted"
        );

        Ok(utilization)
    }
}

/// Reclassifies a planning shortfall that surfaces after the aggregate
/// balance check has already passed under the account lock.
///
/// At that point the inflow lots no longer cover the account balance, which
/// is ledger corruption, not a caller asking for more than they have.
fn escalate_planning_shortfall(err: CreditError, account_id: Uuid) -> CreditError {
    match err {
        CreditError::InsufficientBalance { .. } => CreditError::NoAvailableCredit(account_id),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_lot_shortfall_after_balance_check_is_invariant_violation() {
        let account_id = Uuid::new_v4();
        let lots = vec![LotSnapshot {
            id: Uuid::new_v4(),
            trx_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            available: dec!(50),
        }];

        // Aggregate balance says 100, so the pre-write gate passes.
        let balances = AccountBalances {
            balance: dec!(100),
            locked: dec!(0),
        };
        check_available(balances, dec!(60)).unwrap();

        // The lots only cover 50; the planner reports a shortfall.
        let err = plan_deduction(account_id, &lots, dec!(60)).unwrap_err();
        assert!(matches!(err, CreditError::InsufficientBalance { .. }));
        assert!(!err.is_invariant_violation());

        // Post-check, that shortfall means the lots disagree with the
        // aggregate balance and must be treated as corruption.
        let escalated = escalate_planning_shortfall(err, account_id);
        assert!(matches!(
            escalated,
            CreditError::NoAvailableCredit(id) if id == account_id
        ));
        assert!(escalated.is_invariant_violation());
        assert_eq!(escalated.error_code(), "NO_AVAILABLE_CREDIT");
        assert_eq!(escalated.http_status_code(), 500);
    }

    #[test]
    fn test_escalation_leaves_other_errors_alone() {
        let account_id = Uuid::new_v4();
        let err = escalate_planning_shortfall(CreditError::ZeroAmount, account_id);
        assert!(matches!(err, CreditError::ZeroAmount));

        let err = escalate_planning_shortfall(
            CreditError::NoAvailableCredit(account_id),
            account_id,
        );
        assert!(matches!(err, CreditError::NoAvailableCredit(_)));
    }

    #[test]
    fn test_lock_conflict_codes() {
        assert!(is_lock_conflict_code("40001"));
        assert!(is_lock_conflict_code("40P01"));
        assert!(is_lock_conflict_code("55P03"));
        assert!(!is_lock_conflict_code("23505"));
        assert!(!is_lock_conflict_code(""));
    }

    #[test]
    fn test_plain_db_errors_stay_database_errors() {
        let err: CreditStoreError = DbErr::Custom("boom".to_owned()).into();
        assert!(matches!(err, CreditStoreError::Database(_)));

        let err: CreditStoreError =
            DbErr::RecordNotFound("credit lot".to_owned()).into();
        assert!(matches!(err, CreditStoreError::Database(_)));
        assert!(sqlstate_of(&DbErr::Custom("boom".to_owned())).is_none());
    }
}
