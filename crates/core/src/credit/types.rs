//! Credit domain types for deduction planning and balance tracking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ledger movement classification.
///
/// Inflows carry a positive `total_credit`; utilization records are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrxType {
    /// Purchased credit bundle.
    TopUp,
    /// Refunded credit.
    Refund,
    /// Credit granted free of charge (promotions, goodwill).
    Complimentary,
    /// Credit consumed by publishing an offline job.
    Utilization,
    /// Credit expired by the scheduled expiry process.
    Expired,
}

impl TrxType {
    /// Returns true if lots of this type are drainable by the deduction engine.
    ///
    /// Only purchased and complimentary lots participate in the FIFO drain;
    /// refunds and expiries never do.
    #[must_use]
    pub fn is_drainable(self) -> bool {
        matches!(self, Self::TopUp | Self::Complimentary)
    }
}

/// Credit account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is usable.
    Active,
    /// Account lapsed; no further deductions.
    Expired,
    /// Account closed by an administrator.
    Terminated,
    /// Soft-deleted.
    Deleted,
}

impl AccountStatus {
    /// Returns true if the account can be charged.
    #[must_use]
    pub fn allows_deduction(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Running balances of a credit account.
///
/// `locked` is reserved for a future hold-on-offer flow and is always zero on
/// every mutating path in this scope; it still participates in `available()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalances {
    /// Aggregate balance across all lots.
    pub balance: Decimal,
    /// Reserved (locked) credit.
    pub locked: Decimal,
}

impl AccountBalances {
    /// The spendable portion of the balance. Derived, never stored.
    #[must_use]
    pub fn available(&self) -> Decimal {
        self.balance - self.locked
    }
}

/// Snapshot of one inflow lot, as read under lock at deduction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotSnapshot {
    /// Ledger row ID of the lot.
    pub id: Uuid,
    /// Movement date; the FIFO drain orders by this, oldest first.
    pub trx_date: DateTime<Utc>,
    /// Remaining drawable balance of the lot.
    pub available: Decimal,
}

/// One planned decrement against a single lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotDraw {
    /// The lot being drained.
    pub lot_id: Uuid,
    /// Amount to subtract from the lot's remaining balance.
    pub amount: Decimal,
    /// The lot's remaining balance after this draw.
    pub remaining_after: Decimal,
}

/// A complete deduction plan: which lots to drain and by how much.
///
/// Produced by [`crate::credit::plan_deduction`]; the repository applies it
/// row by row inside the enclosing database transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionPlan {
    /// The total amount being deducted.
    pub amount: Decimal,
    /// Per-lot decrements, in drain order (oldest lot first).
    pub draws: Vec<LotDraw>,
}

impl DeductionPlan {
    /// Sum of all planned lot decrements.
    ///
    /// Always equals `amount` for a plan returned by the engine.
    #[must_use]
    pub fn total_drawn(&self) -> Decimal {
        self.draws.iter().map(|d| d.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_drainable_types() {
        assert!(TrxType::TopUp.is_drainable());
        assert!(TrxType::Complimentary.is_drainable());
        assert!(!TrxType::Refund.is_drainable());
        assert!(!TrxType::Utilization.is_drainable());
        assert!(!TrxType::Expired.is_drainable());
    }

    #[test]
    fn test_account_status_deduction() {
        assert!(AccountStatus::Active.allows_deduction());
        assert!(!AccountStatus::Expired.allows_deduction());
        assert!(!AccountStatus::Terminated.allows_deduction());
        assert!(!AccountStatus::Deleted.allows_deduction());
    }

    #[test]
    fn test_available_subtracts_locked() {
        let balances = AccountBalances {
            balance: dec!(100),
            locked: dec!(30),
        };
        assert_eq!(balances.available(), dec!(70));
    }

    #[test]
    fn test_available_with_zero_locked() {
        let balances = AccountBalances {
            balance: dec!(100),
            locked: Decimal::ZERO,
        };
        assert_eq!(balances.available(), dec!(100));
    }
}
