//! FIFO deduction planning.
//!
//! The engine is pure: given a snapshot of an account's drainable lots it
//! computes exactly which lots to drain and by how much, oldest lot first.
//! Applying the plan (row updates, the utilization ledger entry, the account
//! decrement) is the repository's job and happens inside one database
//! transaction.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::CreditError;
use super::types::{AccountBalances, DeductionPlan, LotDraw, LotSnapshot};

/// Checks that an account can cover `amount` before any write is attempted.
///
/// # Errors
///
/// Returns `InsufficientBalance` when `amount` exceeds the derived available
/// credit, `ZeroAmount`/`NegativeAmount` for degenerate requests.
pub fn check_available(balances: AccountBalances, amount: Decimal) -> Result<(), CreditError> {
    validate_amount(amount)?;

    let available = balances.available();
    if amount > available {
        return Err(CreditError::InsufficientBalance {
            requested: amount,
            available,
        });
    }
    Ok(())
}

/// Plans a FIFO deduction of `amount` across the given lots.
///
/// Lots are drained oldest `trx_date` first; each lot is fully exhausted
/// before the next is touched. Lots with no remaining balance are skipped.
/// The caller is expected to have verified the aggregate balance with
/// [`check_available`]; a shortfall here therefore reports the lot total as
/// the available figure, which lets the repository distinguish a plain
/// insufficient balance from a ledger/aggregate mismatch.
///
/// Postconditions (tested): the sum of planned draws equals `amount` exactly,
/// and no draw leaves a lot with a negative remaining balance.
///
/// # Errors
///
/// - `ZeroAmount` / `NegativeAmount` for degenerate requests
/// - `NoAvailableCredit` when no lot has a positive remaining balance
/// - `InsufficientBalance` when the lots together cannot cover `amount`
pub fn plan_deduction(
    account_id: Uuid,
    lots: &[LotSnapshot],
    amount: Decimal,
) -> Result<DeductionPlan, CreditError> {
    validate_amount(amount)?;

    let mut ordered: Vec<&LotSnapshot> =
        lots.iter().filter(|l| l.available > Decimal::ZERO).collect();
    if ordered.is_empty() {
        return Err(CreditError::NoAvailableCredit(account_id));
    }
    ordered.sort_by_key(|l| l.trx_date);

    let mut remaining = amount;
    let mut draws = Vec::new();

    for lot in ordered {
        if remaining == Decimal::ZERO {
            break;
        }

        let draw = lot.available.min(remaining);
        let remaining_after = lot.available - draw;
        if remaining_after < Decimal::ZERO {
            // Unreachable by construction; kept as a hard invariant check.
            return Err(CreditError::NegativeBalanceInvariant {
                entity: format!("lot {}", lot.id),
                value: remaining_after,
            });
        }

        draws.push(LotDraw {
            lot_id: lot.id,
            amount: draw,
            remaining_after,
        });
        remaining -= draw;
    }

    if remaining > Decimal::ZERO {
        let covered = amount - remaining;
        return Err(CreditError::InsufficientBalance {
            requested: amount,
            available: covered,
        });
    }

    Ok(DeductionPlan { amount, draws })
}

/// Applies a deduction to the aggregate account balance.
///
/// # Errors
///
/// Returns `NegativeBalanceInvariant` if the result would be negative; the
/// enclosing transaction must be aborted.
pub fn apply_to_balance(
    account_id: Uuid,
    balance: Decimal,
    amount: Decimal,
) -> Result<Decimal, CreditError> {
    let updated = balance - amount;
    if updated < Decimal::ZERO {
        return Err(CreditError::NegativeBalanceInvariant {
            entity: format!("account {account_id}"),
            value: updated,
        });
    }
    Ok(updated)
}

fn validate_amount(amount: Decimal) -> Result<(), CreditError> {
    if amount == Decimal::ZERO {
        return Err(CreditError::ZeroAmount);
    }
    if amount < Decimal::ZERO {
        return Err(CreditError::NegativeAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    fn lot(id: u128, d: u32, available: Decimal) -> LotSnapshot {
        LotSnapshot {
            id: Uuid::from_u128(id),
            trx_date: day(d),
            available,
        }
    }

    #[test]
    fn test_single_lot_partial_drain() {
        let lots = vec![lot(1, 1, dec!(50))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(20)).unwrap();

        assert_eq!(plan.draws.len(), 1);
        assert_eq!(plan.draws[0].amount, dec!(20));
        assert_eq!(plan.draws[0].remaining_after, dec!(30));
        assert_eq!(plan.total_drawn(), dec!(20));
    }

    #[test]
    fn test_fifo_oldest_drained_first() {
        // L1 (day 1, 30) and L2 (day 2, 50); deduct 40 leaves L1=0, L2=40.
        let lots = vec![lot(2, 2, dec!(50)), lot(1, 1, dec!(30))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(40)).unwrap();

        assert_eq!(plan.draws.len(), 2);
        assert_eq!(plan.draws[0].lot_id, Uuid::from_u128(1));
        assert_eq!(plan.draws[0].amount, dec!(30));
        assert_eq!(plan.draws[0].remaining_after, Decimal::ZERO);
        assert_eq!(plan.draws[1].lot_id, Uuid::from_u128(2));
        assert_eq!(plan.draws[1].amount, dec!(10));
        assert_eq!(plan.draws[1].remaining_after, dec!(40));
    }

    #[test]
    fn test_two_topups_deduct_sixty() {
        // TopUp 50 on day 1, TopUp 80 on day 2; deduct 60 -> lot1 0, lot2 70.
        let lots = vec![lot(1, 1, dec!(50)), lot(2, 2, dec!(80))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(60)).unwrap();

        assert_eq!(plan.draws[0].remaining_after, Decimal::ZERO);
        assert_eq!(plan.draws[1].remaining_after, dec!(70));
        assert_eq!(plan.total_drawn(), dec!(60));
    }

    #[test]
    fn test_later_lots_untouched_once_covered() {
        let lots = vec![lot(1, 1, dec!(100)), lot(2, 2, dec!(100)), lot(3, 3, dec!(100))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(100)).unwrap();

        assert_eq!(plan.draws.len(), 1);
        assert_eq!(plan.draws[0].lot_id, Uuid::from_u128(1));
    }

    #[test]
    fn test_exhausted_lots_skipped() {
        let lots = vec![lot(1, 1, Decimal::ZERO), lot(2, 2, dec!(50))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(10)).unwrap();

        assert_eq!(plan.draws.len(), 1);
        assert_eq!(plan.draws[0].lot_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_no_lots_is_integrity_anomaly() {
        let account_id = Uuid::from_u128(99);
        let result = plan_deduction(account_id, &[], dec!(10));
        assert!(matches!(
            result,
            Err(CreditError::NoAvailableCredit(id)) if id == account_id
        ));

        let drained = vec![lot(1, 1, Decimal::ZERO)];
        let result = plan_deduction(account_id, &drained, dec!(10));
        assert!(matches!(result, Err(CreditError::NoAvailableCredit(_))));
    }

    #[test]
    fn test_lots_cannot_cover_amount() {
        let lots = vec![lot(1, 1, dec!(30)), lot(2, 2, dec!(20))];
        let result = plan_deduction(Uuid::nil(), &lots, dec!(60));
        assert!(matches!(
            result,
            Err(CreditError::InsufficientBalance {
                requested,
                available,
            }) if requested == dec!(60) && available == dec!(50)
        ));
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        let lots = vec![lot(1, 1, dec!(50))];
        assert!(matches!(
            plan_deduction(Uuid::nil(), &lots, Decimal::ZERO),
            Err(CreditError::ZeroAmount)
        ));
        assert!(matches!(
            plan_deduction(Uuid::nil(), &lots, dec!(-5)),
            Err(CreditError::NegativeAmount)
        ));
    }

    #[test]
    fn test_check_available_insufficient() {
        // Balance 100, deduct 120 -> fails; nothing to roll back.
        let balances = AccountBalances {
            balance: dec!(100),
            locked: Decimal::ZERO,
        };
        let result = check_available(balances, dec!(120));
        assert!(matches!(
            result,
            Err(CreditError::InsufficientBalance {
                requested,
                available,
            }) if requested == dec!(120) && available == dec!(100)
        ));
    }

    #[test]
    fn test_check_available_respects_locked() {
        let balances = AccountBalances {
            balance: dec!(100),
            locked: dec!(40),
        };
        assert!(check_available(balances, dec!(60)).is_ok());
        assert!(check_available(balances, dec!(61)).is_err());
    }

    #[test]
    fn test_apply_to_balance() {
        let updated = apply_to_balance(Uuid::nil(), dec!(100), dec!(60)).unwrap();
        assert_eq!(updated, dec!(40));
    }

    #[test]
    fn test_apply_to_balance_negative_is_fatal() {
        let result = apply_to_balance(Uuid::nil(), dec!(50), dec!(60));
        assert!(matches!(
            result,
            Err(CreditError::NegativeBalanceInvariant { .. })
        ));
    }

    #[test]
    fn test_equal_trx_dates_drain_deterministically() {
        // Same date: stable sort keeps input order, both lots drained in turn.
        let lots = vec![lot(1, 1, dec!(10)), lot(2, 1, dec!(10))];
        let plan = plan_deduction(Uuid::nil(), &lots, dec!(15)).unwrap();
        assert_eq!(plan.draws[0].lot_id, Uuid::from_u128(1));
        assert_eq!(plan.draws[1].lot_id, Uuid::from_u128(2));
        assert_eq!(plan.draws[1].remaining_after, dec!(5));
    }
}
