//! Property-based tests for the FIFO deduction engine.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::engine::plan_deduction;
use super::error::CreditError;
use super::types::LotSnapshot;

/// Strategy for generating a set of lots with positive available balances.
fn lots_strategy() -> impl Strategy<Value = Vec<LotSnapshot>> {
    prop::collection::vec((1i64..100_000i64, 0u32..3650u32), 1..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (cents, day_offset))| LotSnapshot {
                id: Uuid::from_u128(i as u128 + 1),
                trx_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i64::from(day_offset)),
                available: Decimal::new(cents, 2),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The sum of planned draws always equals the requested amount exactly.
    #[test]
    fn prop_draws_conserve_amount(lots in lots_strategy(), numerator in 1u32..100u32) {
        let total: Decimal = lots.iter().map(|l| l.available).sum();
        let amount = total * Decimal::from(numerator) / Decimal::from(100u32);
        prop_assume!(amount > Decimal::ZERO);

        let plan = plan_deduction(Uuid::nil(), &lots, amount).unwrap();
        prop_assert_eq!(plan.total_drawn(), amount);
    }

    /// No draw ever leaves a lot with a negative remaining balance, and no
    /// draw exceeds the lot's snapshot balance.
    #[test]
    fn prop_no_negative_remaining(lots in lots_strategy(), numerator in 1u32..=100u32) {
        let total: Decimal = lots.iter().map(|l| l.available).sum();
        let amount = total * Decimal::from(numerator) / Decimal::from(100u32);
        prop_assume!(amount > Decimal::ZERO);

        let plan = plan_deduction(Uuid::nil(), &lots, amount).unwrap();
        for draw in &plan.draws {
            let snapshot = lots.iter().find(|l| l.id == draw.lot_id).unwrap();
            prop_assert!(draw.remaining_after >= Decimal::ZERO);
            prop_assert!(draw.amount <= snapshot.available);
            prop_assert_eq!(draw.remaining_after, snapshot.available - draw.amount);
        }
    }

    /// FIFO shape: every draw except the last fully exhausts its lot, and the
    /// drained lots form the oldest prefix of the date-ordered lot list.
    #[test]
    fn prop_fifo_prefix(lots in lots_strategy(), numerator in 1u32..100u32) {
        let total: Decimal = lots.iter().map(|l| l.available).sum();
        let amount = total * Decimal::from(numerator) / Decimal::from(100u32);
        prop_assume!(amount > Decimal::ZERO);

        let plan = plan_deduction(Uuid::nil(), &lots, amount).unwrap();

        for draw in &plan.draws[..plan.draws.len() - 1] {
            prop_assert_eq!(draw.remaining_after, Decimal::ZERO);
        }

        let mut ordered: Vec<&LotSnapshot> = lots.iter().collect();
        ordered.sort_by_key(|l| l.trx_date);
        for (draw, lot) in plan.draws.iter().zip(ordered.iter()) {
            prop_assert_eq!(draw.lot_id, lot.id);
        }
    }

    /// Requesting more than the lots can cover fails and reports the covered
    /// portion; it never returns a partial plan.
    #[test]
    fn prop_overdraw_fails(lots in lots_strategy()) {
        let total: Decimal = lots.iter().map(|l| l.available).sum();
        let amount = total + Decimal::ONE;

        let result = plan_deduction(Uuid::nil(), &lots, amount);
        let overdraw_reported = matches!(
            result,
            Err(CreditError::InsufficientBalance { available, .. }) if available == total
        );
        prop_assert!(overdraw_reported);
    }
}
