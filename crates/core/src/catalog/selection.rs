//! Effective-price selection rule.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{PriceRow, PriceType};

/// Selects the publish-option prices surfaced to recruiters.
///
/// Among utilization rows that are published and effective on `today`, keeps
/// only the lowest `unit_credit_value` per product code (tie-break: first row
/// seen wins). The result is ordered by product code for stable display.
#[must_use]
pub fn select_effective_prices(rows: Vec<PriceRow>, today: NaiveDate) -> Vec<PriceRow> {
    let mut cheapest: BTreeMap<String, PriceRow> = BTreeMap::new();

    for row in rows {
        if row.price_type != PriceType::CreditUtilization
            || !row.published
            || !row.is_effective_on(today)
        {
            continue;
        }

        match cheapest.get(&row.product_code) {
            Some(existing) if existing.unit_credit_value <= row.unit_credit_value => {}
            _ => {
                cheapest.insert(row.product_code.clone(), row);
            }
        }
    }

    cheapest.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(
        id: u128,
        code: &str,
        price_type: PriceType,
        credit: Decimal,
        start: NaiveDate,
        end: NaiveDate,
        published: bool,
    ) -> PriceRow {
        PriceRow {
            id: Uuid::from_u128(id),
            product_code: code.to_string(),
            price_type,
            unit_credit_value: credit,
            unit_price: credit * dec!(2),
            effective_date_start: start,
            effective_date_end: end,
            published,
        }
    }

    fn today() -> NaiveDate {
        date(2026, 6, 15)
    }

    fn effective(id: u128, code: &str, credit: Decimal) -> PriceRow {
        row(
            id,
            code,
            PriceType::CreditUtilization,
            credit,
            date(2026, 1, 1),
            date(2026, 12, 31),
            true,
        )
    }

    #[test]
    fn test_keeps_lowest_per_code() {
        let rows = vec![
            effective(1, "STD_POST", dec!(20)),
            effective(2, "STD_POST", dec!(15)),
            effective(3, "FEATURED", dec!(50)),
        ];
        let selected = select_effective_prices(rows, today());

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].product_code, "FEATURED");
        assert_eq!(selected[0].unit_credit_value, dec!(50));
        assert_eq!(selected[1].product_code, "STD_POST");
        assert_eq!(selected[1].unit_credit_value, dec!(15));
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let rows = vec![
            effective(1, "STD_POST", dec!(15)),
            effective(2, "STD_POST", dec!(15)),
        ];
        let selected = select_effective_prices(rows, today());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, Uuid::from_u128(1));
    }

    #[test]
    fn test_filters_unpublished_and_lapsed() {
        let rows = vec![
            row(
                1,
                "STD_POST",
                PriceType::CreditUtilization,
                dec!(10),
                date(2026, 1, 1),
                date(2026, 12, 31),
                false, // unpublished
            ),
            row(
                2,
                "STD_POST",
                PriceType::CreditUtilization,
                dec!(12),
                date(2025, 1, 1),
                date(2025, 12, 31), // lapsed
                true,
            ),
            effective(3, "STD_POST", dec!(18)),
        ];
        let selected = select_effective_prices(rows, today());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, Uuid::from_u128(3));
    }

    #[test]
    fn test_bundles_never_selected() {
        let rows = vec![row(
            1,
            "BUNDLE_100",
            PriceType::CreditBundle,
            dec!(100),
            date(2026, 1, 1),
            date(2026, 12, 31),
            true,
        )];
        assert!(select_effective_prices(rows, today()).is_empty());
    }

    #[test]
    fn test_boundary_dates_are_inclusive() {
        let starts_today = row(
            1,
            "A",
            PriceType::CreditUtilization,
            dec!(10),
            today(),
            date(2026, 12, 31),
            true,
        );
        let ends_today = row(
            2,
            "B",
            PriceType::CreditUtilization,
            dec!(10),
            date(2026, 1, 1),
            today(),
            true,
        );
        let selected = select_effective_prices(vec![starts_today, ends_today], today());
        assert_eq!(selected.len(), 2);
    }
}
