//! Marginal bracket resolution.
//!
//! Every bracket applies the same closed-form formula,
//! `rate * (income - min_income) + base_tax`, so the schedule data only
//! carries coefficients. No rounding is applied to the resulting tax.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{BracketBreakdown, BracketInfo, BracketLadder, TaxBracket};

/// Finds the bracket whose inclusive range contains `taxable_income`.
///
/// At a shared boundary the lower bracket wins; both give the same tax. An
/// income no bracket contains falls back to the top bracket.
pub fn find_bracket(
    ladder: &BracketLadder,
    taxable_income: Decimal,
) -> &TaxBracket {
    ladder
        .brackets()
        .iter()
        .find(|bracket| bracket.contains(taxable_income))
        .unwrap_or_else(|| ladder.top())
}

/// Total tax owed at `taxable_income` using the given bracket's formula.
pub fn bracket_tax(
    bracket: &TaxBracket,
    taxable_income: Decimal,
) -> Decimal {
    bracket.tax_rate * (taxable_income - bracket.min_income) + bracket.base_tax
}

/// Resolves the bracket and applies its formula.
pub fn calculate_tax(
    ladder: &BracketLadder,
    taxable_income: Decimal,
) -> Decimal {
    bracket_tax(find_bracket(ladder, taxable_income), taxable_income)
}

fn rate_percent(rate: Decimal) -> u32 {
    (rate * Decimal::ONE_HUNDRED).round().to_u32().unwrap_or(0)
}

pub fn bracket_info(bracket: &TaxBracket) -> BracketInfo {
    let percent = rate_percent(bracket.tax_rate);
    BracketInfo {
        rate: bracket.tax_rate,
        rate_percent: percent,
        rate_name: format!("{percent}%"),
    }
}

/// Splits `taxable_income` across the schedule, stopping at the bracket that
/// contains it.
pub fn bracket_breakdown(
    ladder: &BracketLadder,
    taxable_income: Decimal,
) -> Vec<BracketBreakdown> {
    let mut breakdown = Vec::new();

    for bracket in ladder.brackets() {
        let filled = bracket.max_income.filter(|max| taxable_income > *max);
        let (income_in_bracket, is_active) = match filled {
            Some(max) => (max - bracket.min_income, false),
            None => (taxable_income - bracket.min_income, true),
        };

        breakdown.push(BracketBreakdown {
            rate: bracket.tax_rate,
            rate_percent: rate_percent(bracket.tax_rate),
            min_income: bracket.min_income,
            max_income: bracket.max_income,
            income_in_bracket,
            tax_in_bracket: income_in_bracket * bracket.tax_rate,
            is_active,
        });

        if is_active {
            break;
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FilingStatus;
    use crate::test_support::params_2025;

    fn single_ladder() -> BracketLadder {
        params_2025().brackets(FilingStatus::Single).clone()
    }

    // =========================================================================
    // find_bracket tests
    // =========================================================================

    #[test]
    fn find_bracket_selects_containing_bracket() {
        let ladder = single_ladder();

        let bracket = find_bracket(&ladder, dec!(45000));

        assert_eq!(bracket.tax_rate, dec!(0.12));
        assert_eq!(bracket.min_income, dec!(11925));
    }

    #[test]
    fn find_bracket_prefers_lower_bracket_at_boundary() {
        let ladder = single_ladder();

        let bracket = find_bracket(&ladder, dec!(48475));

        assert_eq!(bracket.tax_rate, dec!(0.12));
    }

    #[test]
    fn find_bracket_handles_fractional_income_between_whole_dollars() {
        let ladder = single_ladder();

        let bracket = find_bracket(&ladder, dec!(11925.50));

        assert_eq!(bracket.tax_rate, dec!(0.12));
    }

    #[test]
    fn find_bracket_returns_top_bracket_for_very_high_income() {
        let ladder = single_ladder();

        let bracket = find_bracket(&ladder, dec!(50000000));

        assert_eq!(bracket.tax_rate, dec!(0.37));
    }

    #[test]
    fn find_bracket_returns_first_bracket_for_zero_income() {
        let ladder = single_ladder();

        let bracket = find_bracket(&ladder, dec!(0));

        assert_eq!(bracket.tax_rate, dec!(0.10));
    }

    // =========================================================================
    // calculate_tax tests
    // =========================================================================

    #[test]
    fn calculate_tax_in_twelve_percent_bracket() {
        let ladder = single_ladder();

        let tax = calculate_tax(&ladder, dec!(45000));

        assert_eq!(tax, dec!(5161.50));
    }

    #[test]
    fn calculate_tax_keeps_fractional_cents() {
        let ladder = single_ladder();

        let tax = calculate_tax(&ladder, dec!(50000.05));

        // 5578.50 + 1525.05 * 0.22
        assert_eq!(tax, dec!(5914.011));
    }

    #[test]
    fn calculate_tax_is_zero_at_zero_income() {
        let ladder = single_ladder();

        assert_eq!(calculate_tax(&ladder, dec!(0)), dec!(0));
    }

    #[test]
    fn calculate_tax_in_top_bracket() {
        let ladder = single_ladder();

        let tax = calculate_tax(&ladder, dec!(700000));

        // 188769.75 + 73650 * 0.37
        assert_eq!(tax, dec!(216020.25));
    }

    // =========================================================================
    // bracket_info tests
    // =========================================================================

    #[test]
    fn bracket_info_reports_whole_percent() {
        let ladder = single_ladder();

        let info = bracket_info(find_bracket(&ladder, dec!(90000)));

        assert_eq!(
            info,
            BracketInfo {
                rate: dec!(0.22),
                rate_percent: 22,
                rate_name: "22%".to_string(),
            }
        );
    }

    // =========================================================================
    // bracket_breakdown tests
    // =========================================================================

    #[test]
    fn bracket_breakdown_stops_at_active_bracket() {
        let ladder = single_ladder();

        let breakdown = bracket_breakdown(&ladder, dec!(60000));

        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].income_in_bracket, dec!(11925));
        assert_eq!(breakdown[0].tax_in_bracket, dec!(1192.50));
        assert!(!breakdown[0].is_active);
        assert_eq!(breakdown[1].income_in_bracket, dec!(36550));
        assert_eq!(breakdown[2].income_in_bracket, dec!(11525));
        assert!(breakdown[2].is_active);
    }

    #[test]
    fn bracket_breakdown_sums_to_schedule_tax() {
        let ladder = single_ladder();

        let breakdown = bracket_breakdown(&ladder, dec!(250000));
        let total: Decimal = breakdown.iter().map(|b| b.tax_in_bracket).sum();

        assert_eq!(total, calculate_tax(&ladder, dec!(250000)));
    }

    #[test]
    fn bracket_breakdown_at_boundary_marks_lower_bracket_active() {
        let ladder = single_ladder();

        let breakdown = bracket_breakdown(&ladder, dec!(11925));

        assert_eq!(breakdown.len(), 1);
        assert!(breakdown[0].is_active);
        assert_eq!(breakdown[0].income_in_bracket, dec!(11925));
    }

    #[test]
    fn bracket_breakdown_for_zero_income_has_single_empty_row() {
        let ladder = single_ladder();

        let breakdown = bracket_breakdown(&ladder, dec!(0));

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].income_in_bracket, dec!(0));
        assert!(breakdown[0].is_active);
    }

    // =========================================================================
    // properties
    // =========================================================================

    #[test]
    fn tax_is_continuous_at_every_boundary() {
        let params = params_2025();

        for status in FilingStatus::ALL {
            let ladder = params.brackets(status);
            for pair in ladder.brackets().windows(2) {
                let boundary = pair[1].min_income;
                assert_eq!(
                    bracket_tax(&pair[0], boundary),
                    bracket_tax(&pair[1], boundary),
                    "{status} discontinuous at {boundary}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn prop_tax_is_non_decreasing(
            cents in 0u64..150_000_000,
            step_cents in 0u64..5_000_000,
            status_index in 0usize..4,
        ) {
            let params = params_2025();
            let ladder = params.brackets(FilingStatus::ALL[status_index]);
            let low = Decimal::new(cents as i64, 2);
            let high = Decimal::new((cents + step_cents) as i64, 2);

            prop_assert!(calculate_tax(ladder, low) <= calculate_tax(ladder, high));
        }

        #[test]
        fn prop_found_bracket_contains_income(cents in 0u64..150_000_000) {
            let ladder = single_ladder();
            let income = Decimal::new(cents as i64, 2);

            prop_assert!(find_bracket(&ladder, income).contains(income));
            prop_assert_eq!(
                bracket_breakdown(&ladder, income).iter().map(|b| b.tax_in_bracket).sum::<Decimal>(),
                calculate_tax(&ladder, income)
            );
        }
    }
}
