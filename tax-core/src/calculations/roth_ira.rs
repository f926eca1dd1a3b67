//! Roth IRA eligibility.
//!
//! Eligibility depends only on MAGI and filing status. Unlike the Traditional
//! deduction there is no $10 rounding or $200 floor; the reduced allowance is
//! used as computed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::max;
use crate::models::{FilingStatus, RothEligibility, TaxYearParameters};

pub fn check_roth_ira_eligibility(
    params: &TaxYearParameters,
    magi: Decimal,
    filing_status: FilingStatus,
    catch_up_eligible: bool,
) -> RothEligibility {
    let max_contribution = params.limits.ira_limit(catch_up_eligible);
    let range = params.roth_phase_out(filing_status);

    if magi < range.start {
        return RothEligibility {
            is_eligible: true,
            max_contribution,
            phase_out_percentage: Decimal::ONE_HUNDRED,
            allowed_contribution: None,
        };
    }

    if magi >= range.end {
        return RothEligibility {
            is_eligible: false,
            max_contribution,
            phase_out_percentage: Decimal::ZERO,
            allowed_contribution: None,
        };
    }

    let over_start = magi - range.start;
    let percentage = max(
        Decimal::ONE_HUNDRED - over_start / range.width() * Decimal::ONE_HUNDRED,
        Decimal::ZERO,
    );
    let allowed = max(
        max_contribution * percentage / Decimal::ONE_HUNDRED,
        Decimal::ZERO,
    );

    debug!(
        magi = %magi,
        status = %filing_status,
        percentage = %percentage,
        allowed = %allowed,
        "roth contribution partially phased out"
    );

    RothEligibility {
        is_eligible: true,
        max_contribution,
        phase_out_percentage: percentage,
        allowed_contribution: Some(allowed),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_support::params_2025;

    fn check(
        magi: Decimal,
        status: FilingStatus,
        catch_up: bool,
    ) -> RothEligibility {
        check_roth_ira_eligibility(&params_2025(), magi, status, catch_up)
    }

    #[test]
    fn below_phase_out_is_fully_eligible() {
        let result = check(dec!(100000), FilingStatus::Single, false);

        assert_eq!(
            result,
            RothEligibility {
                is_eligible: true,
                max_contribution: dec!(7000),
                phase_out_percentage: dec!(100),
                allowed_contribution: None,
            }
        );
    }

    #[test]
    fn exactly_at_phase_out_start_is_eligible_at_one_hundred_percent() {
        // The start value itself is evaluated by the interpolation branch.
        let result = check(dec!(146000), FilingStatus::Single, false);

        assert!(result.is_eligible);
        assert_eq!(result.phase_out_percentage, dec!(100));
        assert_eq!(result.allowed_contribution, Some(dec!(7000)));
    }

    #[test]
    fn mid_phase_out_interpolates_linearly() {
        let result = check(dec!(235000), FilingStatus::MarriedFilingJointly, true);

        assert!(result.is_eligible);
        assert_eq!(result.phase_out_percentage, dec!(50));
        assert_eq!(result.allowed_contribution, Some(dec!(4000)));
    }

    #[test]
    fn partial_allowance_is_not_rounded() {
        // 1000 / 15000 over the start leaves 93.33...% of 7000.
        let result = check(dec!(147000), FilingStatus::HeadOfHousehold, false);

        let allowed = result.allowed_contribution.unwrap();
        assert!(allowed > dec!(6533.33) && allowed < dec!(6533.34));
    }

    #[test]
    fn at_phase_out_end_is_not_eligible() {
        let result = check(dec!(161000), FilingStatus::Single, false);

        assert_eq!(
            result,
            RothEligibility {
                is_eligible: false,
                max_contribution: dec!(7000),
                phase_out_percentage: dec!(0),
                allowed_contribution: None,
            }
        );
    }

    #[test]
    fn married_separately_phases_out_from_zero() {
        let at_zero = check(dec!(0), FilingStatus::MarriedFilingSeparately, false);
        let mid = check(dec!(2500), FilingStatus::MarriedFilingSeparately, false);

        assert_eq!(at_zero.allowed_contribution, Some(dec!(7000)));
        assert_eq!(mid.phase_out_percentage, dec!(75));
        assert_eq!(mid.allowed_contribution, Some(dec!(5250)));
    }
}
