//! Traditional IRA deduction phase-out.
//!
//! The deduction depends on MAGI, filing status, and employer-plan coverage of
//! the contributing spouse (`self_covered`) and the other spouse
//! (`other_covered`). A household with two IRAs calls
//! [`calculate_traditional_ira_deductible`] once per spouse with the coverage
//! flags swapped; both share the household MAGI.
//!
//! Inside a phase-out the IRS rounds the reduced deduction up to the next
//! multiple of $10 and never lets a non-zero deduction fall below $200.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{max, round_up_to_multiple};
use crate::models::{
    Deductibility, FilingStatus, IraCoverageScenario, IraDeductionResult, IraPhaseOut,
    PhaseOutInsights, PhaseOutRange, TaxYearParameters,
};

/// Partial deductions are rounded up to a multiple of this amount.
const ROUNDING_INCREMENT: Decimal = dec!(10);

/// Smallest non-zero partial deduction.
const MINIMUM_DEDUCTION: Decimal = dec!(200);

/// Selects the income limit that applies to the contributing spouse.
pub fn classify_phase_out(
    params: &TaxYearParameters,
    filing_status: FilingStatus,
    self_covered: bool,
    other_covered: bool,
) -> IraPhaseOut {
    let limits = &params.traditional_ira_phase_outs;
    let scenario = match (filing_status, self_covered, other_covered) {
        (FilingStatus::Single, true, _) => IraCoverageScenario::SingleCovered,
        (FilingStatus::HeadOfHousehold, true, _) => IraCoverageScenario::HeadOfHouseholdCovered,
        (FilingStatus::MarriedFilingJointly, true, _) => IraCoverageScenario::MarriedBothCovered,
        (FilingStatus::MarriedFilingJointly, false, true) => IraCoverageScenario::MarriedOneCovered,
        (FilingStatus::MarriedFilingSeparately, true, _) => {
            IraCoverageScenario::MarriedSeparateCovered
        }
        (FilingStatus::Single | FilingStatus::HeadOfHousehold, false, _)
        | (FilingStatus::MarriedFilingJointly, false, false)
        | (FilingStatus::MarriedFilingSeparately, false, _) => return IraPhaseOut::NoLimit,
    };

    let range = match scenario {
        IraCoverageScenario::SingleCovered => limits.single_covered,
        IraCoverageScenario::HeadOfHouseholdCovered => limits.head_of_household_covered,
        IraCoverageScenario::MarriedBothCovered => limits.married_both_covered,
        IraCoverageScenario::MarriedOneCovered => limits.married_one_covered,
        IraCoverageScenario::MarriedSeparateCovered => limits.married_separate_covered,
    };

    IraPhaseOut::Range { scenario, range }
}

/// Applies the IRS $10 round-up and $200 floor to a raw phase-out amount.
///
/// The result is always a multiple of 10 and either zero or at least 200.
pub fn irs_round_deduction(raw_amount: Decimal) -> Decimal {
    let rounded = round_up_to_multiple(raw_amount, ROUNDING_INCREMENT);
    if rounded > Decimal::ZERO && rounded < MINIMUM_DEDUCTION {
        MINIMUM_DEDUCTION
    } else {
        rounded
    }
}

/// Deduction inside the phase-out range, before the contribution clamp.
fn phased_deduction(
    magi: Decimal,
    range: PhaseOutRange,
    max_contribution: Decimal,
) -> Decimal {
    let difference = range.end - magi;
    let ratio = difference / range.width();
    irs_round_deduction(ratio * max_contribution)
}

/// Computes how much of `contribution` is deductible.
pub fn calculate_traditional_ira_deductible(
    params: &TaxYearParameters,
    magi: Decimal,
    filing_status: FilingStatus,
    self_covered: bool,
    other_covered: bool,
    contribution: Decimal,
    catch_up_eligible: bool,
) -> IraDeductionResult {
    let max_contribution = params.limits.ira_limit(catch_up_eligible);
    let full = IraDeductionResult {
        deductible_amount: contribution.min(max_contribution),
        deductibility: Deductibility::Full,
        max_contribution,
    };

    let phase_out = classify_phase_out(params, filing_status, self_covered, other_covered);
    let IraPhaseOut::Range { scenario, range } = phase_out else {
        return full;
    };

    let result = if magi <= range.start {
        full
    } else if magi >= range.end {
        IraDeductionResult {
            deductible_amount: Decimal::ZERO,
            deductibility: Deductibility::None,
            max_contribution,
        }
    } else {
        let rounded = phased_deduction(magi, range, max_contribution);
        IraDeductionResult {
            deductible_amount: max(
                rounded.min(contribution).min(max_contribution),
                Decimal::ZERO,
            ),
            deductibility: Deductibility::Partial,
            max_contribution,
        }
    };

    debug!(
        magi = %magi,
        scenario = ?scenario,
        deductible = %result.deductible_amount,
        deductibility = ?result.deductibility,
        "traditional IRA deduction computed"
    );

    result
}

/// Deductible amount after the household's "treat as non-deductible"
/// election. The classification in `result` is left untouched.
pub fn apply_non_deductible_election(
    result: &IraDeductionResult,
    non_deductible: bool,
) -> Decimal {
    if non_deductible {
        Decimal::ZERO
    } else {
        result.deductible_amount
    }
}

/// Describes where `magi` sits in `range` and what reaching the full-deduction
/// threshold would gain.
pub fn phase_out_insights(
    magi: Decimal,
    range: PhaseOutRange,
    max_contribution: Decimal,
    current_deductible: Decimal,
) -> PhaseOutInsights {
    let width = range.width();
    let over_start = max(magi - range.start, Decimal::ZERO);

    let (position, gain_per_1000) = if width > Decimal::ZERO {
        (
            (over_start / width).clamp(Decimal::ZERO, Decimal::ONE),
            max_contribution / width * dec!(1000),
        )
    } else {
        (Decimal::ONE, Decimal::ZERO)
    };

    PhaseOutInsights {
        magi_reduction_needed: over_start,
        additional_deductible_amount: max(max_contribution - current_deductible, Decimal::ZERO),
        deduction_gain_per_1000: gain_per_1000,
        phase_out_position: position,
    }
}
