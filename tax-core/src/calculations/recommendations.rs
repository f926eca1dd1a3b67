//! Traditional/Roth split of the IRA contribution limit.
//!
//! Traditional is filled first up to what would be deductible at the full
//! limit; whatever room remains goes to Roth as far as Roth eligibility
//! allows. The result is advisory; contributions may differ from it.

use rust_decimal::Decimal;

use crate::calculations::common::max;
use crate::calculations::roth_ira::check_roth_ira_eligibility;
use crate::calculations::traditional_ira::calculate_traditional_ira_deductible;
use crate::models::{ContributionRecommendations, FilingStatus, TaxYearParameters};

pub fn calculate_ira_contribution_recommendations(
    params: &TaxYearParameters,
    magi: Decimal,
    filing_status: FilingStatus,
    self_covered: bool,
    other_covered: bool,
    catch_up_eligible: bool,
    current_contribution: Decimal,
) -> ContributionRecommendations {
    let global_limit = params.limits.ira_limit(catch_up_eligible);

    let traditional = calculate_traditional_ira_deductible(
        params,
        magi,
        filing_status,
        self_covered,
        other_covered,
        global_limit,
        catch_up_eligible,
    );
    let traditional_deductible_limit = traditional.deductible_amount;
    let recommended_traditional = traditional_deductible_limit.min(global_limit);
    let remaining_space = max(global_limit - recommended_traditional, Decimal::ZERO);

    let roth = check_roth_ira_eligibility(params, magi, filing_status, catch_up_eligible);
    let roth_range = params.roth_phase_out(filing_status);
    let recommended_roth = if magi < roth_range.start {
        remaining_space.min(roth.max_contribution)
    } else if magi >= roth_range.end {
        Decimal::ZERO
    } else {
        remaining_space.min(roth.allowed_contribution.unwrap_or(Decimal::ZERO))
    };

    ContributionRecommendations {
        recommended_traditional,
        recommended_roth,
        remaining_space,
        global_limit,
        traditional_deductible_limit,
        roth_eligible: roth.is_eligible,
        roth_phase_out_percentage: roth.phase_out_percentage,
        current_contribution,
        additional_room: max(global_limit - current_contribution, Decimal::ZERO),
    }
}
