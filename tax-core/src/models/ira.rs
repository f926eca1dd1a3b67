use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PhaseOutRange;

/// How much of a Traditional IRA contribution can be deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deductibility {
    Full,
    Partial,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IraDeductionResult {
    pub deductible_amount: Decimal,
    pub deductibility: Deductibility,
    /// Contribution ceiling that applied (standard or catch-up).
    pub max_contribution: Decimal,
}

impl IraDeductionResult {
    pub fn is_fully_deductible(&self) -> bool {
        self.deductibility == Deductibility::Full
    }

    pub fn is_partially_deductible(&self) -> bool {
        self.deductibility == Deductibility::Partial
    }

    pub fn is_non_deductible(&self) -> bool {
        self.deductibility == Deductibility::None
    }
}

/// Coverage scenarios that carry a Traditional IRA income limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IraCoverageScenario {
    SingleCovered,
    HeadOfHouseholdCovered,
    /// Joint return where the contributing spouse is covered.
    MarriedBothCovered,
    /// Joint return where only the other spouse is covered.
    MarriedOneCovered,
    MarriedSeparateCovered,
}

impl IraCoverageScenario {
    pub fn description(&self) -> &'static str {
        match self {
            Self::SingleCovered => "Single (covered by employer plan)",
            Self::HeadOfHouseholdCovered => "Head of Household (covered by employer plan)",
            Self::MarriedBothCovered => "Married Filing Jointly (covered by employer plan)",
            Self::MarriedOneCovered => "Married Filing Jointly (spouse covered)",
            Self::MarriedSeparateCovered => {
                "Married Filing Separately (covered by employer plan)"
            }
        }
    }
}

/// The Traditional IRA income limit that applies to one spouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IraPhaseOut {
    /// Fully deductible at any income.
    NoLimit,
    Range {
        scenario: IraCoverageScenario,
        range: PhaseOutRange,
    },
}

impl IraPhaseOut {
    pub fn range(&self) -> Option<PhaseOutRange> {
        match self {
            Self::NoLimit => None,
            Self::Range { range, .. } => Some(*range),
        }
    }

    /// One-line description of the limit for display next to a result.
    pub fn summary(&self) -> String {
        match self {
            Self::NoLimit => {
                "Full deduction regardless of income (no employer plan limit)".to_string()
            }
            Self::Range { scenario, range } if range.start.is_zero() => format!(
                "{}: partial deduction if MAGI < ${}, no deduction at ${}+",
                scenario.description(),
                range.end,
                range.end
            ),
            Self::Range { scenario, range } => format!(
                "{}: full deduction up to ${}, phases out ${} - ${}",
                scenario.description(),
                range.start,
                range.start,
                range.end
            ),
        }
    }
}

/// Where a MAGI sits inside a Traditional IRA phase-out and what reducing it
/// would gain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutInsights {
    /// MAGI reduction needed to reach the full-deduction threshold.
    pub magi_reduction_needed: Decimal,
    /// Additional deduction available at the full-deduction threshold.
    pub additional_deductible_amount: Decimal,
    /// Deduction gained per $1,000 of MAGI reduction.
    pub deduction_gain_per_1000: Decimal,
    /// 0 at the start of the range, 1 at the end.
    pub phase_out_position: Decimal,
}

/// Extra Traditional IRA deduction reached by lowering MAGI with 401(k)
/// contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IraDeductionUnlock {
    /// Smaller of the MAGI reduction needed and the 401(k) headroom.
    pub additional_401k_needed: Decimal,
    pub reduced_magi: Decimal,
    pub deductible_amount: Decimal,
    pub additional_deductible_amount: Decimal,
    /// Additional deduction taxed at the current marginal rate.
    pub estimated_tax_savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RothEligibility {
    pub is_eligible: bool,
    pub max_contribution: Decimal,
    /// Share of the contribution still allowed, 0 to 100.
    pub phase_out_percentage: Decimal,
    /// Reduced allowance, present only inside the phase-out range.
    pub allowed_contribution: Option<Decimal>,
}

/// Suggested Traditional/Roth split of the IRA contribution limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecommendations {
    pub recommended_traditional: Decimal,
    pub recommended_roth: Decimal,
    /// Limit left after the Traditional recommendation.
    pub remaining_space: Decimal,
    pub global_limit: Decimal,
    pub traditional_deductible_limit: Decimal,
    pub roth_eligible: bool,
    pub roth_phase_out_percentage: Decimal,
    pub current_contribution: Decimal,
    /// Limit not yet used by the current contribution.
    pub additional_room: Decimal,
}

impl ContributionRecommendations {
    pub fn total_recommended(&self) -> Decimal {
        self.recommended_traditional + self.recommended_roth
    }

    /// Tax saved by the Traditional recommendation at `marginal_rate`.
    pub fn estimated_traditional_savings(
        &self,
        marginal_rate: Decimal,
    ) -> Decimal {
        self.recommended_traditional * marginal_rate
    }
}

/// Recommendations for each IRA owner in the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdRecommendations {
    pub filer: ContributionRecommendations,
    /// Present only on a joint return.
    pub spouse: Option<ContributionRecommendations>,
}
