mod contribution_limits;
mod filing_status;
mod household;
mod ira;
mod parameter_table;
mod phase_out;
mod standard_deduction;
mod tax_bracket;
mod tax_calculation;
mod tax_year_parameters;

pub use contribution_limits::{ContributionLimit, ContributionLimits, HsaCoverage, HsaLimit};
pub use filing_status::{FilingStatus, FilingStatusTable};
pub use household::HouseholdInputs;
pub use ira::{
    ContributionRecommendations, Deductibility, HouseholdRecommendations, IraCoverageScenario,
    IraDeductionResult, IraDeductionUnlock, IraPhaseOut, PhaseOutInsights, RothEligibility,
};
pub use parameter_table::{DEFAULT_TAX_YEAR, TaxParameterTable};
pub use phase_out::{PhaseOutRange, TraditionalIraPhaseOuts};
pub use standard_deduction::StandardDeduction;
pub use tax_bracket::{BracketLadder, TaxBracket};
pub use tax_calculation::{BracketBreakdown, BracketInfo, PotentialSavings, TaxCalculationResult};
pub use tax_year_parameters::TaxYearParameters;
