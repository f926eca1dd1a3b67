//! Tax and IRA calculations over a single year's parameters.
//!
//! Every function here takes its [`TaxYearParameters`](crate::models::TaxYearParameters)
//! explicitly; year selection lives in [`TaxEngine`](crate::TaxEngine).

pub mod brackets;
pub mod common;
pub mod magi;
pub mod recommendations;
pub mod roth_ira;
pub mod savings;
pub mod tax_calculator;
pub mod traditional_ira;

pub use brackets::{bracket_breakdown, bracket_info, bracket_tax, calculate_tax, find_bracket};
pub use magi::{MagiAdjustments, calculate_magi};
pub use recommendations::calculate_ira_contribution_recommendations;
pub use roth_ira::check_roth_ira_eligibility;
pub use savings::calculate_potential_savings;
pub use tax_calculator::TaxCalculator;
pub use traditional_ira::{
    apply_non_deductible_election, calculate_traditional_ira_deductible, classify_phase_out,
    irs_round_deduction, phase_out_insights,
};
