//! 2025 IRS parameters built in code for unit tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    BracketLadder, ContributionLimit, ContributionLimits, FilingStatus, FilingStatusTable,
    HsaLimit, PhaseOutRange, StandardDeduction, TaxBracket, TaxParameterTable,
    TaxYearParameters, TraditionalIraPhaseOuts,
};

fn ladder(
    status: FilingStatus,
    rows: &[Row],
) -> BracketLadder {
    let brackets = rows
        .iter()
        .map(|&(min_income, max_income, tax_rate, base_tax)| TaxBracket {
            min_income,
            max_income,
            tax_rate,
            base_tax,
        })
        .collect();
    BracketLadder::new(2025, status, brackets).expect("reference brackets are valid")
}

type Row = (Decimal, Option<Decimal>, Decimal, Decimal);

/// Single and married-separately schedules differ only in the top threshold.
fn single_schedule(
    top_threshold: Decimal,
    top_base: Decimal,
) -> Vec<Row> {
    vec![
        (dec!(0), Some(dec!(11925)), dec!(0.10), dec!(0)),
        (dec!(11925), Some(dec!(48475)), dec!(0.12), dec!(1192.50)),
        (dec!(48475), Some(dec!(103350)), dec!(0.22), dec!(5578.50)),
        (dec!(103350), Some(dec!(197300)), dec!(0.24), dec!(17651)),
        (dec!(197300), Some(dec!(250525)), dec!(0.32), dec!(40199)),
        (dec!(250525), Some(top_threshold), dec!(0.35), dec!(57231)),
        (top_threshold, None, dec!(0.37), top_base),
    ]
}

pub fn params_2025() -> TaxYearParameters {
    let range = |start: Decimal, end: Decimal| PhaseOutRange { start, end };

    TaxYearParameters {
        tax_year: 2025,
        brackets: FilingStatusTable {
            single: ladder(
                FilingStatus::Single,
                &single_schedule(dec!(626350), dec!(188769.75)),
            ),
            head_of_household: ladder(
                FilingStatus::HeadOfHousehold,
                &[
                    (dec!(0), Some(dec!(17000)), dec!(0.10), dec!(0)),
                    (dec!(17000), Some(dec!(64850)), dec!(0.12), dec!(1700)),
                    (dec!(64850), Some(dec!(103350)), dec!(0.22), dec!(7442)),
                    (dec!(103350), Some(dec!(197300)), dec!(0.24), dec!(15912)),
                    (dec!(197300), Some(dec!(250500)), dec!(0.32), dec!(38460)),
                    (dec!(250500), Some(dec!(626350)), dec!(0.35), dec!(55484)),
                    (dec!(626350), None, dec!(0.37), dec!(187031.50)),
                ],
            ),
            married_filing_jointly: ladder(
                FilingStatus::MarriedFilingJointly,
                &[
                    (dec!(0), Some(dec!(23850)), dec!(0.10), dec!(0)),
                    (dec!(23850), Some(dec!(96950)), dec!(0.12), dec!(2385)),
                    (dec!(96950), Some(dec!(206700)), dec!(0.22), dec!(11157)),
                    (dec!(206700), Some(dec!(394600)), dec!(0.24), dec!(35302)),
                    (dec!(394600), Some(dec!(501050)), dec!(0.32), dec!(80398)),
                    (dec!(501050), Some(dec!(751600)), dec!(0.35), dec!(114462)),
                    (dec!(751600), None, dec!(0.37), dec!(202154.50)),
                ],
            ),
            married_filing_separately: ladder(
                FilingStatus::MarriedFilingSeparately,
                &single_schedule(dec!(375800), dec!(101077.25)),
            ),
        },
        standard_deductions: FilingStatusTable {
            single: StandardDeduction {
                amount: dec!(15000),
                age_65_addition: dec!(2000),
            },
            head_of_household: StandardDeduction {
                amount: dec!(22500),
                age_65_addition: dec!(2000),
            },
            married_filing_jointly: StandardDeduction {
                amount: dec!(30000),
                age_65_addition: dec!(1600),
            },
            married_filing_separately: StandardDeduction {
                amount: dec!(15000),
                age_65_addition: dec!(1600),
            },
        },
        dependent_credit: dec!(2000),
        limits: ContributionLimits {
            retirement: ContributionLimit {
                standard: dec!(23500),
                catch_up: dec!(31000),
            },
            ira: ContributionLimit {
                standard: dec!(7000),
                catch_up: dec!(8000),
            },
            hsa: HsaLimit {
                self_only: dec!(4150),
                family: dec!(8300),
                catch_up: dec!(1000),
            },
            fsa: dec!(3200),
            student_loan_interest: dec!(2500),
            educator_expenses: dec!(300),
        },
        traditional_ira_phase_outs: TraditionalIraPhaseOuts {
            single_covered: range(dec!(79000), dec!(89000)),
            head_of_household_covered: range(dec!(79000), dec!(89000)),
            married_both_covered: range(dec!(126000), dec!(146000)),
            married_one_covered: range(dec!(236000), dec!(246000)),
            married_separate_covered: range(dec!(0), dec!(10000)),
        },
        roth_ira_phase_outs: FilingStatusTable {
            single: range(dec!(146000), dec!(161000)),
            head_of_household: range(dec!(146000), dec!(161000)),
            married_filing_jointly: range(dec!(230000), dec!(240000)),
            married_filing_separately: range(dec!(0), dec!(10000)),
        },
    }
}

pub fn table_2025() -> TaxParameterTable {
    let mut table = TaxParameterTable::new();
    table
        .insert(params_2025())
        .expect("reference parameters are valid");
    table
}
