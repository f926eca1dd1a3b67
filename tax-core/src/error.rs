use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FilingStatus;

/// Errors raised while assembling or selecting yearly tax parameters.
///
/// The calculations themselves are total over their inputs; the only way an
/// engine call fails is a parameter set that is missing or malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("no tax parameters loaded for year {0}")]
    UnknownTaxYear(i32),

    #[error("no tax brackets for {status} in {year}")]
    MissingBrackets { year: i32, status: FilingStatus },

    #[error("first {status} bracket for {year} starts at {found}, expected 0")]
    FirstBracketNotZero {
        year: i32,
        status: FilingStatus,
        found: Decimal,
    },

    #[error("{status} brackets for {year} are not contiguous: expected {expected}, found {found}")]
    NonContiguousBrackets {
        year: i32,
        status: FilingStatus,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{status} brackets for {year} have an unbounded bracket before the top one")]
    UnboundedBracketNotLast { year: i32, status: FilingStatus },

    #[error("{status} brackets for {year} have a bounded top bracket")]
    BoundedTopBracket { year: i32, status: FilingStatus },

    #[error("{status} bracket base tax for {year} jumps at {at}: expected {expected}, found {found}")]
    BracketDiscontinuity {
        year: i32,
        status: FilingStatus,
        at: Decimal,
        expected: Decimal,
        found: Decimal,
    },

    #[error("phase-out range '{name}' for {year} ends before it starts")]
    InvalidPhaseOut { year: i32, name: &'static str },

    #[error("limit '{name}' for {year} is invalid")]
    InvalidLimit { year: i32, name: &'static str },
}
