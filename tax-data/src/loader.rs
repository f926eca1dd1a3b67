use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    BracketLadder, ContributionLimits, FilingStatus, FilingStatusTable, ParameterError,
    PhaseOutRange, StandardDeduction, TaxBracket, TaxParameterTable, TaxYearParameters,
    TraditionalIraPhaseOuts,
};
use thiserror::Error;
use tracing::info;

/// Reference bracket ladders shipped with the binary.
pub const EMBEDDED_BRACKETS: &str = include_str!("../data/tax_brackets.csv");

/// Reference scalar parameters shipped with the binary.
pub const EMBEDDED_PARAMETERS: &str = include_str!("../data/tax_years.toml");

/// Errors that can occur when loading tax parameter data.
#[derive(Debug, Error)]
pub enum ParameterLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Tax year {0} has brackets but no parameters")]
    MissingParameters(i32),

    #[error("Tax year {0} has parameters but no brackets")]
    MissingBrackets(i32),

    #[error("Tax year {0} is defined more than once")]
    DuplicateYear(i32),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid parameters: {0}")]
    Parameter(#[from] ParameterError),
}

impl From<csv::Error> for ParameterLoaderError {
    fn from(err: csv::Error) -> Self {
        ParameterLoaderError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for ParameterLoaderError {
    fn from(err: toml::de::Error) -> Self {
        ParameterLoaderError::TomlParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, ParameterLoaderError> {
    match schedule {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedFilingJointly),
        "Y-2" => Ok(FilingStatus::MarriedFilingSeparately),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(ParameterLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: Lower bound of the bracket; equals the previous bracket's upper bound
/// - `max_income`: Upper bound of the bracket (empty for unlimited)
/// - `base_tax`: Tax owed at `min_income`
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// One `[[year]]` table from the parameters TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct YearParametersRecord {
    pub tax_year: i32,
    pub dependent_credit: Decimal,
    pub standard_deduction: FilingStatusTable<Decimal>,
    pub age_65_deduction: FilingStatusTable<Decimal>,
    pub limits: ContributionLimits,
    pub traditional_ira_phase_out: TraditionalIraPhaseOuts,
    pub roth_ira_phase_out: FilingStatusTable<PhaseOutRange>,
}

#[derive(Debug, Deserialize)]
struct ParametersFile {
    #[serde(default)]
    year: Vec<YearParametersRecord>,
}

/// Loader that assembles a [`TaxParameterTable`] from a bracket CSV and a
/// parameters TOML file.
///
/// Every year must appear in both sources. Each assembled year is validated
/// by [`TaxParameterTable::insert`].
pub struct ParameterLoader;

impl ParameterLoader {
    /// Parse tax bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(
        reader: R
    ) -> Result<Vec<TaxBracketRecord>, ParameterLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse the `[[year]]` tables of a parameters TOML document.
    pub fn parse_parameters(
        source: &str
    ) -> Result<Vec<YearParametersRecord>, ParameterLoaderError> {
        let file: ParametersFile = toml::from_str(source)?;
        Ok(file.year)
    }

    /// Combine parsed records into a validated table.
    pub fn build(
        brackets: &[TaxBracketRecord],
        years: Vec<YearParametersRecord>,
    ) -> Result<TaxParameterTable, ParameterLoaderError> {
        let mut grouped: BTreeMap<i32, BTreeMap<FilingStatus, Vec<TaxBracket>>> = BTreeMap::new();

        for record in brackets {
            let status = schedule_to_filing_status(&record.schedule)?;
            grouped
                .entry(record.tax_year)
                .or_default()
                .entry(status)
                .or_default()
                .push(TaxBracket {
                    min_income: record.min_income,
                    max_income: record.max_income,
                    tax_rate: record.rate,
                    base_tax: record.base_tax,
                });
        }

        let mut table = TaxParameterTable::new();
        for record in years {
            let tax_year = record.tax_year;
            if table.contains(tax_year) {
                return Err(ParameterLoaderError::DuplicateYear(tax_year));
            }
            let ladders = grouped
                .remove(&tax_year)
                .ok_or(ParameterLoaderError::MissingBrackets(tax_year))?;

            table.insert(Self::assemble(record, ladders)?)?;
        }

        if let Some(&orphan) = grouped.keys().next() {
            return Err(ParameterLoaderError::MissingParameters(orphan));
        }

        info!(
            years = ?table.available_years(),
            "tax parameter table loaded"
        );

        Ok(table)
    }

    /// Load the reference data embedded in the crate.
    pub fn load_embedded() -> Result<TaxParameterTable, ParameterLoaderError> {
        let brackets = Self::parse_brackets(EMBEDDED_BRACKETS.as_bytes())?;
        let years = Self::parse_parameters(EMBEDDED_PARAMETERS)?;
        Self::build(&brackets, years)
    }

    /// Load data from files, falling back to the embedded copy for any source
    /// that is not given.
    pub fn load_files(
        brackets_path: Option<&Path>,
        parameters_path: Option<&Path>,
    ) -> Result<TaxParameterTable, ParameterLoaderError> {
        let brackets = match brackets_path {
            Some(path) => {
                info!(path = %path.display(), "loading tax brackets");
                Self::parse_brackets(read_file(path)?.as_bytes())?
            }
            None => Self::parse_brackets(EMBEDDED_BRACKETS.as_bytes())?,
        };
        let years = match parameters_path {
            Some(path) => {
                info!(path = %path.display(), "loading tax year parameters");
                Self::parse_parameters(&read_file(path)?)?
            }
            None => Self::parse_parameters(EMBEDDED_PARAMETERS)?,
        };

        Self::build(&brackets, years)
    }

    fn assemble(
        record: YearParametersRecord,
        mut ladders: BTreeMap<FilingStatus, Vec<TaxBracket>>,
    ) -> Result<TaxYearParameters, ParameterLoaderError> {
        let tax_year = record.tax_year;
        let mut ladder = |status: FilingStatus| {
            let brackets = ladders.remove(&status).unwrap_or_default();
            BracketLadder::new(tax_year, status, brackets)
        };

        let brackets = FilingStatusTable {
            single: ladder(FilingStatus::Single)?,
            head_of_household: ladder(FilingStatus::HeadOfHousehold)?,
            married_filing_jointly: ladder(FilingStatus::MarriedFilingJointly)?,
            married_filing_separately: ladder(FilingStatus::MarriedFilingSeparately)?,
        };

        let age_65 = &record.age_65_deduction;
        let standard_deductions = record.standard_deduction.try_map(|status, amount| {
            Ok::<_, ParameterError>(StandardDeduction {
                amount,
                age_65_addition: *age_65.get(status),
            })
        })?;

        Ok(TaxYearParameters {
            tax_year,
            brackets,
            standard_deductions,
            dependent_credit: record.dependent_credit,
            limits: record.limits,
            traditional_ira_phase_outs: record.traditional_ira_phase_out,
            roth_ira_phase_outs: record.roth_ira_phase_out,
        })
    }
}

fn read_file(path: &Path) -> Result<String, ParameterLoaderError> {
    fs::read_to_string(path).map_err(|source| ParameterLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
