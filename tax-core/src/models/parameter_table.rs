use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ParameterError;
use crate::models::TaxYearParameters;

/// The year used when a household does not pick one.
pub const DEFAULT_TAX_YEAR: i32 = 2025;

/// Read-only lookup of [`TaxYearParameters`] keyed by tax year.
///
/// Every entry is validated on insert, so calculations that receive a
/// parameter set from this table never need to re-check its shape. Supporting
/// a new year only requires inserting another entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxParameterTable {
    years: BTreeMap<i32, TaxYearParameters>,
}

impl TaxParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a year, replacing any existing entry for it.
    pub fn insert(
        &mut self,
        params: TaxYearParameters,
    ) -> Result<(), ParameterError> {
        params.validate()?;
        debug!(tax_year = params.tax_year, "tax year parameters registered");
        self.years.insert(params.tax_year, params);
        Ok(())
    }

    pub fn get(
        &self,
        year: i32,
    ) -> Result<&TaxYearParameters, ParameterError> {
        self.years
            .get(&year)
            .ok_or(ParameterError::UnknownTaxYear(year))
    }

    pub fn contains(
        &self,
        year: i32,
    ) -> bool {
        self.years.contains_key(&year)
    }

    /// Supported years, newest first.
    pub fn available_years(&self) -> Vec<i32> {
        self.years.keys().rev().copied().collect()
    }

    /// [`DEFAULT_TAX_YEAR`] when loaded, otherwise the newest year.
    pub fn current_year(&self) -> Option<i32> {
        if self.contains(DEFAULT_TAX_YEAR) {
            Some(DEFAULT_TAX_YEAR)
        } else {
            self.years.keys().next_back().copied()
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
