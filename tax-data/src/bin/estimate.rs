use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::{HouseholdInputs, TaxEngine};
use tax_data::{ParameterLoader, Report, logging};

/// Estimate federal income tax and IRA options for a household.
///
/// The household file is TOML with the fields of `HouseholdInputs`, e.g.:
///
///   filing_status = "single"
///   gross_income = 84000
///   ira_contributions = 7000
///   is_covered_by_employer_plan = true
///
/// Tax brackets and yearly parameters default to the data embedded in the
/// binary; either can be replaced with a file.
#[derive(Parser, Debug)]
#[command(name = "tax-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the household TOML file
    #[arg(short = 'H', long, required_unless_present = "list_years")]
    household: Option<PathBuf>,

    /// Tax bracket CSV (tax_year,schedule,min_income,max_income,base_tax,rate)
    #[arg(short, long)]
    brackets: Option<PathBuf>,

    /// Yearly parameters TOML with one [[year]] table per tax year
    #[arg(short, long)]
    parameters: Option<PathBuf>,

    /// Override the household's tax year
    #[arg(short, long)]
    year: Option<i32>,

    /// Log filter, e.g. "debug" or "tax_core=debug" (defaults to RUST_LOG, then info)
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the supported tax years and exit
    #[arg(long, default_value_t = false)]
    list_years: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.log_level.as_deref())?;
    if let Some(path) = &args.log_file {
        logging::enable_file_logging(path)?;
    }

    let table = ParameterLoader::load_files(args.brackets.as_deref(), args.parameters.as_deref())
        .context("Failed to load tax parameters")?;

    if args.list_years {
        for year in table.available_years() {
            println!("{year}");
        }
        return Ok(());
    }

    let path = args
        .household
        .as_ref()
        .context("--household is required")?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut inputs: HouseholdInputs = toml::from_str(&source)
        .with_context(|| format!("Failed to parse household: {}", path.display()))?;
    if let Some(year) = args.year {
        inputs.tax_year = year;
    }

    let engine = TaxEngine::new(&table);
    let Some(result) = engine
        .calculate_tax(&inputs)
        .with_context(|| format!("Failed to estimate tax year {}", inputs.tax_year))?
    else {
        println!("No estimate: choose a filing status and enter a positive gross income.");
        return Ok(());
    };

    let phase_out = engine.ira_phase_out(
        result.tax_year,
        result.filing_status,
        inputs.is_covered_by_employer_plan,
        inputs.is_spouse_covered_by_employer_plan,
    )?;
    let insights = engine.phase_out_insights(&inputs, &result)?;
    let unlock = engine.ira_deduction_unlock(&inputs, &result)?;
    let recommendations = engine.household_recommendations(&inputs, &result)?;
    let breakdown = engine.bracket_breakdown(&result)?;

    print!(
        "{}",
        Report {
            result: &result,
            phase_out: &phase_out,
            insights: insights.as_ref(),
            unlock: unlock.as_ref(),
            recommendations: &recommendations,
            breakdown: &breakdown,
        }
    );

    Ok(())
}
