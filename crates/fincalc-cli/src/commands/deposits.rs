use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::deposits::fixed_deposit::{calculate_fd, CompoundingFrequency, FdInput};
use fincalc_core::deposits::ppf::{calculate_ppf, PpfInput};

use crate::input;

/// Arguments for the fixed deposit calculator
#[derive(Args)]
pub struct FdArgs {
    /// Path to a JSON file with the full FD input
    #[arg(long)]
    pub input: Option<String>,

    /// Deposited principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,

    /// Compounding frequency: annually, half-yearly, quarterly, monthly
    #[arg(long, default_value = "quarterly")]
    pub compounding: String,
}

/// Arguments for the PPF calculator
#[derive(Args)]
pub struct PpfArgs {
    /// Path to a JSON file with the full PPF input
    #[arg(long)]
    pub input: Option<String>,

    /// Amount deposited each year
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, default_value = "7.1")]
    pub rate: Decimal,

    /// Number of yearly deposits
    #[arg(long, default_value = "15")]
    pub years: u32,
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_fd_input(&args)?;
    let result = calculate_fd(&input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ppf(args: PpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_ppf_input(&args)?;
    let result = calculate_ppf(&input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_compounding(name: &str) -> Result<CompoundingFrequency, Box<dyn std::error::Error>> {
    match name.to_lowercase().as_str() {
        "annually" | "annual" | "yearly" => Ok(CompoundingFrequency::Annually),
        "half-yearly" | "halfyearly" | "semi-annual" => Ok(CompoundingFrequency::HalfYearly),
        "quarterly" => Ok(CompoundingFrequency::Quarterly),
        "monthly" => Ok(CompoundingFrequency::Monthly),
        _ => Err(format!(
            "Unknown compounding '{}'. Use: annually, half-yearly, quarterly, monthly",
            name
        )
        .into()),
    }
}

fn resolve_fd_input(args: &FdArgs) -> Result<FdInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let (Some(principal), Some(rate), Some(tenure_months)) =
        (args.principal, args.rate, args.tenure_months)
    {
        return Ok(FdInput {
            principal,
            annual_rate_pct: rate,
            tenure_months,
            compounding: parse_compounding(&args.compounding)?,
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide --principal, --rate and --tenure-months, or --input file, or pipe JSON via stdin".into())
}

fn resolve_ppf_input(args: &PpfArgs) -> Result<PpfInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(deposit) = args.deposit {
        return Ok(PpfInput {
            annual_deposit: deposit,
            annual_rate_pct: args.rate,
            investment_years: args.years,
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide --deposit, --input file, or pipe JSON via stdin".into())
}
