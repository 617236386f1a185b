use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::loan::amortization::{calculate_emi, EmiInput};
use fincalc_core::loan::comparison::{compare_loans, LoanComparisonInput};

use crate::input;

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Path to a JSON file with the full EMI input
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long)]
    pub tenure_months: Option<u32>,
}

/// Arguments for two-loan comparison
#[derive(Args)]
pub struct CompareLoansArgs {
    /// Path to a JSON file with both loan offers
    #[arg(long)]
    pub input: Option<String>,

    /// Principal of loan A
    #[arg(long)]
    pub principal_a: Option<Decimal>,

    /// Annual rate of loan A in percent
    #[arg(long)]
    pub rate_a: Option<Decimal>,

    /// Tenure of loan A in months
    #[arg(long)]
    pub tenure_a: Option<u32>,

    /// Principal of loan B
    #[arg(long)]
    pub principal_b: Option<Decimal>,

    /// Annual rate of loan B in percent
    #[arg(long)]
    pub rate_b: Option<Decimal>,

    /// Tenure of loan B in months
    #[arg(long)]
    pub tenure_b: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_emi_input(&args)?;
    let result = calculate_emi(&input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_loans(args: CompareLoansArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_comparison_input(&args)?;
    let result = compare_loans(&input)?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_emi_input(args: &EmiArgs) -> Result<EmiInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let (Some(principal), Some(rate), Some(tenure_months)) =
        (args.principal, args.rate, args.tenure_months)
    {
        return Ok(EmiInput {
            principal,
            annual_rate_pct: rate,
            tenure_months,
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide --principal, --rate and --tenure-months, or --input file, or pipe JSON via stdin".into())
}

fn resolve_comparison_input(
    args: &CompareLoansArgs,
) -> Result<LoanComparisonInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let (Some(pa), Some(ra), Some(ta), Some(pb), Some(rb), Some(tb)) = (
        args.principal_a,
        args.rate_a,
        args.tenure_a,
        args.principal_b,
        args.rate_b,
        args.tenure_b,
    ) {
        return Ok(LoanComparisonInput {
            loan_a: EmiInput {
                principal: pa,
                annual_rate_pct: ra,
                tenure_months: ta,
            },
            loan_b: EmiInput {
                principal: pb,
                annual_rate_pct: rb,
                tenure_months: tb,
            },
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide both loans via flags, --input file, or piped JSON".into())
}
