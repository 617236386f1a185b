use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use fincalc_core::annuity::growth::{calculate_annuity_growth, AnnuityInput, ContributionScheme};

use crate::input;

/// Arguments for the SIP calculator
#[derive(Args)]
pub struct SipArgs {
    /// Path to a JSON file with the monthly plan
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested at the start of every month
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long, default_value = "12")]
    pub rate: Decimal,

    /// Number of monthly contributions
    #[arg(long)]
    pub months: Option<u32>,
}

/// Arguments for the RD calculator
#[derive(Args)]
pub struct RdArgs {
    /// Path to a JSON file with the monthly plan
    #[arg(long)]
    pub input: Option<String>,

    /// Amount deposited at the start of every month
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, default_value = "6.5")]
    pub rate: Decimal,

    /// Number of monthly deposits
    #[arg(long)]
    pub months: Option<u32>,
}

/// The scheme tag is fixed by the subcommand, so files and piped JSON only
/// carry the plan itself.
#[derive(Deserialize)]
struct MonthlyPlan {
    monthly_amount: Decimal,
    annual_rate_pct: Decimal,
    months: u32,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan(&args.input, args.amount, args.rate, args.months)?;
    run_plan(ContributionScheme::Sip, plan)
}

pub fn run_rd(args: RdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = resolve_plan(&args.input, args.amount, args.rate, args.months)?;
    run_plan(ContributionScheme::Rd, plan)
}

fn run_plan(
    scheme: ContributionScheme,
    plan: MonthlyPlan,
) -> Result<Value, Box<dyn std::error::Error>> {
    let input = AnnuityInput {
        scheme,
        monthly_amount: plan.monthly_amount,
        annual_rate_pct: plan.annual_rate_pct,
        months: plan.months,
    };
    let result = calculate_annuity_growth(&input)?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_plan(
    input_path: &Option<String>,
    amount: Option<Decimal>,
    rate: Decimal,
    months: Option<u32>,
) -> Result<MonthlyPlan, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return input::file::read_json(path);
    }
    if let (Some(monthly_amount), Some(months)) = (amount, months) {
        return Ok(MonthlyPlan {
            monthly_amount,
            annual_rate_pct: rate,
            months,
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide --amount and --months, or --input file, or pipe JSON via stdin".into())
}
