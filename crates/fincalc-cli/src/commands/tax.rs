use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::tax::gst::{calculate_gst, GstInput};

use crate::input;

/// Arguments for the GST calculator
#[derive(Args)]
pub struct GstArgs {
    /// Path to a JSON file with the full GST input
    #[arg(long)]
    pub input: Option<String>,

    /// The quoted amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// GST rate in percent
    #[arg(long, default_value = "18")]
    pub rate: Decimal,

    /// Treat the amount as already containing GST
    #[arg(long)]
    pub inclusive: bool,
}

pub fn run_gst(args: GstArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = resolve_gst_input(&args)?;
    let result = calculate_gst(&input)?;
    Ok(serde_json::to_value(result)?)
}

fn resolve_gst_input(args: &GstArgs) -> Result<GstInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(amount) = args.amount {
        return Ok(GstInput {
            amount,
            rate_pct: args.rate,
            tax_inclusive: args.inclusive,
        });
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("Provide --amount, --input file, or pipe JSON via stdin".into())
}
