use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::currency::{convert_currency, ConvertInput, RateTable};

use crate::input;

/// Arguments for currency conversion
#[derive(Args)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long)]
    pub amount: Decimal,

    /// Currency code the amount is in
    #[arg(long)]
    pub from: String,

    /// Currency code to convert into
    #[arg(long)]
    pub to: String,

    /// Path to a JSON rate table ({"base": "INR", "rates": {"USD": "0.012"}}).
    /// Falls back to the built-in INR reference table.
    #[arg(long)]
    pub rates: Option<String>,
}

pub fn run_convert(args: ConvertArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table: RateTable = if let Some(ref path) = args.rates {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RateTable::indian_reference()
    };

    let conversion = ConvertInput {
        amount: args.amount,
        from: args.from,
        to: args.to,
    };
    let result = convert_currency(&conversion, &table)?;
    Ok(serde_json::to_value(result)?)
}
