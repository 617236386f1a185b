use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A table of exchange rates relative to a base currency: rate = units of
/// the coded currency per one unit of the base.
///
/// Deserialization funnels through [`RateTable::insert`] so codes loaded
/// from JSON get the same trim/uppercase normalization as codes inserted
/// programmatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawRateTable")]
pub struct RateTable {
    /// The currency all rates are quoted against.
    pub base: String,
    rates: HashMap<String, Decimal>,
}

#[derive(Deserialize)]
struct RawRateTable {
    base: String,
    rates: HashMap<String, Decimal>,
}

impl From<RawRateTable> for RateTable {
    fn from(raw: RawRateTable) -> Self {
        let mut table = RateTable::new(&raw.base);
        for (code, rate) in raw.rates {
            table.insert(&code, rate);
        }
        table
    }
}

impl RateTable {
    pub fn new(base: &str) -> Self {
        RateTable {
            base: normalize(base),
            rates: HashMap::new(),
        }
    }

    pub fn with_rates<I>(base: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut table = RateTable::new(base);
        for (code, rate) in rates {
            table.insert(&code, rate);
        }
        table
    }

    pub fn insert(&mut self, code: &str, per_base: Decimal) {
        self.rates.insert(normalize(code), per_base);
    }

    pub fn rate(&self, code: &str) -> Option<Decimal> {
        let code = normalize(code);
        // The base is worth exactly one of itself, whether or not the table
        // carries an explicit entry for it
        if code == normalize(&self.base) {
            return Some(Decimal::ONE);
        }
        self.rates.get(&code).copied()
    }

    /// Static INR-based reference rates. Stand-in data for offline use; a
    /// live deployment supplies its own table.
    pub fn indian_reference() -> Self {
        RateTable::with_rates(
            "INR",
            [
                ("USD".to_string(), dec!(0.012)),
                ("EUR".to_string(), dec!(0.011)),
                ("GBP".to_string(), dec!(0.0095)),
                ("JPY".to_string(), dec!(1.80)),
                ("AED".to_string(), dec!(0.044)),
                ("SGD".to_string(), dec!(0.016)),
                ("CNY".to_string(), dec!(0.087)),
            ],
        )
    }
}

/// Input for a currency conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertInput {
    pub amount: Money,
    /// Currency code the amount is in.
    pub from: String,
    /// Currency code to convert into.
    pub to: String,
}

/// Output of a currency conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    pub converted_amount: Money,
    /// The amount expressed in the table's base currency.
    pub base_amount: Money,
    pub from_code: String,
    pub to_code: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an amount between two currencies, pivoting through the table's
/// base currency.
///
/// An unknown code is an explicit `UnknownCurrency` error, never a silent
/// zero result.
pub fn convert_currency(
    input: &ConvertInput,
    table: &RateTable,
) -> FinCalcResult<ComputationOutput<ConvertOutput>> {
    let start = Instant::now();

    if input.amount < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "amount".into(),
            reason: "Amount cannot be negative".into(),
        });
    }

    let from_code = normalize(&input.from);
    let to_code = normalize(&input.to);

    let from_rate = table
        .rate(&from_code)
        .ok_or_else(|| FinCalcError::UnknownCurrency {
            code: from_code.clone(),
        })?;
    let to_rate = table
        .rate(&to_code)
        .ok_or_else(|| FinCalcError::UnknownCurrency {
            code: to_code.clone(),
        })?;

    if from_rate <= Decimal::ZERO {
        return Err(FinCalcError::DivisionByZero {
            context: format!("rate table entry for {from_code}"),
        });
    }
    if to_rate <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "rate_table".into(),
            reason: format!("Rate for {to_code} must be positive"),
        });
    }

    let base_amount = input.amount / from_rate;
    let converted_amount = base_amount * to_rate;

    let output = ConvertOutput {
        converted_amount,
        base_amount,
        from_code,
        to_code,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Currency Conversion via Base-Currency Pivot",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
