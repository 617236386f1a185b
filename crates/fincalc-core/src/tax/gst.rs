use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::limits::PolicyLimits;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a GST split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstInput {
    /// The quoted amount.
    pub amount: Money,
    /// GST rate in percent.
    pub rate_pct: Rate,
    /// Whether `amount` already contains the tax.
    pub tax_inclusive: bool,
}

/// Output of a GST split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstOutput {
    /// Pre-tax amount.
    pub base_amount: Money,
    /// Total GST on the base amount.
    pub tax_amount: Money,
    /// Central GST half of the tax.
    pub cgst: Money,
    /// State GST half of the tax.
    pub sgst: Money,
    /// base_amount + tax_amount.
    pub total_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Split an amount into base and GST components.
///
/// Inclusive: base = amount / (1 + rate/100), tax = amount - base.
/// Exclusive: base = amount, tax = base * rate/100.
///
/// CGST and SGST are equal halves of the tax. Non-slab rates are accepted
/// with a warning.
pub fn calculate_gst(input: &GstInput) -> FinCalcResult<ComputationOutput<GstOutput>> {
    let start = Instant::now();

    validate(input)?;
    let warnings = PolicyLimits::default().gst_warnings(input.rate_pct);

    let rate = input.rate_pct / dec!(100);
    let (base_amount, tax_amount, total_amount) = if input.tax_inclusive {
        // 1 + rate >= 1 here, so the divisor can never be zero
        let base = input.amount / (Decimal::ONE + rate);
        (base, input.amount - base, input.amount)
    } else {
        let tax = input.amount * rate;
        (input.amount, tax, input.amount + tax)
    };

    let half = tax_amount / dec!(2);
    let output = GstOutput {
        base_amount,
        tax_amount,
        cgst: half,
        sgst: half,
        total_amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "GST Inclusive/Exclusive Split",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(input: &GstInput) -> FinCalcResult<()> {
    if input.amount <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "amount".into(),
            reason: "Amount must be positive".into(),
        });
    }
    if input.rate_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "rate_pct".into(),
            reason: "GST rate cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
