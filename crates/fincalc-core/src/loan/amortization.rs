use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
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

/// Input for an equated monthly instalment (EMI) calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Loan principal in currency units.
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_pct: Rate,
    /// Loan tenure in months.
    pub tenure_months: u32,
}

/// Output of an EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    /// Fixed monthly payment.
    pub monthly_emi: Money,
    /// Interest paid over the full tenure: total_payment - principal.
    pub total_interest: Money,
    /// Principal plus interest over the full tenure: monthly_emi * months.
    pub total_payment: Money,
    /// Periodic rate used: annual_rate_pct / 12 / 100.
    pub monthly_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the EMI for a reducing-balance loan:
///
/// EMI = P * r * (1+r)^n / ((1+r)^n - 1)
///
/// where P = principal, r = monthly rate, n = tenure in months.
///
/// A zero rate has no annuity factor; that case uses the straight-line limit
/// EMI = P / n with zero total interest.
pub fn calculate_emi(input: &EmiInput) -> FinCalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();

    validate(input)?;
    let warnings = PolicyLimits::default().loan_warnings(
        input.principal,
        input.annual_rate_pct,
        input.tenure_months,
    );

    let output = amortize(input.principal, input.annual_rate_pct, input.tenure_months)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-Balance EMI (Annuity Formula)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Bare amortization shared with loan comparison. Callers validate first.
pub(crate) fn amortize(
    principal: Money,
    annual_rate_pct: Rate,
    tenure_months: u32,
) -> FinCalcResult<EmiOutput> {
    let n = Decimal::from(tenure_months);
    let monthly_rate = annual_rate_pct / dec!(12) / dec!(100);

    if monthly_rate.is_zero() {
        let monthly_emi = principal / n;
        return Ok(EmiOutput {
            monthly_emi,
            total_interest: Decimal::ZERO,
            total_payment: monthly_emi * n,
            monthly_rate,
        });
    }

    // 128-bit decimals overflow around 7.9e28, which long tenures at real
    // rates can exceed; surface that as an error rather than a panic
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(tenure_months as i64)
        .ok_or_else(|| FinCalcError::Overflow {
            context: "EMI compounding factor".into(),
        })?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(FinCalcError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    let monthly_emi = principal * monthly_rate * growth / denominator;
    let total_payment = monthly_emi * n;

    Ok(EmiOutput {
        monthly_emi,
        total_interest: total_payment - principal,
        total_payment,
        monthly_rate,
    })
}

pub(crate) fn validate(input: &EmiInput) -> FinCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.annual_rate_pct > dec!(100) {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate above 100% is not supported".into(),
        });
    }
    if input.tenure_months == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "tenure_months".into(),
            reason: "Tenure must be at least 1 month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
