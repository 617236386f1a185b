use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How often deposit interest is compounded. A closed set, so the periods
/// divisor can never be zero or unexpected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    HalfYearly,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::HalfYearly => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

/// Input for a fixed deposit (lump-sum compounding) calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    /// Deposited principal.
    pub principal: Money,
    /// Annual interest rate in percent.
    pub annual_rate_pct: Rate,
    /// Deposit tenure in months. Need not be a whole number of years.
    pub tenure_months: u32,
    pub compounding: CompoundingFrequency,
}

/// Output of a fixed deposit calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdOutput {
    /// Principal plus compounded interest at maturity.
    pub maturity_amount: Money,
    /// maturity_amount - principal.
    pub interest_earned: Money,
    /// Annual yield after compounding: ((1 + r/m)^m - 1) * 100.
    pub effective_annual_rate_pct: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate fixed deposit maturity:
///
/// M = P * (1 + r/m)^(m * t)
///
/// where r = annual rate as a fraction, m = compounding periods per year,
/// t = tenure in years (tenure_months / 12).
pub fn calculate_fd(input: &FdInput) -> FinCalcResult<ComputationOutput<FdOutput>> {
    let start = Instant::now();

    validate(input)?;

    let rate = input.annual_rate_pct / dec!(100);
    let m = Decimal::from(input.compounding.periods_per_year());
    let years = Decimal::from(input.tenure_months) / dec!(12);
    let periodic = Decimal::ONE + rate / m;

    let maturity_amount = input.principal * compound_factor(periodic, m * years)?;
    let effective_growth = periodic
        .checked_powi(input.compounding.periods_per_year() as i64)
        .ok_or_else(|| FinCalcError::Overflow {
            context: "effective annual rate".into(),
        })?;
    let effective_annual_rate_pct = (effective_growth - Decimal::ONE) * dec!(100);

    let output = FdOutput {
        maturity_amount,
        interest_earned: maturity_amount - input.principal,
        effective_annual_rate_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed Deposit Compound Interest",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// base^exponent with exact integer exponentiation where possible and
/// exp/ln otherwise (fractional years of tenure). Overflow of the 128-bit
/// decimal range is an error, never a panic or a silent fallback.
fn compound_factor(base: Decimal, exponent: Decimal) -> FinCalcResult<Decimal> {
    let factor = if exponent == exponent.trunc() && exponent >= Decimal::ZERO {
        match exponent.to_i64() {
            Some(n) => base.checked_powi(n),
            None => base.checked_powd(exponent),
        }
    } else {
        base.checked_powd(exponent)
    };
    factor.ok_or_else(|| FinCalcError::Overflow {
        context: "FD compounding factor".into(),
    })
}

fn validate(input: &FdInput) -> FinCalcResult<()> {
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
