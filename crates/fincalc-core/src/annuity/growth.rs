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

/// Which product a periodic contribution models. Both use the same
/// annuity-due mathematics; the tag drives labeling and history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionScheme {
    /// Systematic investment plan: a fixed monthly investment.
    Sip,
    /// Recurring deposit: a fixed monthly bank deposit.
    Rd,
}

/// Input for a periodic-contribution growth calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityInput {
    pub scheme: ContributionScheme,
    /// Amount contributed at the start of every month.
    pub monthly_amount: Money,
    /// Expected annual return in percent.
    pub annual_rate_pct: Rate,
    /// Number of monthly contributions.
    pub months: u32,
}

/// Output of a periodic-contribution growth calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityOutput {
    /// monthly_amount * months.
    pub total_contributed: Money,
    /// Future value of all contributions at the end of the term.
    pub maturity_value: Money,
    /// maturity_value - total_contributed.
    pub estimated_gain: Money,
    /// maturity_value / total_contributed.
    pub wealth_multiplier: Decimal,
    /// Share of maturity that is own contribution, percent.
    pub contribution_pct: Decimal,
    /// Share of maturity that is growth, percent.
    pub gain_pct: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Future value of a monthly annuity-due (contribution at period start):
///
/// FV = A * (((1+i)^n - 1) / i) * (1+i)
///
/// where i = annual_rate_pct / 12 / 100. The zero-rate limit is FV = A * n.
pub fn calculate_annuity_growth(
    input: &AnnuityInput,
) -> FinCalcResult<ComputationOutput<AnnuityOutput>> {
    let start = Instant::now();

    validate(input)?;

    let n = Decimal::from(input.months);
    let monthly_rate = input.annual_rate_pct / dec!(12) / dec!(100);

    let maturity_value = if monthly_rate.is_zero() {
        input.monthly_amount * n
    } else {
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powi(input.months as i64)
            .ok_or_else(|| FinCalcError::Overflow {
                context: "annuity compounding factor".into(),
            })?;
        input.monthly_amount * ((growth - Decimal::ONE) / monthly_rate)
            * (Decimal::ONE + monthly_rate)
    };

    let total_contributed = input.monthly_amount * n;
    let estimated_gain = maturity_value - total_contributed;

    // total_contributed > 0 is guaranteed by validation
    let wealth_multiplier = maturity_value / total_contributed;
    let (contribution_pct, gain_pct) = if maturity_value.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            total_contributed / maturity_value * dec!(100),
            estimated_gain / maturity_value * dec!(100),
        )
    };

    let output = AnnuityOutput {
        total_contributed,
        maturity_value,
        estimated_gain,
        wealth_multiplier,
        contribution_pct,
        gain_pct,
    };

    let methodology = match input.scheme {
        ContributionScheme::Sip => "SIP Future Value (Monthly Annuity-Due)",
        ContributionScheme::Rd => "RD Maturity Value (Monthly Annuity-Due)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, Vec::new(), elapsed, output))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(input: &AnnuityInput) -> FinCalcResult<()> {
    if input.monthly_amount <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthly_amount".into(),
            reason: "Contribution must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Return rate cannot be negative".into(),
        });
    }
    if input.annual_rate_pct > dec!(100) {
        return Err(FinCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Return rate above 100% is not supported".into(),
        });
    }
    if input.months == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
