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

/// Input for a PPF-style plan: a fixed deposit made once a year, compounded
/// annually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    /// Amount deposited each year.
    pub annual_deposit: Money,
    /// Annual interest rate in percent.
    pub annual_rate_pct: Rate,
    /// Number of yearly deposits.
    pub investment_years: u32,
}

/// Output of a PPF projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfOutput {
    /// annual_deposit * investment_years.
    pub total_invested: Money,
    /// Value of all deposits at the end of the term.
    pub maturity_amount: Money,
    /// maturity_amount - total_invested.
    pub interest_earned: Money,
    /// maturity_amount / total_invested.
    pub wealth_multiplier: Decimal,
    /// Share of maturity that is own contribution, percent.
    pub investment_pct: Decimal,
    /// Share of maturity that is interest, percent.
    pub interest_pct: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a PPF balance:
///
/// M = D * ((1+r)^y - 1) / r
///
/// with the zero-rate limit M = D * y. The scheme contribution and term
/// limits are advisory warnings, not errors.
pub fn calculate_ppf(input: &PpfInput) -> FinCalcResult<ComputationOutput<PpfOutput>> {
    let start = Instant::now();

    validate(input)?;
    let warnings =
        PolicyLimits::default().ppf_warnings(input.annual_deposit, input.investment_years);

    let years = Decimal::from(input.investment_years);
    let rate = input.annual_rate_pct / dec!(100);

    let maturity_amount = if rate.is_zero() {
        input.annual_deposit * years
    } else {
        let growth = (Decimal::ONE + rate)
            .checked_powi(input.investment_years as i64)
            .ok_or_else(|| FinCalcError::Overflow {
                context: "PPF compounding factor".into(),
            })?;
        input.annual_deposit * (growth - Decimal::ONE) / rate
    };

    let total_invested = input.annual_deposit * years;
    let interest_earned = maturity_amount - total_invested;

    // total_invested > 0 is guaranteed by validation
    let wealth_multiplier = maturity_amount / total_invested;
    let (investment_pct, interest_pct) = if maturity_amount.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            total_invested / maturity_amount * dec!(100),
            interest_earned / maturity_amount * dec!(100),
        )
    };

    let output = PpfOutput {
        total_invested,
        maturity_amount,
        interest_earned,
        wealth_multiplier,
        investment_pct,
        interest_pct,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "PPF Annual-Contribution Compounding",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(input: &PpfInput) -> FinCalcResult<()> {
    if input.annual_deposit <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annual_deposit".into(),
            reason: "Annual deposit must be positive".into(),
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
    if input.investment_years == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "investment_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_approx(actual: Decimal, expected: Decimal, tolerance: Decimal, label: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "{label}: expected ~{expected}, got {actual} (diff={diff}, tol={tolerance})"
        );
    }

    // -----------------------------------------------------------------------
    // 1. Full 15-year plan at the contribution cap
    // -----------------------------------------------------------------------
    #[test]
    fn test_fifteen_year_plan() {
        // 150000/year at 7.1% for 15 years:
        // M = 150000 * ((1.071)^15 - 1) / 0.071 ~ 37.99 lakh
        let input = PpfInput {
            annual_deposit: dec!(150000),
            annual_rate_pct: dec!(7.1),
            investment_years: 15,
        };
        let result = calculate_ppf(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.total_invested, dec!(2250000));
        assert_approx(out.maturity_amount, dec!(3798500), dec!(200), "maturity");
        assert_eq!(
            out.interest_earned,
            out.maturity_amount - out.total_invested
        );
        assert!(result.warnings.is_empty());
    }

    // -----------------------------------------------------------------------
    // 2. Zero rate reduces to deposits alone
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate() {
        let input = PpfInput {
            annual_deposit: dec!(10000),
            annual_rate_pct: Decimal::ZERO,
            investment_years: 15,
        };
        let result = calculate_ppf(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.maturity_amount, dec!(150000));
        assert_eq!(out.interest_earned, Decimal::ZERO);
        assert_eq!(out.wealth_multiplier, Decimal::ONE);
    }

    // -----------------------------------------------------------------------
    // 3. Percentage shares sum to 100
    // -----------------------------------------------------------------------
    #[test]
    fn test_shares_sum_to_hundred() {
        let input = PpfInput {
            annual_deposit: dec!(50000),
            annual_rate_pct: dec!(7.1),
            investment_years: 20,
        };
        let out = calculate_ppf(&input).unwrap().result;
        assert_approx(
            out.investment_pct + out.interest_pct,
            dec!(100),
            dec!(0.0000001),
            "pct shares",
        );
    }

    // -----------------------------------------------------------------------
    // 4. Scheme-limit warnings
    // -----------------------------------------------------------------------
    #[test]
    fn test_scheme_warnings() {
        let input = PpfInput {
            annual_deposit: dec!(200000),
            annual_rate_pct: dec!(7.1),
            investment_years: 10,
        };
        let result = calculate_ppf(&input).unwrap();
        assert_eq!(result.warnings.len(), 2);
    }

    // -----------------------------------------------------------------------
    // 5. Validation
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation() {
        let err = calculate_ppf(&PpfInput {
            annual_deposit: Decimal::ZERO,
            annual_rate_pct: dec!(7.1),
            investment_years: 15,
        })
        .unwrap_err();
        match err {
            FinCalcError::InvalidInput { field, .. } => assert_eq!(field, "annual_deposit"),
            e => panic!("Expected InvalidInput for annual_deposit, got {e:?}"),
        }

        assert!(calculate_ppf(&PpfInput {
            annual_deposit: dec!(1000),
            annual_rate_pct: dec!(7.1),
            investment_years: 0,
        })
        .is_err());
    }

    // -----------------------------------------------------------------------
    // 6. Extreme term overflows the decimal range cleanly
    // -----------------------------------------------------------------------
    #[test]
    fn test_extreme_term_is_an_error_not_a_panic() {
        let input = PpfInput {
            annual_deposit: dec!(150000),
            annual_rate_pct: dec!(7.1),
            investment_years: 5000,
        };
        match calculate_ppf(&input) {
            Err(FinCalcError::Overflow { .. }) => {}
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }
}
