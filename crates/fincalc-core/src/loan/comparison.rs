use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinCalcResult;

use super::amortization::{self, EmiInput, EmiOutput};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Two loan offers to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub loan_a: EmiInput,
    pub loan_b: EmiInput,
}

/// Which of the two loans costs less in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanOption {
    A,
    B,
}

/// Output of a two-loan comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub loan_a: EmiOutput,
    pub loan_b: EmiOutput,
    /// Absolute difference between the two monthly EMIs.
    pub emi_difference: Money,
    /// EMI difference relative to the smaller EMI, percent. Zero when the
    /// smaller EMI is zero.
    pub percentage_difference: Decimal,
    /// Absolute difference between the two total payments.
    pub total_savings: Money,
    /// Loan with the strictly lower total payment. Ties resolve to A.
    pub better_option: LoanOption,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare two loan offers by total cost.
///
/// The better option is the loan with the lower total payment; a tie keeps
/// loan A, matching the long-standing calculator behaviour.
pub fn compare_loans(
    input: &LoanComparisonInput,
) -> FinCalcResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let a = amortization::calculate_emi(&input.loan_a)?;
    let b = amortization::calculate_emi(&input.loan_b)?;
    for w in &a.warnings {
        warnings.push(format!("[loan A] {w}"));
    }
    for w in &b.warnings {
        warnings.push(format!("[loan B] {w}"));
    }

    let a = a.result;
    let b = b.result;

    let emi_difference = (a.monthly_emi - b.monthly_emi).abs();
    let min_emi = a.monthly_emi.min(b.monthly_emi);
    let percentage_difference = if min_emi.is_zero() {
        Decimal::ZERO
    } else {
        emi_difference / min_emi * dec!(100)
    };

    let total_savings = (a.total_payment - b.total_payment).abs();
    let better_option = if b.total_payment < a.total_payment {
        LoanOption::B
    } else {
        LoanOption::A
    };

    let output = LoanComparisonOutput {
        loan_a: a,
        loan_b: b,
        emi_difference,
        percentage_difference,
        total_savings,
        better_option,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Two-Loan Total Cost Comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
