#![cfg(feature = "loan")]

use fincalc_core::loan::amortization::{calculate_emi, EmiInput};
use fincalc_core::loan::comparison::{compare_loans, LoanComparisonInput, LoanOption};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI scenarios
// ===========================================================================

#[test]
fn test_car_loan_scenario() {
    // 8 lakh car loan at 9.2% over 48 months.
    // i = 9.2/1200 ~ 0.0076667, EMI ~ 19,985
    let input = EmiInput {
        principal: dec!(800000),
        annual_rate_pct: dec!(9.2),
        tenure_months: 48,
    };
    let result = calculate_emi(&input).unwrap();
    let out = &result.result;

    assert!(
        out.monthly_emi > dec!(19900) && out.monthly_emi < dec!(20100),
        "Expected car loan EMI ~19,985, got {}",
        out.monthly_emi
    );
    assert_eq!(out.total_payment, out.monthly_emi * dec!(48));
    assert!(out.total_interest > dec!(150000));
}

#[test]
fn test_zero_interest_promotional_loan() {
    // 0% consumer-durable financing repays principal in equal parts
    let input = EmiInput {
        principal: dec!(120000),
        annual_rate_pct: Decimal::ZERO,
        tenure_months: 12,
    };
    let out = calculate_emi(&input).unwrap().result;

    assert_eq!(out.monthly_emi, dec!(10000));
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_shorter_tenure_costs_less_overall() {
    // Same loan over 36 vs 60 months: higher EMI, lower total interest
    let short = calculate_emi(&EmiInput {
        principal: dec!(500000),
        annual_rate_pct: dec!(8.5),
        tenure_months: 36,
    })
    .unwrap()
    .result;
    let long = calculate_emi(&EmiInput {
        principal: dec!(500000),
        annual_rate_pct: dec!(8.5),
        tenure_months: 60,
    })
    .unwrap()
    .result;

    assert!(short.monthly_emi > long.monthly_emi);
    assert!(short.total_interest < long.total_interest);
}

#[test]
fn test_emi_scales_linearly_with_principal() {
    let base = EmiInput {
        principal: dec!(250000),
        annual_rate_pct: dec!(8.5),
        tenure_months: 60,
    };
    let single = calculate_emi(&base).unwrap().result;
    let double = calculate_emi(&EmiInput {
        principal: dec!(500000),
        ..base
    })
    .unwrap()
    .result;

    let diff = (double.monthly_emi - single.monthly_emi * dec!(2)).abs();
    assert!(
        diff < dec!(0.0000001),
        "EMI should scale with principal, diff {diff}"
    );
}

// ===========================================================================
// Loan comparison scenarios
// ===========================================================================

#[test]
fn test_bank_offer_comparison() {
    // Two banks quote the same home loan at different rates
    let input = LoanComparisonInput {
        loan_a: EmiInput {
            principal: dec!(3000000),
            annual_rate_pct: dec!(8.75),
            tenure_months: 240,
        },
        loan_b: EmiInput {
            principal: dec!(3000000),
            annual_rate_pct: dec!(8.40),
            tenure_months: 240,
        },
    };
    let result = compare_loans(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.better_option, LoanOption::B);
    // 35 bps over 20 years is worth well over a lakh in total
    assert!(
        out.total_savings > dec!(100000),
        "Expected six-figure savings, got {}",
        out.total_savings
    );
    assert_eq!(
        out.total_savings,
        (out.loan_a.total_payment - out.loan_b.total_payment).abs()
    );
}

#[test]
fn test_rate_versus_tenure_tradeoff() {
    // A cheaper rate over a longer tenure can still cost more in total
    let input = LoanComparisonInput {
        loan_a: EmiInput {
            principal: dec!(1000000),
            annual_rate_pct: dec!(9.5),
            tenure_months: 60,
        },
        loan_b: EmiInput {
            principal: dec!(1000000),
            annual_rate_pct: dec!(8.0),
            tenure_months: 180,
        },
    };
    let out = compare_loans(&input).unwrap().result;

    assert!(out.loan_b.monthly_emi < out.loan_a.monthly_emi);
    assert!(out.loan_b.total_interest > out.loan_a.total_interest);
    assert_eq!(out.better_option, LoanOption::A);
}

#[test]
fn test_comparison_rejects_invalid_offer() {
    let input = LoanComparisonInput {
        loan_a: EmiInput {
            principal: dec!(500000),
            annual_rate_pct: dec!(8.5),
            tenure_months: 60,
        },
        loan_b: EmiInput {
            principal: dec!(500000),
            annual_rate_pct: dec!(8.5),
            tenure_months: 0,
        },
    };
    assert!(compare_loans(&input).is_err());
}
