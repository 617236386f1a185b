#![cfg(feature = "tax")]

use fincalc_core::tax::gst::{calculate_gst, GstInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// GST invoice scenarios
// ===========================================================================

#[test]
fn test_restaurant_bill_inclusive() {
    // 1,050 bill with 5% GST included: base 1,000, tax 50
    let input = GstInput {
        amount: dec!(1050),
        rate_pct: dec!(5),
        tax_inclusive: true,
    };
    let out = calculate_gst(&input).unwrap().result;

    assert_eq!(out.base_amount, dec!(1000));
    assert_eq!(out.tax_amount, dec!(50));
    assert_eq!(out.cgst, dec!(25));
    assert_eq!(out.sgst, dec!(25));
    assert_eq!(out.total_amount, dec!(1050));
}

#[test]
fn test_electronics_invoice_exclusive() {
    // 50,000 quote plus 28% GST
    let input = GstInput {
        amount: dec!(50000),
        rate_pct: dec!(28),
        tax_inclusive: false,
    };
    let out = calculate_gst(&input).unwrap().result;

    assert_eq!(out.tax_amount, dec!(14000));
    assert_eq!(out.cgst, dec!(7000));
    assert_eq!(out.sgst, dec!(7000));
    assert_eq!(out.total_amount, dec!(64000));
}

#[test]
fn test_exempt_essentials() {
    // 0% slab leaves the bill untouched
    let input = GstInput {
        amount: dec!(840),
        rate_pct: Decimal::ZERO,
        tax_inclusive: false,
    };
    let result = calculate_gst(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.tax_amount, Decimal::ZERO);
    assert_eq!(out.total_amount, dec!(840));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_all_slabs_preserve_invariants() {
    for rate in [dec!(0), dec!(5), dec!(12), dec!(18), dec!(28)] {
        let result = calculate_gst(&GstInput {
            amount: dec!(12345.67),
            rate_pct: rate,
            tax_inclusive: false,
        })
        .unwrap();
        let out = &result.result;

        assert_eq!(out.cgst + out.sgst, out.tax_amount, "halves at {rate}%");
        assert_eq!(
            out.base_amount + out.tax_amount,
            out.total_amount,
            "totals at {rate}%"
        );
        assert!(result.warnings.is_empty(), "slab {rate}% should not warn");
    }
}

#[test]
fn test_legacy_rate_warns() {
    // Pre-GST service-tax style rates still compute but are flagged
    let result = calculate_gst(&GstInput {
        amount: dec!(10000),
        rate_pct: dec!(14.5),
        tax_inclusive: false,
    })
    .unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.result.tax_amount, dec!(1450));
}
