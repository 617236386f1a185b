use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Advisory input bands for the Indian retail products this library models.
///
/// Breaching a band produces a warning on the computation output, never an
/// error: the formulas stay valid outside these ranges, the ranges just mark
/// what lenders and scheme rules actually offer. Callers with a different
/// policy construct their own limits.
#[derive(Debug, Clone)]
pub struct PolicyLimits {
    /// Smallest loan principal typically offered.
    pub min_loan_amount: Money,
    /// Largest loan principal typically offered.
    pub max_loan_amount: Money,
    /// Lower bound of the retail lending rate band, percent.
    pub min_loan_rate_pct: Rate,
    /// Upper bound of the retail lending rate band, percent.
    pub max_loan_rate_pct: Rate,
    /// Longest retail loan tenure in months (30 years).
    pub max_tenure_months: u32,
    /// PPF minimum annual contribution per scheme rules.
    pub min_ppf_deposit: Money,
    /// PPF maximum annual contribution per scheme rules.
    pub max_ppf_deposit: Money,
    /// PPF lock-in term in years.
    pub min_ppf_years: u32,
    /// PPF maximum term including extensions.
    pub max_ppf_years: u32,
    /// The statutory GST slab set, percent.
    pub standard_gst_rates_pct: Vec<Rate>,
}

impl Default for PolicyLimits {
    fn default() -> Self {
        PolicyLimits {
            min_loan_amount: dec!(10000),
            max_loan_amount: dec!(1000000000),
            min_loan_rate_pct: dec!(1),
            max_loan_rate_pct: dec!(50),
            max_tenure_months: 360,
            min_ppf_deposit: dec!(500),
            max_ppf_deposit: dec!(150000),
            min_ppf_years: 15,
            max_ppf_years: 50,
            standard_gst_rates_pct: vec![dec!(0), dec!(5), dec!(12), dec!(18), dec!(28)],
        }
    }
}

impl PolicyLimits {
    /// Warnings for a loan outside the typical retail band.
    pub fn loan_warnings(
        &self,
        principal: Money,
        annual_rate_pct: Rate,
        tenure_months: u32,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        if principal < self.min_loan_amount || principal > self.max_loan_amount {
            warnings.push(format!(
                "Loan amount {} is outside the typical range {} to {}",
                principal, self.min_loan_amount, self.max_loan_amount
            ));
        }
        if annual_rate_pct < self.min_loan_rate_pct || annual_rate_pct > self.max_loan_rate_pct {
            warnings.push(format!(
                "Interest rate {}% is outside the typical lending band {}% to {}%",
                annual_rate_pct, self.min_loan_rate_pct, self.max_loan_rate_pct
            ));
        }
        if tenure_months > self.max_tenure_months {
            warnings.push(format!(
                "Tenure of {} months exceeds the typical maximum of {} months",
                tenure_months, self.max_tenure_months
            ));
        }

        warnings
    }

    /// Warnings for a PPF plan outside scheme rules.
    pub fn ppf_warnings(&self, annual_deposit: Money, years: u32) -> Vec<String> {
        let mut warnings = Vec::new();

        if annual_deposit < self.min_ppf_deposit || annual_deposit > self.max_ppf_deposit {
            warnings.push(format!(
                "Annual deposit {} is outside the PPF contribution limits {} to {}",
                annual_deposit, self.min_ppf_deposit, self.max_ppf_deposit
            ));
        }
        if years < self.min_ppf_years || years > self.max_ppf_years {
            warnings.push(format!(
                "Term of {} years is outside the PPF term range {} to {} years",
                years, self.min_ppf_years, self.max_ppf_years
            ));
        }

        warnings
    }

    /// Warning when a GST rate is not one of the statutory slabs.
    pub fn gst_warnings(&self, rate_pct: Rate) -> Vec<String> {
        if self.standard_gst_rates_pct.contains(&rate_pct) {
            Vec::new()
        } else {
            vec![format!(
                "GST rate {}% is not a standard slab ({})",
                rate_pct,
                self.standard_gst_rates_pct
                    .iter()
                    .map(Decimal::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )]
        }
    }
}
