use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ImmoInvestError;
use crate::time_value::{annuity_payment, checked_product};
use crate::types::{percent_to_rate, Money, Percent};
use crate::ImmoInvestResult;

/// Longest loan term accepted, in years.
const MAX_LOAN_TERM_YEARS: u32 = 100;

/// Financing assumptions, as set on the calculator sliders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAssumptions {
    /// Equity share of the purchase price (0–100)
    pub down_payment_percent: Percent,
    /// Loan term in whole years
    pub loan_term_years: u32,
    /// Nominal annual interest rate
    pub annual_interest_rate_percent: Percent,
}

impl Default for LoanAssumptions {
    fn default() -> Self {
        Self {
            down_payment_percent: dec!(20),
            loan_term_years: 25,
            annual_interest_rate_percent: dec!(3.5),
        }
    }
}

/// Annuity loan figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub down_payment_amount: Money,
    pub loan_amount: Money,
    /// Fixed monthly instalment (interest + principal)
    pub monthly_payment: Money,
    /// Total interest over the full term
    pub total_interest: Money,
    /// Sum of all instalments
    pub total_payment: Money,
    pub number_of_payments: u32,
}

impl LoanAssumptions {
    pub fn validate(&self) -> ImmoInvestResult<()> {
        if self.down_payment_percent < Decimal::ZERO || self.down_payment_percent > dec!(100) {
            return Err(ImmoInvestError::InvalidAssumption {
                field: "down_payment_percent".into(),
                reason: "Down payment must be between 0% and 100%".into(),
            });
        }

        if self.loan_term_years == 0 || self.loan_term_years > MAX_LOAN_TERM_YEARS {
            return Err(ImmoInvestError::InvalidAssumption {
                field: "loan_term_years".into(),
                reason: format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years"),
            });
        }

        if self.annual_interest_rate_percent < Decimal::ZERO {
            return Err(ImmoInvestError::InvalidAssumption {
                field: "annual_interest_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }

        Ok(())
    }

    /// [`compute_loan`] for these assumptions.
    pub fn compute(&self, total_price: Money) -> ImmoInvestResult<LoanResult> {
        compute_loan(
            total_price,
            self.down_payment_percent,
            self.loan_term_years,
            self.annual_interest_rate_percent,
        )
    }

    /// Warnings for values outside the calculator's slider ranges.
    pub(crate) fn range_warnings(&self, warnings: &mut Vec<String>) {
        if self.down_payment_percent < dec!(10) || self.down_payment_percent > dec!(50) {
            warnings.push(format!(
                "Down payment {}% is outside the typical 10–50% range",
                self.down_payment_percent
            ));
        }
        if !(15..=35).contains(&self.loan_term_years) {
            warnings.push(format!(
                "Loan term of {} years is outside the typical 15–35 year range",
                self.loan_term_years
            ));
        }
        if self.annual_interest_rate_percent < dec!(2) || self.annual_interest_rate_percent > dec!(6) {
            warnings.push(format!(
                "Interest rate {}% is outside the typical 2.0–6.0% range",
                self.annual_interest_rate_percent
            ));
        }
    }
}

/// Fixed monthly payment, total interest and total repayment of an
/// annuity loan financing `total_price` less the down payment.
pub fn compute_loan(
    total_price: Money,
    down_payment_percent: Percent,
    loan_term_years: u32,
    annual_interest_rate_percent: Percent,
) -> ImmoInvestResult<LoanResult> {
    if total_price <= Decimal::ZERO {
        return Err(ImmoInvestError::InvalidProperty {
            field: "total_price".into(),
            reason: "Total price must be positive".into(),
        });
    }

    LoanAssumptions {
        down_payment_percent,
        loan_term_years,
        annual_interest_rate_percent,
    }
    .validate()?;

    let down_payment_amount = total_price * down_payment_percent / dec!(100);
    let loan_amount = total_price - down_payment_amount;

    let monthly_rate = percent_to_rate(annual_interest_rate_percent) / dec!(12);
    let number_of_payments = loan_term_years * 12;

    let monthly_payment = annuity_payment(loan_amount, monthly_rate, number_of_payments)?;
    let total_payment = checked_product(
        monthly_payment,
        Decimal::from(number_of_payments),
        "total loan repayment",
    )?;
    let total_interest = total_payment - loan_amount;

    tracing::debug!(
        %loan_amount,
        %monthly_payment,
        number_of_payments,
        "annuity loan computed"
    );

    Ok(LoanResult {
        down_payment_amount,
        loan_amount,
        monthly_payment,
        total_interest,
        total_payment,
        number_of_payments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_close(a: Decimal, b: Decimal) -> bool {
        if b.is_zero() {
            return a.abs() < dec!(0.000001);
        }
        ((a - b) / b).abs() < dec!(0.000001)
    }

    #[test]
    fn test_loan_amount_from_down_payment() {
        let loan = compute_loan(dec!(500000), dec!(20), 25, dec!(3.5)).unwrap();
        assert_eq!(loan.down_payment_amount, dec!(100000));
        assert_eq!(loan.loan_amount, dec!(400000));
        assert_eq!(loan.number_of_payments, 300);
    }

    #[test]
    fn test_monthly_payment_closed_form() {
        let loan = compute_loan(dec!(500000), dec!(20), 25, dec!(3.5)).unwrap();
        // 400000 * r(1+r)^300 / ((1+r)^300 - 1), r = 0.035/12 => ~2002.49
        assert!(
            (loan.monthly_payment - dec!(2002.49)).abs() < dec!(0.01),
            "monthly payment {}",
            loan.monthly_payment
        );
    }

    #[test]
    fn test_totals_identities() {
        let loan = compute_loan(dec!(420000), dec!(15), 30, dec!(4.2)).unwrap();
        assert!(rel_close(loan.total_payment, loan.monthly_payment * dec!(360)));
        assert!(rel_close(loan.total_interest, loan.total_payment - loan.loan_amount));
        assert!(loan.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_interest_fallback() {
        let loan = compute_loan(dec!(300000), dec!(20), 20, Decimal::ZERO).unwrap();
        // 240000 / 240 = 1000
        assert_eq!(loan.monthly_payment, dec!(1000));
        assert!(rel_close(loan.monthly_payment * dec!(240), loan.loan_amount));
        assert!(loan.total_interest.abs() < dec!(0.000001));
    }

    #[test]
    fn test_full_equity_no_loan() {
        let loan = compute_loan(dec!(300000), dec!(100), 25, dec!(3.5)).unwrap();
        assert_eq!(loan.loan_amount, Decimal::ZERO);
        assert_eq!(loan.monthly_payment, Decimal::ZERO);
        assert_eq!(loan.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_price_rejected() {
        let err = compute_loan(Decimal::ZERO, dec!(20), 25, dec!(3.5)).unwrap_err();
        assert!(matches!(err, ImmoInvestError::InvalidProperty { .. }));
    }

    #[test]
    fn test_invalid_assumptions_rejected() {
        assert!(compute_loan(dec!(300000), dec!(120), 25, dec!(3.5)).is_err());
        assert!(compute_loan(dec!(300000), dec!(-1), 25, dec!(3.5)).is_err());
        assert!(compute_loan(dec!(300000), dec!(20), 0, dec!(3.5)).is_err());
        assert!(compute_loan(dec!(300000), dec!(20), 25, dec!(-0.5)).is_err());
    }

    #[test]
    fn test_higher_rate_higher_payment() {
        let low = compute_loan(dec!(400000), dec!(20), 25, dec!(2.0)).unwrap();
        let high = compute_loan(dec!(400000), dec!(20), 25, dec!(6.0)).unwrap();
        assert!(high.monthly_payment > low.monthly_payment);
        assert!(high.total_interest > low.total_interest);
    }

    #[test]
    fn test_range_warnings() {
        let mut warnings = Vec::new();
        LoanAssumptions::default().range_warnings(&mut warnings);
        assert!(warnings.is_empty());

        let wide = LoanAssumptions {
            down_payment_percent: dec!(5),
            loan_term_years: 40,
            annual_interest_rate_percent: dec!(7.5),
        };
        wide.range_warnings(&mut warnings);
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_extreme_rate_reports_overflow() {
        // 1000% a year over 35 years passes validation but exceeds Decimal range
        let err = compute_loan(dec!(500000), dec!(20), 35, dec!(1000)).unwrap_err();
        assert!(matches!(err, ImmoInvestError::Overflow { .. }));
    }
}
