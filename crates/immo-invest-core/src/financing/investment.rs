use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::amortization::{LoanAssumptions, LoanResult};
use crate::error::ImmoInvestError;
use crate::property::Property;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::ImmoInvestResult;

/// Break-even search horizon in years.
pub const BREAK_EVEN_HORIZON_YEARS: u32 = 30;

/// Flat monthly allowance (maintenance reserve) added to the house fee
/// when the calculator opens.
const DEFAULT_MAINTENANCE_ALLOWANCE: Money = dec!(150);

/// Equity yield above which an investment is rated attractive.
const ATTRACTIVE_YIELD_PERCENT: Percent = dec!(5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the investment calculator lets the user adjust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAssumptions {
    #[serde(flatten)]
    pub loan: LoanAssumptions,
    /// Monthly cold rent achieved
    pub monthly_rent: Money,
    /// Monthly owner costs (house fee, management, maintenance)
    pub monthly_costs: Money,
}

impl InvestmentAssumptions {
    /// Calculator defaults for a property: default financing, the listed
    /// cold rent, and the house fee plus a 150 maintenance allowance.
    pub fn for_property(property: &Property) -> Self {
        Self {
            loan: LoanAssumptions::default(),
            monthly_rent: property.monthly_rent_cold,
            monthly_costs: property.house_fee_or_zero() + DEFAULT_MAINTENANCE_ALLOWANCE,
        }
    }
}

/// Qualitative rating of the equity yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldRating {
    /// Above 5% on equity
    Attractive,
    /// Positive but at most 5%
    Moderate,
    /// Zero or negative
    Negative,
}

impl YieldRating {
    pub fn from_yield(annual_yield_percent: Percent) -> Self {
        if annual_yield_percent > ATTRACTIVE_YIELD_PERCENT {
            YieldRating::Attractive
        } else if annual_yield_percent > Decimal::ZERO {
            YieldRating::Moderate
        } else {
            YieldRating::Negative
        }
    }
}

/// Financing plus monthly cashflow view of an investment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    #[serde(flatten)]
    pub loan: LoanResult,
    pub monthly_rent: Money,
    pub monthly_costs: Money,
    /// Rent less loan instalment less owner costs
    pub monthly_cashflow: Money,
    pub annual_cashflow: Money,
    /// Annual cashflow relative to the equity invested, in percent
    pub annual_yield_percent: Percent,
    /// First year in which cumulative cashflow net of the down payment is
    /// positive; `None` when that does not happen within 30 years.
    pub break_even_year: Option<u32>,
    pub cashflow_positive: bool,
    pub yield_rating: YieldRating,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the investment calculator: annuity loan, monthly cashflow, equity
/// yield and break-even year.
pub fn analyze_investment(
    property: &Property,
    assumptions: &InvestmentAssumptions,
) -> ImmoInvestResult<ComputationOutput<InvestmentAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(property, assumptions, &mut warnings)?;

    let loan = assumptions.loan.compute(property.total_price)?;

    let monthly_cashflow = assumptions.monthly_rent - loan.monthly_payment - assumptions.monthly_costs;
    let annual_cashflow = monthly_cashflow * dec!(12);

    let annual_yield_percent = annual_cashflow / loan.down_payment_amount * dec!(100);

    let break_even_year = find_break_even_year(loan.down_payment_amount, annual_cashflow);

    if monthly_cashflow < Decimal::ZERO {
        warnings.push(format!(
            "Monthly cashflow of {:.2} is negative — the investment requires a monthly top-up",
            monthly_cashflow
        ));
    }
    if break_even_year.is_none() {
        warnings.push(format!(
            "No break-even within {BREAK_EVEN_HORIZON_YEARS} years"
        ));
    }

    let output = InvestmentAnalysis {
        monthly_rent: assumptions.monthly_rent,
        monthly_costs: assumptions.monthly_costs,
        monthly_cashflow,
        annual_cashflow,
        annual_yield_percent,
        break_even_year,
        cashflow_positive: monthly_cashflow > Decimal::ZERO,
        yield_rating: YieldRating::from_yield(annual_yield_percent),
        loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Annuity Loan Investment Analysis",
        assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Smallest year in `1..=30` where `-down_payment + year * annual_cashflow`
/// turns strictly positive.
pub fn find_break_even_year(down_payment_amount: Money, annual_cashflow: Money) -> Option<u32> {
    let mut cumulative = -down_payment_amount;
    for year in 1..=BREAK_EVEN_HORIZON_YEARS {
        cumulative += annual_cashflow;
        if cumulative > Decimal::ZERO {
            return Some(year);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(
    property: &Property,
    assumptions: &InvestmentAssumptions,
    warnings: &mut Vec<String>,
) -> ImmoInvestResult<()> {
    property.validate()?;
    assumptions.loan.validate()?;

    if assumptions.loan.down_payment_percent.is_zero() {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "down_payment_percent".into(),
            reason: "Equity yield is undefined without a down payment".into(),
        });
    }

    if assumptions.monthly_rent < Decimal::ZERO {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "monthly_rent".into(),
            reason: "Monthly rent cannot be negative".into(),
        });
    }

    if assumptions.monthly_costs < Decimal::ZERO {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "monthly_costs".into(),
            reason: "Monthly costs cannot be negative".into(),
        });
    }

    assumptions.loan.range_warnings(warnings);

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_property() -> Property {
        let mut p = Property::new(dec!(500000), dec!(1500));
        p.house_fee = Some(dec!(200));
        p
    }

    #[test]
    fn test_defaults_for_property() {
        let a = InvestmentAssumptions::for_property(&sample_property());
        assert_eq!(a.monthly_rent, dec!(1500));
        assert_eq!(a.monthly_costs, dec!(350));
        assert_eq!(a.loan.down_payment_percent, dec!(20));
        assert_eq!(a.loan.loan_term_years, 25);
        assert_eq!(a.loan.annual_interest_rate_percent, dec!(3.5));
    }

    #[test]
    fn test_monthly_cashflow() {
        let p = sample_property();
        let a = InvestmentAssumptions::for_property(&p);
        let out = analyze_investment(&p, &a).unwrap().result;

        assert_eq!(
            out.monthly_cashflow,
            dec!(1500) - out.loan.monthly_payment - dec!(350)
        );
        assert_eq!(out.annual_cashflow, out.monthly_cashflow * dec!(12));
        // 1500 - ~2002.49 - 350 < 0
        assert!(!out.cashflow_positive);
        assert_eq!(out.yield_rating, YieldRating::Negative);
        assert_eq!(out.break_even_year, None);
    }

    #[test]
    fn test_annual_yield_on_equity() {
        let p = sample_property();
        let mut a = InvestmentAssumptions::for_property(&p);
        a.monthly_rent = dec!(3000);
        let out = analyze_investment(&p, &a).unwrap().result;

        let expected = out.annual_cashflow / dec!(100000) * dec!(100);
        assert_eq!(out.annual_yield_percent, expected);
    }

    #[test]
    fn test_break_even_year() {
        // 100000 equity, 12000/yr => cumulative -4000 after 8 years, +8000 after 9
        assert_eq!(find_break_even_year(dec!(100000), dec!(12000)), Some(9));
        // exactly zero is not yet break-even
        assert_eq!(find_break_even_year(dec!(100000), dec!(10000)), Some(11));
        assert_eq!(find_break_even_year(dec!(100000), dec!(-500)), None);
        assert_eq!(find_break_even_year(dec!(100000), dec!(3000)), None);
    }

    #[test]
    fn test_break_even_capped_at_horizon() {
        // 100000 / 3334 => 30 years
        assert_eq!(find_break_even_year(dec!(100000), dec!(3334)), Some(30));
    }

    #[test]
    fn test_yield_rating_thresholds() {
        assert_eq!(YieldRating::from_yield(dec!(5.01)), YieldRating::Attractive);
        assert_eq!(YieldRating::from_yield(dec!(5)), YieldRating::Moderate);
        assert_eq!(YieldRating::from_yield(dec!(0.1)), YieldRating::Moderate);
        assert_eq!(YieldRating::from_yield(Decimal::ZERO), YieldRating::Negative);
    }

    #[test]
    fn test_zero_down_payment_rejected() {
        let p = sample_property();
        let mut a = InvestmentAssumptions::for_property(&p);
        a.loan.down_payment_percent = Decimal::ZERO;
        let err = analyze_investment(&p, &a).unwrap_err();
        assert!(matches!(err, ImmoInvestError::InvalidAssumption { .. }));
    }

    #[test]
    fn test_negative_cashflow_warning() {
        let p = sample_property();
        let a = InvestmentAssumptions::for_property(&p);
        let out = analyze_investment(&p, &a).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
        assert!(out.warnings.iter().any(|w| w.contains("No break-even")));
    }

    #[test]
    fn test_positive_investment() {
        let p = sample_property();
        let mut a = InvestmentAssumptions::for_property(&p);
        a.loan.down_payment_percent = dec!(50);
        a.monthly_rent = dec!(2500);
        let out = analyze_investment(&p, &a).unwrap();
        let r = &out.result;

        assert!(r.cashflow_positive);
        assert!(r.break_even_year.is_some());
        assert!(out.warnings.is_empty(), "warnings: {:?}", out.warnings);
    }

    #[test]
    fn test_methodology_string() {
        let p = sample_property();
        let a = InvestmentAssumptions::for_property(&p);
        let out = analyze_investment(&p, &a).unwrap();
        assert_eq!(out.methodology, "Annuity Loan Investment Analysis");
    }
}
