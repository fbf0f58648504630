use immo_invest_core::financing::{analyze_investment, compute_loan, InvestmentAssumptions, YieldRating};
use immo_invest_core::{analyze_property, ImmoInvestError, Property};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

fn within_relative(actual: Decimal, expected: Decimal, tolerance: Decimal) -> bool {
    if expected.is_zero() {
        return actual.abs() <= tolerance;
    }
    ((actual - expected) / expected).abs() <= tolerance
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_scenario_500k_20pct_25y_3_5pct() {
    let loan = compute_loan(dec!(500000), dec!(20), 25, dec!(3.5)).unwrap();
    assert_eq!(loan.loan_amount, dec!(400000));

    // Closed form with powd, independent of the iterative compounding
    let r = dec!(0.035) / dec!(12);
    let factor = (Decimal::ONE + r).powd(dec!(300));
    let expected = dec!(400000) * r * factor / (factor - Decimal::ONE);

    assert!(
        within_relative(loan.monthly_payment, expected, dec!(0.000001)),
        "monthly payment {} vs closed form {}",
        loan.monthly_payment,
        expected
    );
    assert!((loan.monthly_payment - dec!(2002.49)).abs() < dec!(0.01));
}

#[test]
fn test_payment_and_interest_identities_across_slider_grid() {
    for down in [dec!(10), dec!(25), dec!(50)] {
        for term in [15u32, 25, 35] {
            for rate in [dec!(2.0), dec!(3.7), dec!(6.0)] {
                let loan = compute_loan(dec!(389000), down, term, rate).unwrap();
                let months = Decimal::from(term * 12);
                assert!(within_relative(
                    loan.total_payment,
                    loan.monthly_payment * months,
                    dec!(0.000001)
                ));
                assert!(within_relative(
                    loan.total_interest,
                    loan.total_payment - loan.loan_amount,
                    dec!(0.000001)
                ));
            }
        }
    }
}

#[test]
fn test_zero_interest_linear_repayment() {
    let loan = compute_loan(dec!(450000), dec!(30), 30, Decimal::ZERO).unwrap();
    let n = Decimal::from(360);
    assert!(within_relative(loan.monthly_payment * n, loan.loan_amount, dec!(0.000001)));
    assert!(loan.total_interest.abs() < dec!(0.0001));
}

// ===========================================================================
// Investment calculator
// ===========================================================================

#[test]
fn test_investment_break_even_and_rating() {
    let mut p = Property::new(dec!(250000), dec!(1800));
    p.house_fee = Some(dec!(150));
    let mut a = InvestmentAssumptions::for_property(&p);
    a.loan.down_payment_percent = dec!(40);

    let out = analyze_investment(&p, &a).unwrap().result;

    // loan 150000 at 3.5% / 25y => ~750.93; costs 300
    assert!((out.loan.monthly_payment - dec!(750.93)).abs() < dec!(0.01));
    assert!(out.cashflow_positive);
    assert_eq!(out.yield_rating, YieldRating::Attractive);

    // equity 100000, annual cashflow ~8988.8 => positive in year 12
    assert_eq!(out.break_even_year, Some(12));
}

#[test]
fn test_investment_zero_interest_uses_fallback() {
    let p = Property::new(dec!(240000), dec!(1200));
    let mut a = InvestmentAssumptions::for_property(&p);
    a.loan.annual_interest_rate_percent = Decimal::ZERO;
    a.loan.loan_term_years = 20;

    let out = analyze_investment(&p, &a).unwrap();
    // 192000 / 240 = 800
    assert_eq!(out.result.loan.monthly_payment, dec!(800));
    assert!(out.warnings.iter().any(|w| w.contains("Interest rate")));
}

#[test]
fn test_investment_error_contracts() {
    let p = Property::new(dec!(240000), dec!(1200));

    let mut no_equity = InvestmentAssumptions::for_property(&p);
    no_equity.loan.down_payment_percent = Decimal::ZERO;
    assert!(matches!(
        analyze_investment(&p, &no_equity).unwrap_err(),
        ImmoInvestError::InvalidAssumption { .. }
    ));

    let free = Property::new(Decimal::ZERO, dec!(1200));
    assert!(matches!(
        analyze_investment(&free, &InvestmentAssumptions::for_property(&free)).unwrap_err(),
        ImmoInvestError::InvalidProperty { .. }
    ));
}

#[test]
fn test_investment_extreme_rate_is_an_error() {
    let p = Property::new(dec!(500000), dec!(1500));
    let mut a = InvestmentAssumptions::for_property(&p);
    a.loan.annual_interest_rate_percent = dec!(1000);
    a.loan.loan_term_years = 35;
    assert!(matches!(
        analyze_investment(&p, &a).unwrap_err(),
        ImmoInvestError::Overflow { .. }
    ));
}

// ===========================================================================
// Property key metrics
// ===========================================================================

#[test]
fn test_property_metrics() {
    let mut p = Property::new(dec!(500000), dec!(1500));
    p.size_m2 = dec!(80);
    let out = analyze_property(&p).unwrap().result;
    assert_eq!(out.price_per_m2, dec!(6250));
    // 18000 / 500000 = 3.6%
    assert_eq!(out.gross_rental_yield_percent, dec!(3.6));
}

#[test]
fn test_property_metrics_require_size() {
    let p = Property::new(dec!(500000), dec!(1500));
    assert!(matches!(
        analyze_property(&p).unwrap_err(),
        ImmoInvestError::InvalidProperty { .. }
    ));
}
