use immo_invest_core::projection::{project_cashflow, CashflowAssumptions};
use immo_invest_core::tax::{
    marginal_tax_rates, project_after_tax, FederalState, MaritalStatus, TaxAssumptions,
    TaxSettings,
};
use immo_invest_core::{ImmoInvestError, Property};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn listing() -> Property {
    let mut p = Property::new(dec!(500000), dec!(1500));
    p.house_fee = Some(dec!(200));
    p
}

// ===========================================================================
// Rate lookup
// ===========================================================================

#[test]
fn test_scenario_80k_single_no_church() {
    for state in FederalState::ALL {
        let settings = TaxSettings {
            gross_annual_income: dec!(80000),
            marital_status: MaritalStatus::Single,
            church_tax: false,
            state,
        };
        let rates = marginal_tax_rates(&settings).unwrap();
        assert_eq!(rates.income_tax_percent, dec!(42));
        assert_eq!(rates.solidarity_percent, dec!(2.31));
        assert_eq!(rates.church_tax_percent, Decimal::ZERO);
        assert_eq!(rates.total_percent, dec!(44.31));
    }
}

#[test]
fn test_top_bracket_with_church_tax() {
    let settings = TaxSettings {
        gross_annual_income: dec!(300000),
        marital_status: MaritalStatus::Single,
        church_tax: true,
        state: FederalState::NordrheinWestfalen,
    };
    let rates = marginal_tax_rates(&settings).unwrap();
    // 45 + 2.475 + 4.05
    assert_eq!(rates.total_percent, dec!(51.525));
}

#[test]
fn test_married_couple_drops_a_bracket() {
    let single = marginal_tax_rates(&TaxSettings {
        gross_annual_income: dec!(120000),
        ..TaxSettings::default()
    })
    .unwrap();
    let married = marginal_tax_rates(&TaxSettings {
        gross_annual_income: dec!(120000),
        marital_status: MaritalStatus::Married,
        ..TaxSettings::default()
    })
    .unwrap();
    assert_eq!(single.income_tax_percent, dec!(42));
    assert_eq!(married.income_tax_percent, dec!(24));
}

// ===========================================================================
// After-tax projection
// ===========================================================================

#[test]
fn test_after_tax_rows_consistent() {
    let p = listing();
    let out = project_after_tax(&p, &TaxSettings::default(), &TaxAssumptions::for_property(&p))
        .unwrap()
        .result;

    assert_eq!(out.years.len(), 10);
    let share = out.rates.total_percent / dec!(100);
    for y in &out.years {
        assert_eq!(y.net_rental_income, y.annual_rent - y.annual_costs);
        assert_eq!(y.taxes_due, y.net_rental_income * share);
        assert_eq!(y.after_tax_income, y.net_rental_income - y.taxes_due);
        assert_eq!(y.value_appreciation, y.property_value - p.total_price);
    }
}

#[test]
fn test_tabs_keep_separate_assumptions() {
    // Neither growth nor management costs are set on the listing, so each
    // tab falls back to its own defaults.
    let p = listing();

    let cashflow = project_cashflow(&p, &CashflowAssumptions::for_property(&p))
        .unwrap()
        .result;
    let after_tax = project_after_tax(&p, &TaxSettings::default(), &TaxAssumptions::for_property(&p))
        .unwrap()
        .result;

    // 200*12 + 500 vs 200*12 + 1500
    assert_eq!(cashflow.years[0].annual_costs, dec!(2900));
    assert_eq!(after_tax.years[0].annual_costs, dec!(3900));

    // 3% vs 3.5% value growth
    assert_eq!(cashflow.years[1].property_value, dec!(515000));
    assert_eq!(after_tax.years[1].property_value, dec!(517500));
}

#[test]
fn test_after_tax_totals() {
    let p = listing();
    let out = project_after_tax(&p, &TaxSettings::default(), &TaxAssumptions::for_property(&p))
        .unwrap()
        .result;

    let net_total: Decimal = out.years.iter().map(|y| y.net_rental_income).sum();
    let recombined = out.total_after_tax_income + out.total_taxes;
    assert!((recombined - net_total).abs() < dec!(0.000001));
    assert!(out.final_value_appreciation > Decimal::ZERO);
}

#[test]
fn test_methodology_and_assumption_echo() {
    let p = listing();
    let out = project_after_tax(&p, &TaxSettings::default(), &TaxAssumptions::for_property(&p))
        .unwrap();
    assert_eq!(
        out.methodology,
        "After-Tax Rental Projection (simplified marginal bracket)"
    );
    assert_eq!(out.assumptions["settings"]["state"], "Bayern");
    assert_eq!(out.assumptions["assumptions"]["years"], 10);
}

#[test]
fn test_runaway_rent_growth_is_an_error() {
    let p = listing();
    let mut a = TaxAssumptions::for_property(&p);
    a.rent_increase_percent = dec!(1000);
    a.years = 100;
    assert!(matches!(
        project_after_tax(&p, &TaxSettings::default(), &a).unwrap_err(),
        ImmoInvestError::Overflow { .. }
    ));
}
