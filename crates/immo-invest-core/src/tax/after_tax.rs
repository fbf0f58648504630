use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::income_tax::{marginal_tax_rates, TaxRates, TaxSettings};
use crate::error::ImmoInvestError;
use crate::projection::cashflow::{DEFAULT_PROJECTION_YEARS, MAX_PROJECTION_YEARS};
use crate::property::Property;
use crate::time_value::{checked_product, checked_sum};
use crate::types::{percent_to_rate, with_metadata, ComputationOutput, Money, Percent};
use crate::ImmoInvestResult;

const DEFAULT_VALUE_GROWTH_PERCENT: Percent = dec!(3.5);
const DEFAULT_RENT_INCREASE_PERCENT: Percent = dec!(2.0);
const DEFAULT_MANAGEMENT_COSTS: Money = dec!(1500);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Growth and cost assumptions owned by the tax tab. Independent of
/// [`crate::projection::CashflowAssumptions`], which has other defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAssumptions {
    pub value_growth_percent: Percent,
    pub rent_increase_percent: Percent,
    /// Annual management costs (constant over the projection)
    pub management_costs: Money,
    pub years: u32,
}

impl TaxAssumptions {
    /// Take the property's own figures (zero counts as unset), falling
    /// back to 3.5% value growth, 2% rent increase, 1500 management costs
    /// and a 10-year horizon.
    pub fn for_property(property: &Property) -> Self {
        Self {
            value_growth_percent: Property::figure_or(
                property.value_growth_percent,
                DEFAULT_VALUE_GROWTH_PERCENT,
            ),
            rent_increase_percent: Property::figure_or(
                property.rent_increase_percent,
                DEFAULT_RENT_INCREASE_PERCENT,
            ),
            management_costs: Property::figure_or(
                property.management_costs,
                DEFAULT_MANAGEMENT_COSTS,
            ),
            years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

/// One projected year after income tax on the net rental income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYear {
    pub year: u32,
    pub monthly_rent: Money,
    pub annual_rent: Money,
    pub annual_costs: Money,
    pub net_rental_income: Money,
    pub taxes_due: Money,
    pub after_tax_income: Money,
    pub cumulative_after_tax_income: Money,
    pub property_value: Money,
    /// Property value less purchase price
    pub value_appreciation: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfterTaxProjection {
    pub rates: TaxRates,
    /// Tax on the first year's net rental income
    pub current_year_tax: Money,
    pub current_year_after_tax: Money,
    pub years: Vec<TaxYear>,
    pub total_after_tax_income: Money,
    pub total_taxes: Money,
    /// Appreciation in the final projected year
    pub final_value_appreciation: Money,
}

#[derive(Serialize)]
struct AfterTaxInputs<'a> {
    settings: &'a TaxSettings,
    assumptions: &'a TaxAssumptions,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project net rental income after the simplified marginal income tax,
/// together with value appreciation, year by year.
pub fn project_after_tax(
    property: &Property,
    settings: &TaxSettings,
    assumptions: &TaxAssumptions,
) -> ImmoInvestResult<ComputationOutput<AfterTaxProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    property.validate()?;
    validate_assumptions(assumptions)?;

    let rates = marginal_tax_rates(settings)?;
    let tax_share = rates.total_percent / dec!(100);

    let rent_growth = Decimal::ONE + percent_to_rate(assumptions.rent_increase_percent);
    let value_growth = Decimal::ONE + percent_to_rate(assumptions.value_growth_percent);
    let annual_costs = checked_sum(
        checked_product(property.house_fee_or_zero(), dec!(12), "annual costs")?,
        assumptions.management_costs,
        "annual costs",
    )?;

    let mut current_rent = property.monthly_rent_cold;
    let mut current_value = property.total_price;
    let mut cumulative_after_tax = Decimal::ZERO;
    let mut total_taxes = Decimal::ZERO;
    let mut years = Vec::with_capacity(assumptions.years as usize);

    for year in 1..=assumptions.years {
        if year > 1 {
            current_rent = checked_product(current_rent, rent_growth, "rent growth")?;
            current_value = checked_product(current_value, value_growth, "value growth")?;
        }

        let annual_rent = checked_product(current_rent, dec!(12), "annual rent")?;
        let net_rental_income = annual_rent - annual_costs;
        let taxes_due = net_rental_income * tax_share;
        let after_tax_income = net_rental_income - taxes_due;

        cumulative_after_tax =
            checked_sum(cumulative_after_tax, after_tax_income, "cumulative after-tax income")?;
        total_taxes = checked_sum(total_taxes, taxes_due, "total taxes")?;

        years.push(TaxYear {
            year,
            monthly_rent: current_rent,
            annual_rent,
            annual_costs,
            net_rental_income,
            taxes_due,
            after_tax_income,
            cumulative_after_tax_income: cumulative_after_tax,
            property_value: current_value,
            value_appreciation: current_value - property.total_price,
        });
    }

    let first = &years[0];
    if first.net_rental_income < Decimal::ZERO {
        warnings.push(format!(
            "Net rental income of {:.2} is negative — taxes are shown as a refund",
            first.net_rental_income
        ));
    }
    if rates.income_tax_percent.is_zero() {
        warnings.push(format!(
            "Taxable income {} is within the tax-free allowance",
            rates.taxable_income
        ));
    }

    let output = AfterTaxProjection {
        current_year_tax: first.taxes_due,
        current_year_after_tax: first.after_tax_income,
        total_after_tax_income: cumulative_after_tax,
        total_taxes,
        final_value_appreciation: years[years.len() - 1].value_appreciation,
        rates,
        years,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "After-Tax Rental Projection (simplified marginal bracket)",
        &AfterTaxInputs {
            settings,
            assumptions,
        },
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_assumptions(assumptions: &TaxAssumptions) -> ImmoInvestResult<()> {
    if assumptions.years == 0 || assumptions.years > MAX_PROJECTION_YEARS {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "years".into(),
            reason: format!("Projection horizon must be between 1 and {MAX_PROJECTION_YEARS} years"),
        });
    }

    if assumptions.value_growth_percent <= dec!(-100) {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "value_growth_percent".into(),
            reason: "Value growth must be greater than -100%".into(),
        });
    }

    if assumptions.rent_increase_percent <= dec!(-100) {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "rent_increase_percent".into(),
            reason: "Rent increase must be greater than -100%".into(),
        });
    }

    if assumptions.management_costs < Decimal::ZERO {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "management_costs".into(),
            reason: "Management costs cannot be negative".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
