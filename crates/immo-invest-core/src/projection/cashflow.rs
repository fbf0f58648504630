use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoInvestError;
use crate::property::Property;
use crate::time_value::{checked_product, checked_sum};
use crate::types::{percent_to_rate, round_currency, with_metadata, ComputationOutput, Money, Percent};
use crate::ImmoInvestResult;

pub const DEFAULT_PROJECTION_YEARS: u32 = 10;
pub const MAX_PROJECTION_YEARS: u32 = 100;

const DEFAULT_RENT_INCREASE_PERCENT: Percent = dec!(2);
const DEFAULT_VALUE_GROWTH_PERCENT: Percent = dec!(3);
const DEFAULT_MANAGEMENT_COSTS: Money = dec!(500);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Growth and cost assumptions of the cashflow chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowAssumptions {
    /// Annual rent increase
    pub rent_increase_percent: Percent,
    /// Annual property value growth
    pub value_growth_percent: Percent,
    /// Annual management costs (constant over the projection)
    pub management_costs: Money,
    /// Number of projected years
    pub years: u32,
}

impl CashflowAssumptions {
    /// Take the property's own figures (zero counts as unset), falling
    /// back to 2% rent increase, 3% value growth, 500 management costs and
    /// a 10-year horizon.
    pub fn for_property(property: &Property) -> Self {
        Self {
            rent_increase_percent: Property::figure_or(
                property.rent_increase_percent,
                DEFAULT_RENT_INCREASE_PERCENT,
            ),
            value_growth_percent: Property::figure_or(
                property.value_growth_percent,
                DEFAULT_VALUE_GROWTH_PERCENT,
            ),
            management_costs: Property::figure_or(
                property.management_costs,
                DEFAULT_MANAGEMENT_COSTS,
            ),
            years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

/// One projected year. Monetary fields are rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowYear {
    /// 1-based year index
    pub year: u32,
    pub monthly_rent: Money,
    pub annual_rent: Money,
    pub annual_costs: Money,
    pub net_cashflow: Money,
    pub cumulative_cashflow: Money,
    pub property_value: Money,
    /// Cumulative cashflow plus value change since purchase
    pub total_return: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowProjection {
    pub years: Vec<CashflowYear>,
    pub final_property_value: Money,
    pub final_cumulative_cashflow: Money,
    pub final_total_return: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project rent, costs, net cashflow and property value year by year.
///
/// Costs stay constant; rent and value grow once per year after the first.
/// Figures that leave the `Decimal` range fail with
/// [`ImmoInvestError::Overflow`].
/// Rounding is applied only to the emitted records, never to the running
/// rent, value or cumulative totals.
pub fn project_cashflow(
    property: &Property,
    assumptions: &CashflowAssumptions,
) -> ImmoInvestResult<ComputationOutput<CashflowProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    property.validate()?;
    validate_assumptions(assumptions)?;

    let rent_growth = Decimal::ONE + percent_to_rate(assumptions.rent_increase_percent);
    let value_growth = Decimal::ONE + percent_to_rate(assumptions.value_growth_percent);
    let annual_costs = checked_sum(
        checked_product(property.house_fee_or_zero(), dec!(12), "annual costs")?,
        assumptions.management_costs,
        "annual costs",
    )?;

    let mut current_rent = property.monthly_rent_cold;
    let mut current_value = property.total_price;
    let mut cumulative = Decimal::ZERO;
    let mut years = Vec::with_capacity(assumptions.years as usize);

    for year in 1..=assumptions.years {
        if year > 1 {
            current_rent = checked_product(current_rent, rent_growth, "rent growth")?;
            current_value = checked_product(current_value, value_growth, "value growth")?;
        }

        let annual_rent = checked_product(current_rent, dec!(12), "annual rent")?;
        let net_cashflow = annual_rent - annual_costs;
        cumulative = checked_sum(cumulative, net_cashflow, "cumulative cashflow")?;
        let total_return = checked_sum(
            cumulative,
            current_value - property.total_price,
            "total return",
        )?;

        years.push(CashflowYear {
            year,
            monthly_rent: round_currency(current_rent),
            annual_rent: round_currency(annual_rent),
            annual_costs: round_currency(annual_costs),
            net_cashflow: round_currency(net_cashflow),
            cumulative_cashflow: round_currency(cumulative),
            property_value: round_currency(current_value),
            total_return: round_currency(total_return),
        });
    }

    if let Some(first) = years.first() {
        if first.net_cashflow < Decimal::ZERO {
            warnings.push(format!(
                "Year 1 net cashflow of {} is negative — costs exceed rent",
                first.net_cashflow
            ));
        }
    }
    if assumptions.value_growth_percent < Decimal::ZERO {
        warnings.push(format!(
            "Value growth of {}% projects a falling property value",
            assumptions.value_growth_percent
        ));
    }

    // years >= 1 is validated above
    let last = &years[years.len() - 1];
    let output = CashflowProjection {
        final_property_value: last.property_value,
        final_cumulative_cashflow: last.cumulative_cashflow,
        final_total_return: last.total_return,
        years,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Cashflow and Value Projection",
        assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_assumptions(assumptions: &CashflowAssumptions) -> ImmoInvestResult<()> {
    if assumptions.years == 0 || assumptions.years > MAX_PROJECTION_YEARS {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "years".into(),
            reason: format!("Projection horizon must be between 1 and {MAX_PROJECTION_YEARS} years"),
        });
    }

    if assumptions.rent_increase_percent <= dec!(-100) {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "rent_increase_percent".into(),
            reason: "Rent increase must be greater than -100%".into(),
        });
    }

    if assumptions.value_growth_percent <= dec!(-100) {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "value_growth_percent".into(),
            reason: "Value growth must be greater than -100%".into(),
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
