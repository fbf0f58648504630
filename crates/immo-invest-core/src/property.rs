use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoInvestError;
use crate::types::{round_currency, with_metadata, ComputationOutput, Money, Percent};
use crate::ImmoInvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Sales status of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

/// A property listing as the calculators see it. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Immutable listing identifier
    #[serde(default)]
    pub id: u64,
    /// Living area in square metres
    #[serde(default)]
    pub size_m2: Decimal,
    /// Purchase price
    pub total_price: Money,
    /// Monthly cold rent (Kaltmiete), excluding service charges
    pub monthly_rent_cold: Money,
    /// Monthly condominium fee (Hausgeld)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_fee: Option<Money>,
    /// Annual property management costs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_costs: Option<Money>,
    /// Expected annual value growth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_growth_percent: Option<Percent>,
    /// Expected annual rent increase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_increase_percent: Option<Percent>,
    /// Buyer commission on the purchase price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<Percent>,
    #[serde(default)]
    pub status: PropertyStatus,
}

/// Key figures shown on listing cards and the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyMetrics {
    /// Price per square metre, rounded to whole currency units
    pub price_per_m2: Money,
    /// Annual cold rent / purchase price, in percent
    pub gross_rental_yield_percent: Percent,
    /// Annual cold rent
    pub annual_rent_cold: Money,
    /// Commission amount, if a commission rate is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<Money>,
    /// Purchase price including commission
    pub total_acquisition_cost: Money,
}

impl Property {
    /// Convenience constructor with only the required figures set.
    pub fn new(total_price: Money, monthly_rent_cold: Money) -> Self {
        Self {
            id: 0,
            size_m2: Decimal::ZERO,
            total_price,
            monthly_rent_cold,
            house_fee: None,
            management_costs: None,
            value_growth_percent: None,
            rent_increase_percent: None,
            commission_percent: None,
            status: PropertyStatus::Available,
        }
    }

    /// Monthly condominium fee, zero when not recorded.
    pub fn house_fee_or_zero(&self) -> Money {
        self.house_fee.unwrap_or(Decimal::ZERO)
    }

    /// A listing figure for calculator defaults. Zero counts as not
    /// recorded, so `Some(0)` falls back to `default` like `None`.
    pub fn figure_or(value: Option<Decimal>, default: Decimal) -> Decimal {
        value.filter(|v| !v.is_zero()).unwrap_or(default)
    }

    /// Checks the figures every calculator relies on. `total_price` must be
    /// positive; it divides the yield and appreciation figures.
    pub fn validate(&self) -> ImmoInvestResult<()> {
        if self.total_price <= Decimal::ZERO {
            return Err(ImmoInvestError::InvalidProperty {
                field: "total_price".into(),
                reason: "Total price must be positive".into(),
            });
        }

        if self.monthly_rent_cold < Decimal::ZERO {
            return Err(ImmoInvestError::InvalidProperty {
                field: "monthly_rent_cold".into(),
                reason: "Monthly cold rent cannot be negative".into(),
            });
        }

        for (field, value) in [
            ("house_fee", self.house_fee),
            ("management_costs", self.management_costs),
            ("commission_percent", self.commission_percent),
        ] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(ImmoInvestError::InvalidProperty {
                    field: field.into(),
                    reason: "Value cannot be negative".into(),
                });
            }
        }

        for (field, value) in [
            ("value_growth_percent", self.value_growth_percent),
            ("rent_increase_percent", self.rent_increase_percent),
        ] {
            if value.is_some_and(|v| v <= dec!(-100)) {
                return Err(ImmoInvestError::InvalidProperty {
                    field: field.into(),
                    reason: "Growth must be greater than -100%".into(),
                });
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the listing key figures: price per m², gross rental yield and
/// commission.
pub fn analyze_property(property: &Property) -> ImmoInvestResult<ComputationOutput<PropertyMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    property.validate()?;

    if property.size_m2 <= Decimal::ZERO {
        return Err(ImmoInvestError::InvalidProperty {
            field: "size_m2".into(),
            reason: "Living area must be positive to compute price per m²".into(),
        });
    }

    let price_per_m2 = round_currency(property.total_price / property.size_m2);
    let annual_rent_cold = property.monthly_rent_cold * dec!(12);
    let gross_rental_yield_percent = annual_rent_cold / property.total_price * dec!(100);

    let commission_amount = property
        .commission_percent
        .map(|pct| property.total_price * pct / dec!(100));
    let total_acquisition_cost = property.total_price + commission_amount.unwrap_or(Decimal::ZERO);

    if property.monthly_rent_cold.is_zero() {
        warnings.push("Monthly cold rent is zero — property is not let".into());
    } else if gross_rental_yield_percent < dec!(2) {
        warnings.push(format!(
            "Gross rental yield {:.2}% is below 2% — unusually low",
            gross_rental_yield_percent
        ));
    }

    let output = PropertyMetrics {
        price_per_m2,
        gross_rental_yield_percent,
        annual_rent_cold,
        commission_amount,
        total_acquisition_cost,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property Key Metrics",
        property,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
