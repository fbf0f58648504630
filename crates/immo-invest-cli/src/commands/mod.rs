pub mod financing;
pub mod projection;
pub mod property;
pub mod tax;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use immo_invest_core::Property;

use crate::input;

/// Listing figures shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct PropertyArgs {
    /// Purchase price
    #[arg(long)]
    pub total_price: Option<Decimal>,

    /// Monthly cold rent
    #[arg(long, alias = "rent")]
    pub monthly_rent_cold: Option<Decimal>,

    /// Living area in m²
    #[arg(long)]
    pub size_m2: Option<Decimal>,

    /// Monthly house fee (Hausgeld)
    #[arg(long)]
    pub house_fee: Option<Decimal>,

    /// Annual management costs
    #[arg(long)]
    pub management_costs: Option<Decimal>,

    /// Expected annual value growth in percent
    #[arg(long)]
    pub value_growth: Option<Decimal>,

    /// Expected annual rent increase in percent
    #[arg(long)]
    pub rent_increase: Option<Decimal>,

    /// Buyer commission in percent
    #[arg(long)]
    pub commission: Option<Decimal>,
}

impl PropertyArgs {
    pub fn to_property(&self) -> Result<Property, Box<dyn std::error::Error>> {
        let mut property = Property::new(
            self.total_price
                .ok_or("--total-price is required (or provide --input)")?,
            self.monthly_rent_cold
                .ok_or("--monthly-rent-cold is required (or provide --input)")?,
        );
        property.size_m2 = self.size_m2.unwrap_or(Decimal::ZERO);
        property.house_fee = self.house_fee;
        property.management_costs = self.management_costs;
        property.value_growth_percent = self.value_growth;
        property.rent_increase_percent = self.rent_increase;
        property.commission_percent = self.commission;
        Ok(property)
    }
}

/// JSON/YAML document from `--input`, else piped stdin, else `None`.
pub fn load_document(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(input::file::read_value(path)?)),
        None => input::stdin::read_stdin(),
    }
}
