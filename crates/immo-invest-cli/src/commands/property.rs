use clap::Args;
use serde_json::Value;

use immo_invest_core::property::{self, Property};

use super::{load_document, PropertyArgs};

/// Arguments for listing key metrics
#[derive(Args)]
pub struct PropertyMetricsArgs {
    #[command(flatten)]
    pub property: PropertyArgs,

    /// Path to JSON/YAML property file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_property_metrics(args: PropertyMetricsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let listing: Property = match load_document(args.input.as_deref())? {
        Some(data) => serde_json::from_value(data)?,
        None => args.property.to_property()?,
    };

    let result = property::analyze_property(&listing)?;
    Ok(serde_json::to_value(result)?)
}
