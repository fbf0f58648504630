use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use immo_invest_core::projection::{self, CashflowAssumptions};
use immo_invest_core::Property;

use super::{load_document, PropertyArgs};

/// Arguments for the year-by-year cashflow projection
#[derive(Args)]
pub struct CashflowArgs {
    #[command(flatten)]
    pub property: PropertyArgs,

    /// Number of projected years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct CashflowRequest {
    property: Property,
    #[serde(default)]
    assumptions: Option<CashflowAssumptions>,
}

pub fn run_cashflow(args: CashflowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (property, assumptions) = match load_document(args.input.as_deref())? {
        Some(data) => {
            let request: CashflowRequest = serde_json::from_value(data)?;
            let assumptions = request
                .assumptions
                .unwrap_or_else(|| CashflowAssumptions::for_property(&request.property));
            (request.property, assumptions)
        }
        None => {
            let property = args.property.to_property()?;
            let mut assumptions = CashflowAssumptions::for_property(&property);
            assumptions.years = args.years;
            (property, assumptions)
        }
    };

    let result = projection::project_cashflow(&property, &assumptions)?;
    Ok(serde_json::to_value(result)?)
}
