use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use immo_invest_core::tax::{self, FederalState, MaritalStatus, TaxAssumptions, TaxSettings};
use immo_invest_core::Property;

use super::{load_document, PropertyArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MaritalArg {
    Single,
    Married,
}

impl From<MaritalArg> for MaritalStatus {
    fn from(arg: MaritalArg) -> Self {
        match arg {
            MaritalArg::Single => MaritalStatus::Single,
            MaritalArg::Married => MaritalStatus::Married,
        }
    }
}

/// Arguments for the after-tax projection
#[derive(Args)]
pub struct AfterTaxArgs {
    #[command(flatten)]
    pub property: PropertyArgs,

    /// Annual taxable gross income
    #[arg(long, default_value = "80000")]
    pub income: Decimal,

    /// Marital status (married halves the income for the bracket lookup)
    #[arg(long, value_enum, default_value = "single")]
    pub marital_status: MaritalArg,

    /// Liable to church tax
    #[arg(long)]
    pub church_tax: bool,

    /// Federal state, e.g. "Bayern" or "Nordrhein-Westfalen"
    #[arg(long, default_value = "Bayern")]
    pub state: FederalState,

    /// Number of projected years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct AfterTaxRequest {
    property: Property,
    #[serde(default)]
    settings: TaxSettings,
    #[serde(default)]
    assumptions: Option<TaxAssumptions>,
}

pub fn run_after_tax(args: AfterTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (property, settings, assumptions) = match load_document(args.input.as_deref())? {
        Some(data) => {
            let request: AfterTaxRequest = serde_json::from_value(data)?;
            let assumptions = request
                .assumptions
                .unwrap_or_else(|| TaxAssumptions::for_property(&request.property));
            (request.property, request.settings, assumptions)
        }
        None => {
            let property = args.property.to_property()?;
            let settings = TaxSettings {
                gross_annual_income: args.income,
                marital_status: args.marital_status.into(),
                church_tax: args.church_tax,
                state: args.state,
            };
            let mut assumptions = TaxAssumptions::for_property(&property);
            assumptions.years = args.years;
            (property, settings, assumptions)
        }
    };

    let result = tax::project_after_tax(&property, &settings, &assumptions)?;
    Ok(serde_json::to_value(result)?)
}
