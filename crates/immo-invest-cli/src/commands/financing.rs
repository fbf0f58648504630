use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use immo_invest_core::financing::{self, InvestmentAssumptions, LoanAssumptions};
use immo_invest_core::Property;

use super::{load_document, PropertyArgs};

/// Arguments for the annuity loan calculation
#[derive(Args)]
pub struct LoanArgs {
    /// Purchase price
    #[arg(long)]
    pub total_price: Option<Decimal>,

    /// Down payment in percent of the price
    #[arg(long, default_value = "20")]
    pub down_payment: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "25")]
    pub term: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "3.5")]
    pub interest_rate: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the investment calculator
#[derive(Args)]
pub struct InvestmentArgs {
    #[command(flatten)]
    pub property: PropertyArgs,

    /// Down payment in percent of the price
    #[arg(long, default_value = "20")]
    pub down_payment: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "25")]
    pub term: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "3.5")]
    pub interest_rate: Decimal,

    /// Achieved monthly rent (defaults to the listing's cold rent)
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Monthly owner costs (defaults to house fee + 150)
    #[arg(long)]
    pub monthly_costs: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct LoanRequest {
    total_price: Decimal,
    #[serde(flatten)]
    loan: LoanAssumptions,
}

#[derive(Deserialize)]
struct InvestmentRequest {
    property: Property,
    #[serde(default)]
    assumptions: Option<InvestmentAssumptions>,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = match load_document(args.input.as_deref())? {
        Some(data) => serde_json::from_value(data)?,
        None => LoanRequest {
            total_price: args
                .total_price
                .ok_or("--total-price is required (or provide --input)")?,
            loan: LoanAssumptions {
                down_payment_percent: args.down_payment,
                loan_term_years: args.term,
                annual_interest_rate_percent: args.interest_rate,
            },
        },
    };

    let result = request.loan.compute(request.total_price)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_investment(args: InvestmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (property, assumptions) = match load_document(args.input.as_deref())? {
        Some(data) => {
            let request: InvestmentRequest = serde_json::from_value(data)?;
            let assumptions = request
                .assumptions
                .unwrap_or_else(|| InvestmentAssumptions::for_property(&request.property));
            (request.property, assumptions)
        }
        None => {
            let property = args.property.to_property()?;
            let defaults = InvestmentAssumptions::for_property(&property);
            let assumptions = InvestmentAssumptions {
                loan: LoanAssumptions {
                    down_payment_percent: args.down_payment,
                    loan_term_years: args.term,
                    annual_interest_rate_percent: args.interest_rate,
                },
                monthly_rent: args.monthly_rent.unwrap_or(defaults.monthly_rent),
                monthly_costs: args.monthly_costs.unwrap_or(defaults.monthly_costs),
            };
            (property, assumptions)
        }
    };

    let result = financing::analyze_investment(&property, &assumptions)?;
    Ok(serde_json::to_value(result)?)
}
