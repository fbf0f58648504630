use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use immo_invest_core::financing::{self, InvestmentAssumptions, LoanAssumptions};
use immo_invest_core::projection::{self, CashflowAssumptions};
use immo_invest_core::tax::{self, TaxAssumptions, TaxSettings};
use immo_invest_core::{property, Property};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
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

#[derive(Deserialize)]
struct CashflowRequest {
    property: Property,
    #[serde(default)]
    assumptions: Option<CashflowAssumptions>,
}

#[derive(Deserialize)]
struct AfterTaxRequest {
    property: Property,
    #[serde(default)]
    settings: TaxSettings,
    #[serde(default)]
    assumptions: Option<TaxAssumptions>,
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_property(input_json: String) -> NapiResult<String> {
    let input: Property = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property::analyze_property(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_loan(input_json: String) -> NapiResult<String> {
    let input: LoanRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = input.loan.compute(input.total_price).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let assumptions = input
        .assumptions
        .unwrap_or_else(|| InvestmentAssumptions::for_property(&input.property));
    let output =
        financing::analyze_investment(&input.property, &assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_cashflow(input_json: String) -> NapiResult<String> {
    let input: CashflowRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let assumptions = input
        .assumptions
        .unwrap_or_else(|| CashflowAssumptions::for_property(&input.property));
    let output =
        projection::project_cashflow(&input.property, &assumptions).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn marginal_tax_rates(input_json: String) -> NapiResult<String> {
    let input: TaxSettings = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = tax::marginal_tax_rates(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_after_tax(input_json: String) -> NapiResult<String> {
    let input: AfterTaxRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let assumptions = input
        .assumptions
        .unwrap_or_else(|| TaxAssumptions::for_property(&input.property));
    let output = tax::project_after_tax(&input.property, &input.settings, &assumptions)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
