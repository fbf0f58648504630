use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImmoInvestError;
use crate::types::{Money, Percent};
use crate::ImmoInvestResult;

/// Upper bound of taxable income (inclusive) and the rate applied up to it.
/// Incomes above the last bound pay [`TOP_RATE_PERCENT`].
const TAX_BRACKETS: [(Money, Percent); 4] = [
    (dec!(11604), dec!(0)),
    (dec!(17005), dec!(14)),
    (dec!(66760), dec!(24)),
    (dec!(277825), dec!(42)),
];
const TOP_RATE_PERCENT: Percent = dec!(45);

/// Solidarity surcharge as a share of the income-tax rate.
const SOLIDARITY_FACTOR: Decimal = dec!(0.055);
const CHURCH_TAX_FACTOR_SOUTH: Decimal = dec!(0.08);
const CHURCH_TAX_FACTOR_DEFAULT: Decimal = dec!(0.09);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    Single,
    /// Joint assessment: the bracket is looked up on half the income
    Married,
}

/// German federal state (Bundesland); only affects the church-tax rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    #[serde(rename = "Baden-Württemberg")]
    BadenWuerttemberg,
    #[default]
    #[serde(rename = "Bayern")]
    Bayern,
    #[serde(rename = "Berlin")]
    Berlin,
    #[serde(rename = "Brandenburg")]
    Brandenburg,
    #[serde(rename = "Bremen")]
    Bremen,
    #[serde(rename = "Hamburg")]
    Hamburg,
    #[serde(rename = "Hessen")]
    Hessen,
    #[serde(rename = "Mecklenburg-Vorpommern")]
    MecklenburgVorpommern,
    #[serde(rename = "Niedersachsen")]
    Niedersachsen,
    #[serde(rename = "Nordrhein-Westfalen")]
    NordrheinWestfalen,
    #[serde(rename = "Rheinland-Pfalz")]
    RheinlandPfalz,
    #[serde(rename = "Saarland")]
    Saarland,
    #[serde(rename = "Sachsen")]
    Sachsen,
    #[serde(rename = "Sachsen-Anhalt")]
    SachsenAnhalt,
    #[serde(rename = "Schleswig-Holstein")]
    SchleswigHolstein,
    #[serde(rename = "Thüringen")]
    Thueringen,
}

impl FederalState {
    pub const ALL: [FederalState; 16] = [
        FederalState::BadenWuerttemberg,
        FederalState::Bayern,
        FederalState::Berlin,
        FederalState::Brandenburg,
        FederalState::Bremen,
        FederalState::Hamburg,
        FederalState::Hessen,
        FederalState::MecklenburgVorpommern,
        FederalState::Niedersachsen,
        FederalState::NordrheinWestfalen,
        FederalState::RheinlandPfalz,
        FederalState::Saarland,
        FederalState::Sachsen,
        FederalState::SachsenAnhalt,
        FederalState::SchleswigHolstein,
        FederalState::Thueringen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FederalState::BadenWuerttemberg => "Baden-Württemberg",
            FederalState::Bayern => "Bayern",
            FederalState::Berlin => "Berlin",
            FederalState::Brandenburg => "Brandenburg",
            FederalState::Bremen => "Bremen",
            FederalState::Hamburg => "Hamburg",
            FederalState::Hessen => "Hessen",
            FederalState::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            FederalState::Niedersachsen => "Niedersachsen",
            FederalState::NordrheinWestfalen => "Nordrhein-Westfalen",
            FederalState::RheinlandPfalz => "Rheinland-Pfalz",
            FederalState::Saarland => "Saarland",
            FederalState::Sachsen => "Sachsen",
            FederalState::SachsenAnhalt => "Sachsen-Anhalt",
            FederalState::SchleswigHolstein => "Schleswig-Holstein",
            FederalState::Thueringen => "Thüringen",
        }
    }

    /// Church tax as a share of the income-tax rate: 8% in Bayern and
    /// Baden-Württemberg, 9% elsewhere.
    pub fn church_tax_factor(self) -> Decimal {
        match self {
            FederalState::Bayern | FederalState::BadenWuerttemberg => CHURCH_TAX_FACTOR_SOUTH,
            _ => CHURCH_TAX_FACTOR_DEFAULT,
        }
    }
}

impl fmt::Display for FederalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FederalState {
    type Err = ImmoInvestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FederalState::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ImmoInvestError::InvalidAssumption {
                field: "state".into(),
                reason: format!("Unknown federal state '{wanted}'"),
            })
    }
}

/// Personal tax situation entered on the tax tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Annual taxable gross income
    pub gross_annual_income: Money,
    #[serde(default)]
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub church_tax: bool,
    #[serde(default)]
    pub state: FederalState,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            gross_annual_income: dec!(80000),
            marital_status: MaritalStatus::Single,
            church_tax: false,
            state: FederalState::Bayern,
        }
    }
}

/// Rate breakdown in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Income the bracket was looked up on (halved for married couples)
    pub taxable_income: Money,
    pub income_tax_percent: Percent,
    pub solidarity_percent: Percent,
    pub church_tax_percent: Percent,
    /// Sum of the three, not compounded
    pub total_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simplified marginal tax rate on additional (rental) income.
///
/// A single bracket rate is applied flat to the whole amount instead of
/// integrating the progressive schedule. Solidarity surcharge and church
/// tax are added as shares of that bracket rate.
pub fn marginal_tax_rates(settings: &TaxSettings) -> ImmoInvestResult<TaxRates> {
    if settings.gross_annual_income <= Decimal::ZERO {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "gross_annual_income".into(),
            reason: "Gross annual income must be positive".into(),
        });
    }

    let taxable_income = match settings.marital_status {
        MaritalStatus::Married => settings.gross_annual_income / dec!(2),
        MaritalStatus::Single => settings.gross_annual_income,
    };

    let income_tax_percent = bracket_rate(taxable_income);
    let solidarity_percent = income_tax_percent * SOLIDARITY_FACTOR;
    let church_tax_percent = if settings.church_tax {
        income_tax_percent * settings.state.church_tax_factor()
    } else {
        Decimal::ZERO
    };

    Ok(TaxRates {
        taxable_income,
        income_tax_percent,
        solidarity_percent,
        church_tax_percent,
        total_percent: income_tax_percent + solidarity_percent + church_tax_percent,
    })
}

fn bracket_rate(taxable_income: Money) -> Percent {
    TAX_BRACKETS
        .iter()
        .find(|(upper, _)| taxable_income <= *upper)
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_RATE_PERCENT)
}
