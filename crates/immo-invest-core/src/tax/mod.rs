pub mod after_tax;
pub mod income_tax;

pub use after_tax::{project_after_tax, AfterTaxProjection, TaxAssumptions, TaxYear};
pub use income_tax::{marginal_tax_rates, FederalState, MaritalStatus, TaxRates, TaxSettings};
