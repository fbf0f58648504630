pub mod cashflow;

pub use cashflow::{project_cashflow, CashflowAssumptions, CashflowProjection, CashflowYear};
