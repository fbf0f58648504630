pub mod amortization;
pub mod investment;

pub use amortization::{compute_loan, LoanAssumptions, LoanResult};
pub use investment::{analyze_investment, InvestmentAnalysis, InvestmentAssumptions, YieldRating};
