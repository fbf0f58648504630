pub mod error;
pub mod property;
pub mod time_value;
pub mod types;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "tax")]
pub mod tax;

pub use error::ImmoInvestError;
pub use property::{analyze_property, Property, PropertyMetrics, PropertyStatus};
pub use types::*;

/// Standard result type for all immo-invest operations
pub type ImmoInvestResult<T> = Result<T, ImmoInvestError>;
