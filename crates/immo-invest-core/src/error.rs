use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImmoInvestError {
    #[error("Invalid property: {field} — {reason}")]
    InvalidProperty { field: String, reason: String },

    #[error("Invalid assumption: {field} — {reason}")]
    InvalidAssumption { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ImmoInvestError {
    fn from(e: serde_json::Error) -> Self {
        ImmoInvestError::SerializationError(e.to_string())
    }
}
