use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PayoutError {
    #[error("Unknown currency: {code} is not in the tier catalog")]
    UnknownCurrency { code: String },

    #[error("No fee tier available for {currency}")]
    NoTierAvailable { currency: String },

    #[error("Exchange rate for {currency} not available")]
    UnavailableRate { currency: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PayoutError {
    fn from(e: serde_json::Error) -> Self {
        PayoutError::SerializationError(e.to_string())
    }
}
