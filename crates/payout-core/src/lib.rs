pub mod config;
pub mod error;
pub mod rates;
pub mod types;

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "engine")]
pub mod fees;

pub use config::PayoutConfig;
pub use error::PayoutError;
pub use types::*;

/// Standard result type for all payout operations
pub type PayoutResult<T> = Result<T, PayoutError>;
