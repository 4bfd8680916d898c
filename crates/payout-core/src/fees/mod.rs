pub mod engine;
pub mod tier;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use engine::{calculate, calculate_with_config, CalculationInput, CalculationResult};
pub use tier::{resolve_tier, TierSelection};

#[cfg(feature = "comparison")]
pub use comparison::{compare_payouts, PayoutComparison, PayoutModel};
