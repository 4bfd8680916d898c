use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayoutError;
use crate::types::{CurrencyCode, Money, Rate};
use crate::PayoutResult;

/// Deployment-wide constants for the payout models.
///
/// Every field has a default, so a partial JSON/YAML document only needs the
/// values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutConfig {
    /// Currency the merchant is paid out in.
    pub settlement_currency: CurrencyCode,
    /// Processor margin taken off the interbank rate (0.04 = 4%).
    pub conversion_markup: Rate,
    /// Flat fee of the pass-through provider, on the spot-converted gross.
    pub alternative_fee_rate: Rate,
    /// Tax charged on the pass-through provider fee.
    pub alternative_tax_rate: Rate,
    /// Smallest gross amount a caller should accept.
    pub min_amount: Money,
    /// Largest gross amount a caller should accept (seven digits).
    pub max_amount: Money,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            settlement_currency: "INR".to_string(),
            conversion_markup: dec!(0.04),
            alternative_fee_rate: dec!(0.01),
            alternative_tax_rate: dec!(0.18),
            min_amount: dec!(0.01),
            max_amount: dec!(9999999),
        }
    }
}

impl PayoutConfig {
    pub fn validate(&self) -> PayoutResult<()> {
        if self.settlement_currency.trim().is_empty() {
            return Err(PayoutError::InvalidInput {
                field: "settlement_currency".into(),
                reason: "Settlement currency must not be empty".into(),
            });
        }

        for (field, value) in [
            ("conversion_markup", self.conversion_markup),
            ("alternative_fee_rate", self.alternative_fee_rate),
            ("alternative_tax_rate", self.alternative_tax_rate),
        ] {
            if value < Decimal::ZERO || value >= Decimal::ONE {
                return Err(PayoutError::InvalidInput {
                    field: field.into(),
                    reason: format!("Rate must be in [0, 1), got {value}"),
                });
            }
        }

        if self.min_amount <= Decimal::ZERO {
            return Err(PayoutError::InvalidInput {
                field: "min_amount".into(),
                reason: "Minimum amount must be positive".into(),
            });
        }
        if self.max_amount < self.min_amount {
            return Err(PayoutError::InvalidInput {
                field: "max_amount".into(),
                reason: format!(
                    "Maximum amount {} is below minimum amount {}",
                    self.max_amount, self.min_amount
                ),
            });
        }

        Ok(())
    }

    pub fn is_settlement(&self, code: &str) -> bool {
        self.settlement_currency == code
    }
}
