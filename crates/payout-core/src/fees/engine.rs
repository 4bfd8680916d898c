use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::TierCatalog;
use crate::config::PayoutConfig;
use crate::error::PayoutError;
use crate::fees::tier::{resolve_tier, TierSelection};
use crate::rates::ExchangeRateTable;
use crate::types::{CurrencyCode, Money, Percentage, Rate};
use crate::PayoutResult;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single payment to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross amount the client pays, in `currency`.
    pub amount: Money,
    pub currency: CurrencyCode,
    /// Fee tier id; when absent the tier is picked from the amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<String>,
}

impl CalculationInput {
    pub fn new(amount: Money, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            tier_id: None,
        }
    }

    pub fn with_tier(mut self, tier_id: impl Into<String>) -> Self {
        self.tier_id = Some(tier_id.into());
        self
    }

    /// Caller-side checks before pricing. The engine itself never calls this.
    pub fn validate(&self, config: &PayoutConfig) -> PayoutResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(PayoutError::InvalidInput {
                field: "amount".into(),
                reason: "Please enter a positive amount".into(),
            });
        }
        if self.amount < config.min_amount {
            return Err(PayoutError::InvalidInput {
                field: "amount".into(),
                reason: format!("Amount must be at least {}", config.min_amount),
            });
        }
        if self.amount > config.max_amount {
            return Err(PayoutError::InvalidInput {
                field: "amount".into(),
                reason: format!("Amount must not exceed {}", config.max_amount),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(PayoutError::InvalidInput {
                field: "currency".into(),
                reason: "Please select a currency".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Unrounded fee breakdown for one payment under both payout models.
///
/// Fields without a `_source` suffix are in the settlement currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub currency: CurrencyCode,
    pub settlement_currency: CurrencyCode,
    pub gross_amount: Money,
    pub tier_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_tier: Option<String>,
    pub tier_selection: TierSelection,
    pub tier_percentage: Percentage,
    /// Unmarked settlement units per source unit (1 for the settlement currency).
    pub interbank_rate: Rate,
    /// Rate the processor converts the principal at.
    pub marked_up_rate: Rate,

    // -- Processor payout --
    pub percentage_fee: Money,
    pub percentage_fee_source: Money,
    pub fixed_fee: Money,
    pub fixed_fee_source: Money,
    /// Gross minus processor fees, in the source currency.
    pub amount_after_processor_fees: Money,
    pub conversion_fee: Money,
    pub final_settled: Money,

    // -- Pass-through payout --
    pub gross_in_settlement: Money,
    pub alternative_fee: Money,
    pub alternative_tax: Money,
    pub alternative_final_settled: Money,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Price a payment with the default model constants, settling in the rate
/// table's settlement currency.
pub fn calculate(
    input: &CalculationInput,
    rates: &ExchangeRateTable,
    catalog: &TierCatalog,
) -> PayoutResult<CalculationResult> {
    let config = PayoutConfig {
        settlement_currency: rates.settlement_currency.clone(),
        ..PayoutConfig::default()
    };
    calculate_with_config(input, rates, catalog, &config)
}

/// Price a payment under both payout models.
///
/// Processor model: percentage and fixed fee come off the gross amount in the
/// source currency; the remainder converts at `rate * (1 - markup)`. Fees are
/// reported at the unmarked rate.
///
/// Pass-through model: the whole gross converts at the unmarked rate, then a
/// flat provider fee and tax on that fee are deducted. Processor fees play no
/// part in it.
pub fn calculate_with_config(
    input: &CalculationInput,
    rates: &ExchangeRateTable,
    catalog: &TierCatalog,
    config: &PayoutConfig,
) -> PayoutResult<CalculationResult> {
    if rates.settlement_currency != config.settlement_currency {
        return Err(PayoutError::InvalidInput {
            field: "rates.settlement_currency".into(),
            reason: format!(
                "Rate table settles in {} but payouts settle in {}",
                rates.settlement_currency, config.settlement_currency
            ),
        });
    }

    let code = input.currency.as_str();
    let currency = catalog
        .currency_by_code(code)
        .ok_or_else(|| PayoutError::UnknownCurrency { code: code.into() })?;

    let (tier, tier_selection) =
        resolve_tier(catalog.tiers_for(code), input.tier_id.as_deref(), input.amount)
            .ok_or_else(|| PayoutError::NoTierAvailable {
                currency: code.into(),
            })?;

    let is_settlement = config.is_settlement(code);
    let rate = if is_settlement {
        Decimal::ONE
    } else {
        rates.require(code)?
    };

    let amount = input.amount;
    let overflow = |step: &str| PayoutError::InvalidInput {
        field: format!("rates.{code}"),
        reason: format!("{step} exceeds the representable range at rate {rate}"),
    };

    let percentage_fee_source = amount
        .checked_mul(tier.percentage / Decimal::ONE_HUNDRED)
        .ok_or_else(|| overflow("percentage fee"))?;
    let fixed_fee_source = currency.fixed_fee;
    let amount_after_processor_fees = amount
        .checked_sub(percentage_fee_source)
        .and_then(|v| v.checked_sub(fixed_fee_source))
        .ok_or_else(|| overflow("amount after processor fees"))?;

    // -- Processor payout --
    let (marked_up_rate, final_settled, conversion_fee, percentage_fee, fixed_fee) =
        if is_settlement {
            (
                Decimal::ONE,
                amount_after_processor_fees,
                Decimal::ZERO,
                percentage_fee_source,
                fixed_fee_source,
            )
        } else {
            let marked_up_rate = rate
                .checked_mul(Decimal::ONE - config.conversion_markup)
                .ok_or_else(|| overflow("marked-up rate"))?;
            let final_settled = amount_after_processor_fees
                .checked_mul(marked_up_rate)
                .ok_or_else(|| overflow("settled amount"))?;
            let conversion_fee = amount_after_processor_fees
                .checked_mul(rate)
                .and_then(|v| v.checked_sub(final_settled))
                .ok_or_else(|| overflow("conversion fee"))?;
            let percentage_fee = percentage_fee_source
                .checked_mul(rate)
                .ok_or_else(|| overflow("percentage fee"))?;
            let fixed_fee = fixed_fee_source
                .checked_mul(rate)
                .ok_or_else(|| overflow("fixed fee"))?;
            (
                marked_up_rate,
                final_settled,
                conversion_fee,
                percentage_fee,
                fixed_fee,
            )
        };

    // -- Pass-through payout --
    let gross_in_settlement = amount
        .checked_mul(rate)
        .ok_or_else(|| overflow("gross amount"))?;
    let alternative_fee = gross_in_settlement
        .checked_mul(config.alternative_fee_rate)
        .ok_or_else(|| overflow("pass-through fee"))?;
    let alternative_tax = alternative_fee
        .checked_mul(config.alternative_tax_rate)
        .ok_or_else(|| overflow("pass-through tax"))?;
    let alternative_final_settled = gross_in_settlement
        .checked_sub(alternative_fee)
        .and_then(|v| v.checked_sub(alternative_tax))
        .ok_or_else(|| overflow("pass-through settled amount"))?;

    Ok(CalculationResult {
        currency: currency.code.clone(),
        settlement_currency: config.settlement_currency.clone(),
        gross_amount: amount,
        tier_id: tier.id.clone(),
        requested_tier: input.tier_id.clone(),
        tier_selection,
        tier_percentage: tier.percentage,
        interbank_rate: rate,
        marked_up_rate,
        percentage_fee,
        percentage_fee_source,
        fixed_fee,
        fixed_fee_source,
        amount_after_processor_fees,
        conversion_fee,
        final_settled,
        gross_in_settlement,
        alternative_fee,
        alternative_tax,
        alternative_final_settled,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rates() -> ExchangeRateTable {
        let mut table = ExchangeRateTable::new("INR");
        table.insert("USD", dec!(83.00)).unwrap();
        table.insert("EUR", dec!(90.00)).unwrap();
        table
    }

    fn assert_approx(actual: Decimal, expected: Decimal, tolerance: Decimal, label: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tolerance,
            "{label}: expected ~{expected}, got {actual} (diff={diff}, tol={tolerance})"
        );
    }

    #[test]
    fn test_usd_reference_breakdown() {
        let input = CalculationInput::new(dec!(1000), "USD").with_tier("usd_tier1");
        let out = calculate(&input, &rates(), TierCatalog::builtin()).unwrap();

        assert_eq!(out.percentage_fee_source, dec!(44));
        assert_eq!(out.fixed_fee_source, dec!(0.30));
        assert_eq!(out.amount_after_processor_fees, dec!(955.70));
        assert_eq!(out.marked_up_rate, dec!(79.68));
        // 955.70 * 79.68
        assert_eq!(out.final_settled, dec!(76150.176));
        // 955.70 * 83 - 76150.176
        assert_eq!(out.conversion_fee, dec!(3172.924));
        // Fees are reported at the unmarked rate.
        assert_eq!(out.percentage_fee, dec!(3652));
        assert_eq!(out.fixed_fee, dec!(24.9));
        assert_eq!(out.tier_selection, TierSelection::Requested);
    }

    #[test]
    fn test_usd_pass_through_ignores_processor_fees() {
        let input = CalculationInput::new(dec!(1000), "USD");
        let out = calculate(&input, &rates(), TierCatalog::builtin()).unwrap();

        assert_eq!(out.gross_in_settlement, dec!(83000));
        assert_eq!(out.alternative_fee, dec!(830));
        assert_eq!(out.alternative_tax, dec!(149.4));
        assert_eq!(out.alternative_final_settled, dec!(82020.6));
    }

    #[test]
    fn test_inr_local_payment_has_no_conversion() {
        let input = CalculationInput::new(dec!(500), "INR").with_tier("inr_local");
        let out = calculate(&input, &rates(), TierCatalog::builtin()).unwrap();

        assert_eq!(out.percentage_fee, dec!(12.50));
        assert_eq!(out.fixed_fee, dec!(3.00));
        assert_eq!(out.final_settled, dec!(484.50));
        assert_eq!(out.conversion_fee, Decimal::ZERO);
        assert_eq!(out.final_settled, out.amount_after_processor_fees);
        assert_eq!(out.marked_up_rate, Decimal::ONE);
        assert_eq!(out.alternative_final_settled, dec!(494.1));
    }

    #[test]
    fn test_settlement_currency_never_needs_a_rate() {
        let empty = ExchangeRateTable::from_quotes("INR", &Default::default());
        let input = CalculationInput::new(dec!(12345.67), "INR").with_tier("inr_tier3");
        let out = calculate(&input, &empty, TierCatalog::builtin()).unwrap();
        assert_eq!(out.conversion_fee, Decimal::ZERO);
        assert_eq!(out.final_settled, out.amount_after_processor_fees);
    }

    #[test]
    fn test_missing_rate_is_an_error_not_one() {
        let input = CalculationInput::new(dec!(100), "GBP");
        let err = calculate(&input, &rates(), TierCatalog::builtin()).unwrap_err();
        assert_eq!(
            err,
            PayoutError::UnavailableRate {
                currency: "GBP".into()
            }
        );
    }

    #[test]
    fn test_unrelated_missing_rates_do_not_matter() {
        let mut table = ExchangeRateTable::new("INR");
        table.insert("EUR", dec!(90)).unwrap();
        let input = CalculationInput::new(dec!(100), "EUR");
        assert!(calculate(&input, &table, TierCatalog::builtin()).is_ok());
    }

    #[test]
    fn test_unknown_currency() {
        let input = CalculationInput::new(dec!(100), "JPY");
        let err = calculate(&input, &rates(), TierCatalog::builtin()).unwrap_err();
        assert_eq!(err, PayoutError::UnknownCurrency { code: "JPY".into() });
    }

    #[test]
    fn test_settlement_mismatch_rejected() {
        let input = CalculationInput::new(dec!(100), "USD");
        let config = PayoutConfig {
            settlement_currency: "EUR".into(),
            ..PayoutConfig::default()
        };
        let result = calculate_with_config(&input, &rates(), TierCatalog::builtin(), &config);
        assert!(matches!(result, Err(PayoutError::InvalidInput { .. })));
    }

    #[test]
    fn test_custom_markup_applies() {
        let input = CalculationInput::new(dec!(1000), "USD");
        let config = PayoutConfig {
            conversion_markup: dec!(0.03),
            ..PayoutConfig::default()
        };
        let out = calculate_with_config(&input, &rates(), TierCatalog::builtin(), &config).unwrap();
        assert_eq!(out.marked_up_rate, dec!(80.51));
        assert_approx(
            out.conversion_fee,
            out.amount_after_processor_fees * dec!(83) * dec!(0.03),
            dec!(0.000001),
            "conversion fee",
        );
    }

    #[test]
    fn test_processor_fees_can_exceed_tiny_amounts() {
        let input = CalculationInput::new(dec!(0.01), "USD");
        let out = calculate(&input, &rates(), TierCatalog::builtin()).unwrap();
        assert!(out.amount_after_processor_fees < Decimal::ZERO);
        assert!(out.final_settled < Decimal::ZERO);
        assert!(out.alternative_final_settled > Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_rate_is_an_error() {
        let mut table = ExchangeRateTable::new("INR");
        table.insert("USD", Decimal::MAX).unwrap();
        let err = calculate(
            &CalculationInput::new(dec!(1000), "USD"),
            &table,
            TierCatalog::builtin(),
        )
        .unwrap_err();
        match err {
            PayoutError::InvalidInput { field, .. } => assert_eq!(field, "rates.USD"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_amount_range() {
        let config = PayoutConfig::default();
        assert!(CalculationInput::new(dec!(0.01), "USD").validate(&config).is_ok());
        assert!(CalculationInput::new(dec!(9999999), "USD").validate(&config).is_ok());
        assert!(CalculationInput::new(Decimal::ZERO, "USD").validate(&config).is_err());
        assert!(CalculationInput::new(dec!(-5), "USD").validate(&config).is_err());
        assert!(CalculationInput::new(dec!(10000000), "USD").validate(&config).is_err());
        assert!(CalculationInput::new(dec!(10), " ").validate(&config).is_err());
    }
}
