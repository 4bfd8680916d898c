use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::catalog::TierCatalog;
use crate::config::PayoutConfig;
use crate::error::PayoutError;
use crate::fees::engine::{calculate_with_config, CalculationInput, CalculationResult};
use crate::fees::tier::TierSelection;
use crate::rates::ExchangeRateTable;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PayoutResult;

/// Which settlement path leaves the merchant with more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutModel {
    Processor,
    PassThrough,
}

/// Breakdown plus the side-by-side figures a merchant compares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutComparison {
    #[serde(flatten)]
    pub breakdown: CalculationResult,
    /// Conversion fee expressed in the source currency at the spot rate.
    pub conversion_fee_source: Money,
    /// Pass-through payout minus processor payout, in settlement currency.
    pub alternative_advantage: Money,
    pub preferred_model: PayoutModel,
}

/// Run the engine and wrap the comparison in the standard output envelope.
pub fn compare_payouts(
    input: &CalculationInput,
    rates: &ExchangeRateTable,
    catalog: &TierCatalog,
    config: &PayoutConfig,
) -> PayoutResult<ComputationOutput<PayoutComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let breakdown = calculate_with_config(input, rates, catalog, config)?;

    // -- Warnings --
    if let Some(requested) = &breakdown.requested_tier {
        if breakdown.tier_selection != TierSelection::Requested {
            warnings.push(format!(
                "Tier '{}' is not offered for {}; using {} instead",
                requested, breakdown.currency, breakdown.tier_id
            ));
        }
    }
    if breakdown.tier_selection == TierSelection::Fallback {
        warnings.push(format!(
            "Amount {} is outside every {} tier bound; fell back to first tier {}",
            breakdown.gross_amount, breakdown.currency, breakdown.tier_id
        ));
    }
    if breakdown.amount_after_processor_fees <= Decimal::ZERO {
        warnings.push(format!(
            "Processor fees exceed the gross amount of {} {}",
            breakdown.gross_amount, breakdown.currency
        ));
    }

    let out_of_range = || PayoutError::InvalidInput {
        field: format!("rates.{}", breakdown.currency),
        reason: "Comparison figures exceed the representable range".into(),
    };
    let conversion_fee_source = breakdown
        .conversion_fee
        .checked_div(breakdown.interbank_rate)
        .ok_or_else(out_of_range)?;
    let alternative_advantage = breakdown
        .alternative_final_settled
        .checked_sub(breakdown.final_settled)
        .ok_or_else(out_of_range)?;
    let preferred_model = if alternative_advantage > Decimal::ZERO {
        PayoutModel::PassThrough
    } else {
        PayoutModel::Processor
    };

    let output = PayoutComparison {
        breakdown,
        conversion_fee_source,
        alternative_advantage,
        preferred_model,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Processor payout (tiered percentage + fixed fee, marked-up conversion) vs \
         pass-through payout (flat provider fee + tax at spot rate)",
        &serde_json::json!({
            "settlement_currency": config.settlement_currency,
            "conversion_markup": config.conversion_markup.to_string(),
            "alternative_fee_rate": config.alternative_fee_rate.to_string(),
            "alternative_tax_rate": config.alternative_tax_rate.to_string(),
            "rates_as_of": rates.as_of.map(|d| d.to_string()),
        }),
        warnings,
        elapsed,
        output,
    ))
}
