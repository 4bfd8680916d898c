use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use payout_core::fees::{compare_payouts, CalculationInput};
use payout_core::normalize_code;

use super::rates::{build_rate_table, RateArgs};
use super::settings::{self, SettingsArgs};
use crate::input;

/// Arguments for pricing a payment under both payout models
#[derive(Args)]
pub struct CalculateArgs {
    /// Gross amount the client pays
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Currency of the payment, e.g. USD
    #[arg(long)]
    pub currency: Option<String>,

    /// Fee tier id (e.g. usd_tier2); picked from the amount when omitted
    #[arg(long)]
    pub tier: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub rates: RateArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = if args.input.is_none() {
        input::stdin::read_stdin()?
    } else {
        None
    };
    price(&args, piped)
}

/// Resolve the input (file, piped document, or flags) and price it.
fn price(
    args: &CalculateArgs,
    piped: Option<CalculationInput>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let config = settings::load_config(&args.settings)?;
    let catalog = settings::load_catalog(&args.settings)?;

    let mut calc_input: CalculationInput = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = piped {
        data
    } else {
        CalculationInput {
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            currency: args
                .currency
                .clone()
                .ok_or("--currency is required (or provide --input)")?,
            tier_id: args.tier.clone(),
        }
    };
    calc_input.currency = normalize_code(&calc_input.currency);
    calc_input.validate(&config)?;

    let rates = build_rate_table(&args.rates, &config)?;
    let output = compare_payouts(&calc_input, &rates, &catalog, &config)?;

    tracing::info!(
        currency = %output.result.breakdown.currency,
        tier = %output.result.breakdown.tier_id,
        selection = ?output.result.breakdown.tier_selection,
        "payment priced"
    );
    for warning in &output.warnings {
        tracing::warn!("{}", warning);
    }

    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(amount: Decimal, currency: &str) -> CalculateArgs {
        CalculateArgs {
            amount: Some(amount),
            currency: Some(currency.into()),
            tier: None,
            input: None,
            rates: RateArgs {
                overrides: vec!["USD=83".into()],
                ..RateArgs::default()
            },
            settings: SettingsArgs::default(),
        }
    }

    fn decimal_at(value: &Value, key: &str) -> Decimal {
        value["result"][key].as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_lowercase_currency_accepted() {
        let value = price(&args(dec!(1000), "usd"), None).unwrap();
        assert_eq!(value["result"]["currency"], "USD");
        assert_eq!(decimal_at(&value, "final_settled"), dec!(76150.176));
        assert_eq!(decimal_at(&value, "alternative_final_settled"), dec!(82020.6));
    }

    #[test]
    fn test_piped_document_wins_over_flags() {
        let piped = CalculationInput::new(dec!(500), "INR").with_tier("inr_local");
        let value = price(&args(dec!(1000), "USD"), Some(piped)).unwrap();
        assert_eq!(value["result"]["currency"], "INR");
        assert_eq!(decimal_at(&value, "final_settled"), dec!(484.50));
    }

    #[test]
    fn test_amount_above_maximum_rejected() {
        assert!(price(&args(dec!(10000000), "USD"), None).is_err());
    }

    #[test]
    fn test_missing_rate_surfaces_error() {
        let err = price(&args(dec!(100), "GBP"), None).unwrap_err();
        assert!(err.to_string().contains("GBP"));
    }

    #[test]
    fn test_missing_amount_flag() {
        let mut a = args(dec!(1), "USD");
        a.amount = None;
        assert!(price(&a, None).is_err());
    }
}
