use clap::Args;
use serde_json::{json, Value};

use payout_core::catalog::{Currency, FeeTier};
use payout_core::normalize_code;

use super::settings::{self, SettingsArgs};

/// Currencies whose tier labels show the code instead of the symbol.
const CODE_LABELLED: [&str; 3] = ["CAD", "SGD", "AUD"];

/// Arguments for listing supported currencies
#[derive(Args)]
pub struct CurrenciesArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for listing a currency's fee tiers
#[derive(Args)]
pub struct TiersArgs {
    /// Currency code, e.g. USD
    #[arg(long)]
    pub currency: String,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Fill the `{symbol}` and `{fixedFee}` placeholders of a tier label.
pub fn render_tier_name(tier: &FeeTier, currency: &Currency) -> String {
    let symbol = if CODE_LABELLED.contains(&currency.code.as_str()) {
        format!("{} ", currency.code)
    } else {
        currency.symbol.clone()
    };
    tier.name
        .replace("{symbol}", &symbol)
        .replace("{fixedFee}", &format!("{:.2}", currency.fixed_fee))
}

pub fn run_currencies(args: CurrenciesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = settings::load_catalog(&args.settings)?;
    let rows: Vec<Value> = catalog
        .entries()
        .iter()
        .map(|entry| {
            json!({
                "code": entry.currency.code,
                "name": entry.currency.name,
                "symbol": entry.currency.symbol,
                "fixed_fee": entry.currency.fixed_fee.to_string(),
                "tiers": entry.tiers.len(),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

pub fn run_tiers(args: TiersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = settings::load_catalog(&args.settings)?;
    let code = normalize_code(&args.currency);
    let currency = catalog
        .currency_by_code(&code)
        .ok_or_else(|| payout_core::PayoutError::UnknownCurrency { code: code.clone() })?;

    let rows: Vec<Value> = catalog
        .tiers_for(&code)
        .iter()
        .map(|tier| {
            json!({
                "id": tier.id,
                "label": render_tier_name(tier, currency),
                "percentage": tier.percentage.to_string(),
                "min_amount": tier.min_amount.map(|v| v.to_string()),
                "max_amount": tier.max_amount.map(|v| v.to_string()),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use payout_core::catalog::TierCatalog;

    fn rendered(code: &str, index: usize) -> String {
        let catalog = TierCatalog::builtin();
        let currency = catalog.currency_by_code(code).unwrap();
        render_tier_name(&catalog.tiers_for(code)[index], currency)
    }

    #[test]
    fn test_symbol_labels() {
        assert_eq!(
            rendered("USD", 0),
            "4.4% + $0.30 (up to $3,000/month)"
        );
        assert_eq!(rendered("INR", 0), "Local: 2.5% + ₹3.00");
    }

    #[test]
    fn test_code_labels_for_cad() {
        assert_eq!(
            rendered("CAD", 1),
            "3.9% + 0.55 CAD  (3,000.01 – 10,000 CAD /month)"
        );
    }

    #[test]
    fn test_plain_labels_untouched() {
        assert_eq!(
            rendered("AUD", 0),
            "4.4% + 0.30 AUD (up to 1,500 AUD/month)"
        );
    }
}
