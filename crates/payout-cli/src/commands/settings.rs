use std::borrow::Cow;

use clap::Args;
use rust_decimal::Decimal;

use payout_core::catalog::TierCatalog;
use payout_core::{normalize_code, PayoutConfig};

use crate::input;

/// Where model constants and the tier catalog come from.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Path to a JSON/YAML file with payout settings
    #[arg(long)]
    pub config: Option<String>,

    /// Path to a JSON/YAML tier catalog replacing the builtin schedule
    #[arg(long)]
    pub catalog: Option<String>,

    /// Currency the merchant is paid out in (overrides the config file)
    #[arg(long)]
    pub settlement_currency: Option<String>,

    /// Processor conversion markup, e.g. 0.04 for 4% (overrides the config file)
    #[arg(long)]
    pub markup: Option<Decimal>,
}

/// Load the config file (if any), then apply flag overrides and validate.
pub fn load_config(args: &SettingsArgs) -> Result<PayoutConfig, Box<dyn std::error::Error>> {
    let mut config: PayoutConfig = match args.config {
        Some(ref path) => input::file::read_document(path)?,
        None => PayoutConfig::default(),
    };

    if let Some(ref code) = args.settlement_currency {
        config.settlement_currency = normalize_code(code);
    }
    if let Some(markup) = args.markup {
        config.conversion_markup = markup;
    }

    config.validate()?;
    tracing::debug!(
        settlement = %config.settlement_currency,
        markup = %config.conversion_markup,
        "payout settings resolved"
    );
    Ok(config)
}

pub fn load_catalog(
    args: &SettingsArgs,
) -> Result<Cow<'static, TierCatalog>, Box<dyn std::error::Error>> {
    match args.catalog {
        Some(ref path) => {
            let catalog: TierCatalog = input::file::read_document(path)?;
            tracing::info!(path = %path, currencies = catalog.entries().len(), "using custom tier catalog");
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(TierCatalog::builtin())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flags_override_defaults() {
        let args = SettingsArgs {
            settlement_currency: Some("eur".into()),
            markup: Some(dec!(0.03)),
            ..SettingsArgs::default()
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.settlement_currency, "EUR");
        assert_eq!(config.conversion_markup, dec!(0.03));
    }

    #[test]
    fn test_invalid_markup_rejected() {
        let args = SettingsArgs {
            markup: Some(dec!(1.5)),
            ..SettingsArgs::default()
        };
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = load_catalog(&SettingsArgs::default()).unwrap();
        assert!(matches!(catalog, Cow::Borrowed(_)));
        assert!(catalog.currency_by_code("USD").is_some());
    }
}
