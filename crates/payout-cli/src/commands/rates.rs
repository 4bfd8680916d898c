use std::collections::BTreeMap;

use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use payout_core::rates::ExchangeRateTable;
use payout_core::{normalize_code, PayoutConfig};

use super::settings::{self, SettingsArgs};
use crate::input;

/// Rates the market source does not publish, pinned in INR per foreign unit.
const INR_PEGGED_RATES: [(&str, Decimal); 1] = [("AED", dec!(23.88))];

/// Where the interbank rate snapshot comes from.
#[derive(Args, Debug, Default)]
pub struct RateArgs {
    /// JSON/YAML map of settlement units per one foreign unit, e.g. {"USD": 83.1}
    #[arg(long)]
    pub rates: Option<String>,

    /// JSON/YAML map of raw market quotes (foreign units per one settlement unit)
    #[arg(long, conflicts_with = "rates")]
    pub quotes: Option<String>,

    /// Override a single rate, e.g. --rate USD=83.12 (repeatable)
    #[arg(long = "rate", value_name = "CODE=RATE")]
    pub overrides: Vec<String>,

    /// Do not apply the pinned AED rate
    #[arg(long)]
    pub no_peg: bool,
}

/// Arguments for showing the assembled rate table
#[derive(Args)]
pub struct ShowRatesArgs {
    #[command(flatten)]
    pub rates: RateArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Assemble the rate snapshot: quotes or rates file, then pegs, then overrides.
pub fn build_rate_table(
    args: &RateArgs,
    config: &PayoutConfig,
) -> Result<ExchangeRateTable, Box<dyn std::error::Error>> {
    let settlement = config.settlement_currency.clone();

    let mut table = match args.quotes {
        Some(ref path) => {
            let quotes: BTreeMap<String, Decimal> = input::file::read_document(path)?;
            tracing::info!(path = %path, quotes = quotes.len(), "inverting market quotes");
            ExchangeRateTable::from_quotes(settlement.clone(), &normalize_keys(quotes))
        }
        None => ExchangeRateTable::new(settlement.clone()),
    };

    if let Some(ref path) = args.rates {
        let rates: BTreeMap<String, Decimal> = input::file::read_document(path)?;
        tracing::info!(path = %path, rates = rates.len(), "loading settlement rates");
        for (code, rate) in normalize_keys(rates) {
            table.insert(code, rate)?;
        }
    }

    if !args.no_peg && settlement == "INR" {
        for (code, rate) in INR_PEGGED_RATES {
            if table.rate_for(code).is_none() {
                tracing::debug!(currency = code, %rate, "applying pinned rate");
                table.insert(code, rate)?;
            }
        }
    }

    for raw in &args.overrides {
        let (code, rate) = parse_override(raw)?;
        tracing::debug!(currency = %code, %rate, "rate override");
        table.insert(code, rate)?;
    }

    if table.foreign_len() == 0 {
        tracing::warn!(
            "no foreign exchange rates available; only {} payments can be priced",
            settlement
        );
    }
    Ok(table)
}

fn normalize_keys(map: BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
    map.into_iter()
        .map(|(code, value)| (normalize_code(&code), value))
        .collect()
}

fn parse_override(raw: &str) -> Result<(String, Decimal), Box<dyn std::error::Error>> {
    let (code, rate) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected CODE=RATE, got '{}'", raw))?;
    let rate: Decimal = rate
        .trim()
        .parse()
        .map_err(|e| format!("Invalid rate in '{}': {}", raw, e))?;
    Ok((normalize_code(code), rate))
}

pub fn run_rates(args: ShowRatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = settings::load_config(&args.settings)?;
    let table = build_rate_table(&args.rates, &config)?;

    let rows: Vec<Value> = table
        .available()
        .into_iter()
        .filter_map(|code| table.rate_for(code).map(|rate| (code, rate)))
        .map(|(code, rate)| {
            json!({
                "currency": code,
                "rate": rate.to_string(),
                "display": format!(
                    "1 {} = {:.2} {}",
                    code, rate, table.settlement_currency
                ),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
