use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use payout_core::catalog::TierCatalog;
use payout_core::fees::{self, CalculationInput};
use payout_core::rates::ExchangeRateTable;
use payout_core::PayoutConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// One request from the front end: the payment, the rate snapshot, and
/// optional overrides for the model constants and catalog.
#[derive(Deserialize)]
struct PayoutRequest {
    input: CalculationInput,
    rates: ExchangeRateTable,
    #[serde(default)]
    config: Option<PayoutConfig>,
    #[serde(default)]
    catalog: Option<TierCatalog>,
}

impl PayoutRequest {
    fn parse(request_json: &str) -> NapiResult<Self> {
        let request: PayoutRequest = serde_json::from_str(request_json).map_err(to_napi_error)?;
        if let Some(ref config) = request.config {
            config.validate().map_err(to_napi_error)?;
        }
        Ok(request)
    }

    fn catalog(&self) -> &TierCatalog {
        self.catalog.as_ref().unwrap_or_else(|| TierCatalog::builtin())
    }

    fn config(&self) -> PayoutConfig {
        self.config.clone().unwrap_or_else(|| PayoutConfig {
            settlement_currency: self.rates.settlement_currency.clone(),
            ..PayoutConfig::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payout(request_json: String) -> NapiResult<String> {
    let request = PayoutRequest::parse(&request_json)?;
    let output = fees::calculate_with_config(
        &request.input,
        &request.rates,
        request.catalog(),
        &request.config(),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_payouts(request_json: String) -> NapiResult<String> {
    let request = PayoutRequest::parse(&request_json)?;
    let config = request.config();
    request.input.validate(&config).map_err(to_napi_error)?;
    let output = fees::compare_payouts(&request.input, &request.rates, request.catalog(), &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn invert_quotes(settlement_currency: String, quotes_json: String) -> NapiResult<String> {
    let quotes = serde_json::from_str(&quotes_json).map_err(to_napi_error)?;
    let table = ExchangeRateTable::from_quotes(settlement_currency, &quotes);
    serde_json::to_string(&table).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[napi]
pub fn list_currencies() -> NapiResult<String> {
    let currencies: Vec<_> = TierCatalog::builtin().currencies().collect();
    serde_json::to_string(&currencies).map_err(to_napi_error)
}

#[napi]
pub fn list_tiers(currency: String) -> NapiResult<String> {
    serde_json::to_string(TierCatalog::builtin().tiers_for(&currency)).map_err(to_napi_error)
}
