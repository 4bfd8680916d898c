use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayoutError;
use crate::types::{CurrencyCode, Rate};
use crate::PayoutResult;

/// Snapshot of interbank rates, quoted as settlement units per one foreign
/// unit (e.g. USD -> 83.00 when settling in INR).
///
/// A missing entry means the rate is unavailable. The settlement currency
/// always resolves to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub settlement_currency: CurrencyCode,
    #[serde(default)]
    pub rates: BTreeMap<CurrencyCode, Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

impl ExchangeRateTable {
    /// Empty table holding only the settlement currency itself.
    pub fn new(settlement_currency: impl Into<CurrencyCode>) -> Self {
        let settlement_currency = settlement_currency.into();
        let mut rates = BTreeMap::new();
        rates.insert(settlement_currency.clone(), Decimal::ONE);
        Self {
            settlement_currency,
            rates,
            as_of: None,
        }
    }

    /// Build a table from raw market quotes.
    ///
    /// Market sources quote how many foreign units one settlement unit buys
    /// (INR -> USD = 0.012). Each quote is inverted; zero or negative quotes
    /// are dropped rather than guessed. An empty quote set still yields a
    /// usable table for settlement-currency payments.
    pub fn from_quotes(
        settlement_currency: impl Into<CurrencyCode>,
        quotes: &BTreeMap<CurrencyCode, Decimal>,
    ) -> Self {
        let mut table = Self::new(settlement_currency);
        for (code, quote) in quotes {
            if *quote <= Decimal::ZERO || *code == table.settlement_currency {
                continue;
            }
            if let Some(rate) = Decimal::ONE.checked_div(*quote) {
                table.rates.insert(code.clone(), rate);
            }
        }
        table
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Insert or replace the rate for one currency.
    pub fn insert(&mut self, code: impl Into<CurrencyCode>, rate: Rate) -> PayoutResult<()> {
        let code = code.into();
        if rate <= Decimal::ZERO {
            return Err(PayoutError::InvalidInput {
                field: format!("rates.{code}"),
                reason: "Exchange rate must be positive".into(),
            });
        }
        if code == self.settlement_currency && rate != Decimal::ONE {
            return Err(PayoutError::InvalidInput {
                field: format!("rates.{code}"),
                reason: "Settlement currency rate is fixed at 1".into(),
            });
        }
        self.rates.insert(code, rate);
        Ok(())
    }

    /// Settlement units per one unit of `code`, if known.
    ///
    /// Non-positive entries (possible in a deserialised table) count as
    /// unavailable.
    pub fn rate_for(&self, code: &str) -> Option<Rate> {
        if code == self.settlement_currency {
            return Some(Decimal::ONE);
        }
        self.rates
            .get(code)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    /// Rate for `code` or `UnavailableRate`.
    pub fn require(&self, code: &str) -> PayoutResult<Rate> {
        self.rate_for(code).ok_or_else(|| PayoutError::UnavailableRate {
            currency: code.to_string(),
        })
    }

    /// Currencies with a usable rate, settlement currency included.
    pub fn available(&self) -> Vec<&str> {
        std::iter::once(self.settlement_currency.as_str())
            .chain(
                self.rates
                    .iter()
                    .filter(|(code, rate)| {
                        **code != self.settlement_currency && **rate > Decimal::ZERO
                    })
                    .map(|(code, _)| code.as_str()),
            )
            .collect()
    }

    /// Number of foreign currencies with a usable rate.
    pub fn foreign_len(&self) -> usize {
        self.available().len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quotes(pairs: &[(&str, Decimal)]) -> BTreeMap<CurrencyCode, Decimal> {
        pairs
            .iter()
            .map(|(code, quote)| (code.to_string(), *quote))
            .collect()
    }

    #[test]
    fn test_settlement_currency_is_always_one() {
        let table = ExchangeRateTable::new("INR");
        assert_eq!(table.rate_for("INR"), Some(Decimal::ONE));
        assert_eq!(table.rate_for("USD"), None);
    }

    #[test]
    fn test_from_quotes_inverts() {
        let table = ExchangeRateTable::from_quotes("INR", &quotes(&[("USD", dec!(0.0125))]));
        assert_eq!(table.rate_for("USD"), Some(dec!(80)));
        assert_eq!(table.rate_for("INR"), Some(Decimal::ONE));
    }

    #[test]
    fn test_from_quotes_drops_zero_quotes() {
        let table = ExchangeRateTable::from_quotes(
            "INR",
            &quotes(&[("USD", dec!(0.0125)), ("GBP", Decimal::ZERO)]),
        );
        assert_eq!(table.rate_for("GBP"), None);
        assert_eq!(table.available(), vec!["INR", "USD"]);
    }

    #[test]
    fn test_from_empty_quotes_keeps_settlement() {
        let table = ExchangeRateTable::from_quotes("INR", &BTreeMap::new());
        assert_eq!(table.foreign_len(), 0);
        assert_eq!(table.rate_for("INR"), Some(Decimal::ONE));
    }

    #[test]
    fn test_foreign_len_counts_usable_foreign_rates_only() {
        let table: ExchangeRateTable = serde_json::from_str(
            r#"{ "settlement_currency": "INR", "rates": { "INR": "1", "USD": "83", "GBP": "0" } }"#,
        )
        .unwrap();
        assert_eq!(table.foreign_len(), 1);
        assert_eq!(table.available(), vec!["INR", "USD"]);
    }

    #[test]
    fn test_insert_rejects_non_positive() {
        let mut table = ExchangeRateTable::new("INR");
        assert!(table.insert("USD", Decimal::ZERO).is_err());
        assert!(table.insert("USD", dec!(-83)).is_err());
        assert!(table.insert("USD", dec!(83)).is_ok());
        assert_eq!(table.rate_for("USD"), Some(dec!(83)));
    }

    #[test]
    fn test_insert_cannot_move_settlement_rate() {
        let mut table = ExchangeRateTable::new("INR");
        assert!(table.insert("INR", dec!(2)).is_err());
        assert!(table.insert("INR", Decimal::ONE).is_ok());
    }

    #[test]
    fn test_require_reports_missing_currency() {
        let table = ExchangeRateTable::new("INR");
        assert_eq!(
            table.require("GBP"),
            Err(PayoutError::UnavailableRate {
                currency: "GBP".into()
            })
        );
    }

    #[test]
    fn test_deserialised_zero_rate_is_unavailable() {
        let table: ExchangeRateTable = serde_json::from_str(
            r#"{ "settlement_currency": "INR", "rates": { "USD": "0" } }"#,
        )
        .unwrap();
        assert_eq!(table.rate_for("USD"), None);
        assert_eq!(table.rate_for("INR"), Some(Decimal::ONE));
    }
}
