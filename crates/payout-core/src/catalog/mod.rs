//! Read-only reference data: currencies, their fixed processor fee, and the
//! ordered fee tiers that apply to each.

mod builtin;

use std::collections::HashSet;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayoutError;
use crate::types::{CurrencyCode, Money, Percentage};
use crate::PayoutResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A currency the processor accepts payments in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    /// Display name, e.g. "USD (United States)".
    pub name: String,
    pub symbol: String,
    /// Fixed per-transaction processor fee, in this currency.
    pub fixed_fee: Money,
}

/// One rung of a currency's fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub id: String,
    /// Label template. May contain `{symbol}` and `{fixedFee}` placeholders;
    /// substituting them is a presentation concern.
    pub name: String,
    /// Percentage of the gross amount, 0-100.
    pub percentage: Percentage,
    /// Inclusive lower bound; absent means unbounded below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Money>,
    /// Inclusive upper bound; absent means unbounded above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Money>,
}

impl FeeTier {
    /// Whether `amount` lies within `[min_amount, max_amount]`.
    pub fn contains(&self, amount: Money) -> bool {
        let above_min = self.min_amount.map_or(true, |min| amount >= min);
        let below_max = self.max_amount.map_or(true, |max| amount <= max);
        above_min && below_max
    }
}

/// A currency together with its fee schedule, in schedule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub currency: Currency,
    #[serde(default)]
    pub tiers: Vec<FeeTier>,
}

/// Immutable catalog keyed by currency code.
///
/// Entry order and tier order are preserved exactly as supplied: tier
/// auto-selection is first-match in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurrencyEntry>", into = "Vec<CurrencyEntry>")]
pub struct TierCatalog {
    entries: Vec<CurrencyEntry>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl TierCatalog {
    /// Build a catalog, rejecting structurally broken reference data.
    ///
    /// Overlapping or gapped tier bounds are accepted: they are resolved by
    /// list position at selection time.
    pub fn new(entries: Vec<CurrencyEntry>) -> PayoutResult<Self> {
        let mut codes = HashSet::new();
        for entry in &entries {
            let code = &entry.currency.code;
            if code.trim().is_empty() {
                return Err(PayoutError::InvalidCatalog(
                    "currency code must not be empty".into(),
                ));
            }
            if !codes.insert(code.as_str()) {
                return Err(PayoutError::InvalidCatalog(format!(
                    "duplicate currency {code}"
                )));
            }
            if entry.currency.fixed_fee < Decimal::ZERO {
                return Err(PayoutError::InvalidCatalog(format!(
                    "{code}: fixed fee must not be negative"
                )));
            }
            validate_tiers(code, &entry.tiers)?;
        }
        Ok(Self { entries })
    }

    /// The processor's published schedule, built once per process.
    pub fn builtin() -> &'static TierCatalog {
        static BUILTIN: OnceLock<TierCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| TierCatalog {
            entries: builtin::entries(),
        })
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn currency_by_code(&self, code: &str) -> Option<&Currency> {
        self.entry(code).map(|entry| &entry.currency)
    }

    /// Ordered tiers for `code`; empty when the currency is unknown.
    pub fn tiers_for(&self, code: &str) -> &[FeeTier] {
        self.entry(code)
            .map(|entry| entry.tiers.as_slice())
            .unwrap_or_default()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.entries.iter().map(|entry| &entry.currency)
    }

    pub fn entries(&self) -> &[CurrencyEntry] {
        &self.entries
    }

    fn entry(&self, code: &str) -> Option<&CurrencyEntry> {
        self.entries.iter().find(|entry| entry.currency.code == code)
    }
}

fn validate_tiers(code: &str, tiers: &[FeeTier]) -> PayoutResult<()> {
    let mut ids = HashSet::new();
    for tier in tiers {
        if !ids.insert(tier.id.as_str()) {
            return Err(PayoutError::InvalidCatalog(format!(
                "{code}: duplicate tier id {}",
                tier.id
            )));
        }
        if tier.percentage < Decimal::ZERO || tier.percentage > Decimal::ONE_HUNDRED {
            return Err(PayoutError::InvalidCatalog(format!(
                "{code}/{}: percentage {} outside 0-100",
                tier.id, tier.percentage
            )));
        }
        if let (Some(min), Some(max)) = (tier.min_amount, tier.max_amount) {
            if min > max {
                return Err(PayoutError::InvalidCatalog(format!(
                    "{code}/{}: min_amount {min} exceeds max_amount {max}",
                    tier.id
                )));
            }
        }
    }
    Ok(())
}

impl TryFrom<Vec<CurrencyEntry>> for TierCatalog {
    type Error = PayoutError;

    fn try_from(entries: Vec<CurrencyEntry>) -> Result<Self, Self::Error> {
        TierCatalog::new(entries)
    }
}

impl From<TierCatalog> for Vec<CurrencyEntry> {
    fn from(catalog: TierCatalog) -> Self {
        catalog.entries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
