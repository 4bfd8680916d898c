use serde::{Deserialize, Serialize};

use crate::catalog::FeeTier;
use crate::types::Money;

/// How a tier ended up applied to a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSelection {
    /// The caller named the tier and it exists for the currency.
    Requested,
    /// First tier in list order whose bounds contain the amount.
    AmountMatch,
    /// Nothing matched; the first tier of the schedule was used.
    Fallback,
}

/// Pick the tier for `amount` out of a currency's ordered schedule.
///
/// A requested id wins when it exists. Otherwise the first tier (in list
/// order, not the narrowest) whose bounds contain the amount is chosen, and
/// failing that the first tier. Returns `None` only for an empty schedule.
pub fn resolve_tier<'a>(
    tiers: &'a [FeeTier],
    requested: Option<&str>,
    amount: Money,
) -> Option<(&'a FeeTier, TierSelection)> {
    if let Some(id) = requested {
        if let Some(tier) = tiers.iter().find(|t| t.id == id) {
            return Some((tier, TierSelection::Requested));
        }
    }

    if let Some(tier) = tiers.iter().find(|t| t.contains(amount)) {
        return Some((tier, TierSelection::AmountMatch));
    }

    tiers.first().map(|tier| (tier, TierSelection::Fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TierCatalog;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tier(id: &str, min: Option<Decimal>, max: Option<Decimal>) -> FeeTier {
        FeeTier {
            id: id.into(),
            name: id.into(),
            percentage: dec!(4),
            min_amount: min,
            max_amount: max,
        }
    }

    fn resolved_id(tiers: &[FeeTier], requested: Option<&str>, amount: Decimal) -> (String, TierSelection) {
        let (t, how) = resolve_tier(tiers, requested, amount).unwrap();
        (t.id.clone(), how)
    }

    #[test]
    fn test_usd_boundary_goes_to_lower_tier() {
        let tiers = TierCatalog::builtin().tiers_for("USD");
        assert_eq!(
            resolved_id(tiers, None, dec!(3000.00)),
            ("usd_tier1".into(), TierSelection::AmountMatch)
        );
        assert_eq!(
            resolved_id(tiers, None, dec!(3000.01)),
            ("usd_tier2".into(), TierSelection::AmountMatch)
        );
        assert_eq!(resolved_id(tiers, None, dec!(10000)).0, "usd_tier2");
        assert_eq!(resolved_id(tiers, None, dec!(100000.01)).0, "usd_tier4");
    }

    #[test]
    fn test_amount_in_gap_falls_back_to_first_tier() {
        let tiers = TierCatalog::builtin().tiers_for("USD");
        assert_eq!(
            resolved_id(tiers, None, dec!(3000.005)),
            ("usd_tier1".into(), TierSelection::Fallback)
        );
    }

    #[test]
    fn test_aud_above_top_bound_falls_back_to_first_tier() {
        let tiers = TierCatalog::builtin().tiers_for("AUD");
        assert_eq!(
            resolved_id(tiers, None, dec!(60000)),
            ("aud_tier1".into(), TierSelection::Fallback)
        );
    }

    #[test]
    fn test_inr_auto_selection_always_local() {
        let tiers = TierCatalog::builtin().tiers_for("INR");
        assert_eq!(resolved_id(tiers, None, dec!(500)).0, "inr_local");
        assert_eq!(resolved_id(tiers, None, dec!(250000)).0, "inr_local");
    }

    #[test]
    fn test_requested_tier_overrides_bounds() {
        let tiers = TierCatalog::builtin().tiers_for("USD");
        assert_eq!(
            resolved_id(tiers, Some("usd_tier4"), dec!(10)),
            ("usd_tier4".into(), TierSelection::Requested)
        );
    }

    #[test]
    fn test_unknown_requested_tier_falls_through_to_bounds() {
        let tiers = TierCatalog::builtin().tiers_for("USD");
        assert_eq!(
            resolved_id(tiers, Some("gbp_tier1"), dec!(5000)),
            ("usd_tier2".into(), TierSelection::AmountMatch)
        );
    }

    #[test]
    fn test_overlapping_bounds_first_in_list_wins() {
        let tiers = vec![
            tier("wide", Some(dec!(0)), Some(dec!(10000))),
            tier("narrow", Some(dec!(100)), Some(dec!(200))),
        ];
        assert_eq!(resolved_id(&tiers, None, dec!(150)).0, "wide");

        let reversed: Vec<FeeTier> = tiers.into_iter().rev().collect();
        assert_eq!(resolved_id(&reversed, None, dec!(150)).0, "narrow");
    }

    #[test]
    fn test_empty_schedule_resolves_nothing() {
        assert!(resolve_tier(&[], Some("usd_tier1"), dec!(100)).is_none());
        assert!(resolve_tier(&[], None, dec!(100)).is_none());
    }
}
