use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Currency, CurrencyEntry, FeeTier};

fn currency(code: &str, name: &str, symbol: &str, fixed_fee: Decimal) -> Currency {
    Currency {
        code: code.into(),
        name: name.into(),
        symbol: symbol.into(),
        fixed_fee,
    }
}

fn tier(
    id: &str,
    name: &str,
    percentage: Decimal,
    min_amount: Option<Decimal>,
    max_amount: Option<Decimal>,
) -> FeeTier {
    FeeTier {
        id: id.into(),
        name: name.into(),
        percentage,
        min_amount,
        max_amount,
    }
}

/// The 4.4 / 3.9 / 3.7 / 3.4 schedule split at 3,000 / 10,000 / 100,000.
fn standard_schedule(prefix: &str, labels: [&str; 4]) -> Vec<FeeTier> {
    let [l1, l2, l3, l4] = labels;
    vec![
        tier(&format!("{prefix}_tier1"), l1, dec!(4.4), None, Some(dec!(3000))),
        tier(
            &format!("{prefix}_tier2"),
            l2,
            dec!(3.9),
            Some(dec!(3000.01)),
            Some(dec!(10000)),
        ),
        tier(
            &format!("{prefix}_tier3"),
            l3,
            dec!(3.7),
            Some(dec!(10000.01)),
            Some(dec!(100000)),
        ),
        tier(&format!("{prefix}_tier4"), l4, dec!(3.4), Some(dec!(100000.01)), None),
    ]
}

const SYMBOL_FIRST_LABELS: [&str; 4] = [
    "4.4% + {symbol}{fixedFee} (up to {symbol}3,000/month)",
    "3.9% + {symbol}{fixedFee} ({symbol}3,000.01 – {symbol}10,000/month)",
    "3.7% + {symbol}{fixedFee} ({symbol}10,000.01 – {symbol}100,000/month)",
    "3.4% + {symbol}{fixedFee} (Above {symbol}100,000/month)",
];

pub(super) fn entries() -> Vec<CurrencyEntry> {
    vec![
        CurrencyEntry {
            currency: currency("USD", "USD (United States)", "$", dec!(0.30)),
            tiers: standard_schedule("usd", SYMBOL_FIRST_LABELS),
        },
        CurrencyEntry {
            currency: currency("GBP", "GBP (United Kingdom)", "£", dec!(0.20)),
            tiers: standard_schedule("gbp", SYMBOL_FIRST_LABELS),
        },
        CurrencyEntry {
            currency: currency("CAD", "CAD (Canada)", "C$", dec!(0.55)),
            tiers: standard_schedule(
                "cad",
                [
                    "4.4% + {fixedFee} {symbol} (up to 3,000 {symbol}/month)",
                    "3.9% + {fixedFee} {symbol} (3,000.01 – 10,000 {symbol}/month)",
                    "3.7% + {fixedFee} {symbol} (10,000.01 – 100,000 {symbol}/month)",
                    "3.4% + {fixedFee} {symbol} (Above 100,000 {symbol}/month)",
                ],
            ),
        },
        CurrencyEntry {
            currency: currency("AED", "AED (United Arab Emirates)", "AED", dec!(0.30)),
            tiers: standard_schedule("aed", SYMBOL_FIRST_LABELS),
        },
        CurrencyEntry {
            currency: currency("SGD", "SGD (Singapore)", "S$", dec!(0.50)),
            tiers: vec![
                tier(
                    "sgd_tier1",
                    "4.4% + {fixedFee} {symbol} (up to 5,000 {symbol}/month)",
                    dec!(4.4),
                    None,
                    Some(dec!(5000)),
                ),
                tier(
                    "sgd_tier2",
                    "3.9% + {fixedFee} {symbol} (5,001 – 15,000 {symbol}/month)",
                    dec!(3.9),
                    Some(dec!(5001)),
                    Some(dec!(15000)),
                ),
                tier(
                    "sgd_tier3",
                    "3.7% + {fixedFee} {symbol} (15,001 – 25,000 {symbol}/month)",
                    dec!(3.7),
                    Some(dec!(15001)),
                    Some(dec!(25000)),
                ),
                tier(
                    "sgd_tier4",
                    "3.4% + {fixedFee} {symbol} (25,001 – 150,000 {symbol}/month)",
                    dec!(3.4),
                    Some(dec!(25001)),
                    Some(dec!(150000)),
                ),
                tier(
                    "sgd_tier5",
                    "3.2% + {fixedFee} {symbol} (Above 150,000 {symbol}/month)",
                    dec!(3.2),
                    Some(dec!(150001)),
                    None,
                ),
            ],
        },
        CurrencyEntry {
            currency: currency("CNY", "CNY (China)", "¥", dec!(0.30)),
            tiers: standard_schedule("cny", SYMBOL_FIRST_LABELS),
        },
        CurrencyEntry {
            currency: currency("INR", "INR (India)", "₹", dec!(3.00)),
            tiers: {
                let mut tiers = vec![tier(
                    "inr_local",
                    "Local: 2.5% + {symbol}{fixedFee}",
                    dec!(2.5),
                    None,
                    None,
                )];
                tiers.extend(standard_schedule(
                    "inr",
                    [
                        "International: 4.4% + {symbol}{fixedFee} (up to {symbol}3,000/month)",
                        "International: 3.9% + {symbol}{fixedFee} ({symbol}3,000+ to {symbol}10,000/month)",
                        "International: 3.7% + {symbol}{fixedFee} ({symbol}10,000+ to {symbol}100,000/month)",
                        "International: 3.4% + {symbol}{fixedFee} (Above {symbol}100,000/month)",
                    ],
                ));
                tiers
            },
        },
        CurrencyEntry {
            currency: currency("AUD", "AUD (Australia)", "A$", dec!(0.30)),
            // No open-ended top tier: amounts above 50,000 fall back to tier 1.
            tiers: vec![
                tier(
                    "aud_tier1",
                    "4.4% + 0.30 AUD (up to 1,500 AUD/month)",
                    dec!(4.4),
                    None,
                    Some(dec!(1500)),
                ),
                tier(
                    "aud_tier2",
                    "3.9% + 0.30 AUD (1,500.01 – 6,000 AUD/month)",
                    dec!(3.9),
                    Some(dec!(1500.01)),
                    Some(dec!(6000)),
                ),
                tier(
                    "aud_tier3",
                    "3.7% + 0.30 AUD (6,000.01 – 15,000 AUD/month)",
                    dec!(3.7),
                    Some(dec!(6000.01)),
                    Some(dec!(15000)),
                ),
                tier(
                    "aud_tier4",
                    "3.4% + 0.30 AUD (15,000.01 – 50,000 AUD/month)",
                    dec!(3.4),
                    Some(dec!(15000.01)),
                    Some(dec!(50000)),
                ),
            ],
        },
        CurrencyEntry {
            currency: currency("EUR", "EUR (Eurozone)", "€", dec!(0.35)),
            tiers: standard_schedule(
                "eur",
                [
                    "4.4% + {symbol}{fixedFee} (Up to {symbol}3,000/month)",
                    "3.9% + {symbol}{fixedFee} ({symbol}3,000.01 – {symbol}10,000/month)",
                    "3.7% + {symbol}{fixedFee} ({symbol}10,000.01 – {symbol}100,000/month)",
                    "3.4% + {symbol}{fixedFee} (Above {symbol}100,000/month)",
                ],
            ),
        },
    ]
}
