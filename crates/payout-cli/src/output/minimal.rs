use serde_json::Value;

use super::plain;

/// Print just the processor payout, the figure a merchant asks for first.
///
/// Listings (currencies, tiers, rates) print one id per line instead.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["final_settled", "alternative_final_settled", "rate"];

    match result_obj {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", plain(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, plain(val));
            }
        }
        Value::Array(rows) => {
            for row in rows {
                let id = ["id", "code", "currency"]
                    .iter()
                    .find_map(|k| row.get(*k))
                    .unwrap_or(row);
                println!("{}", plain(id));
            }
        }
        other => println!("{}", plain(other)),
    }
}
