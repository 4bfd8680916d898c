use serde_json::Value;
use std::io;

use super::plain;

/// Write output as CSV to stdout.
///
/// A calculation envelope becomes `field,value` rows; listings become one row
/// per item with headers from the first item.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &plain(val)]);
            }
            if let Some(Value::Array(warnings)) = map.get("warnings") {
                for w in warnings {
                    let _ = wtr.write_record(["warning", &plain(w)]);
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([&plain(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([&plain(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(plain).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
