use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::plain;

/// Rows shown side by side when a payout comparison is printed.
const COMPARISON_ROWS: [(&str, &str, &str); 5] = [
    ("Fee", "percentage_fee", "alternative_fee"),
    ("Fixed fee / tax", "fixed_fee", "alternative_tax"),
    ("Conversion fee", "conversion_fee", ""),
    ("Rate applied", "marked_up_rate", "interbank_rate"),
    ("You receive", "final_settled", "alternative_final_settled"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) if result.contains_key("final_settled") => {
                print_comparison(result);
                print_footer(map);
            }
            Some(Value::Object(result)) => {
                print_fields(result);
                print_footer(map);
            }
            _ => print_fields(map),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_comparison(result: &Map<String, Value>) {
    let field = |key: &str| result.get(key).map(plain).unwrap_or_default();
    let settlement = field("settlement_currency");

    println!(
        "{} {} via tier {} ({})",
        field("gross_amount"),
        field("currency"),
        field("tier_id"),
        field("tier_selection")
    );

    let mut builder = Builder::default();
    builder.push_record([
        String::new(),
        format!("Processor ({settlement})"),
        format!("Pass-through ({settlement})"),
    ]);
    for (label, processor, pass_through) in COMPARISON_ROWS {
        builder.push_record([label.to_string(), field(processor), field(pass_through)]);
    }
    println!("{}", Table::from(builder));

    println!(
        "\nPass-through advantage: {} {} (preferred: {})",
        field("alternative_advantage"),
        settlement,
        field("preferred_model")
    );
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &plain(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_footer(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", plain(w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for item in rows {
            println!("{}", plain(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(plain).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}
