use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Format output as a two-column field/value table, or a row-per-item table
/// for `results` arrays.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(results)) = map.get("results") {
                print_array_table(results);
            } else if let Some(result) = map.get("result") {
                print_field_table(result);
                print_envelope_notes(map);
            } else {
                print_field_table(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_field_table(value: &Value) {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_scalar(item));
        }
    }
}
