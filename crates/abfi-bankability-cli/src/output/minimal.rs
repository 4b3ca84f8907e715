use serde_json::Value;

use super::format_scalar;

/// Print just the headline answer.
///
/// Assessments and composites print `<score> <rating>`; otherwise the first
/// well-known key found, falling back to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        println!("{}", format_scalar(result_obj));
        return;
    };

    if let (Some(score), Some(rating)) = (map.get("composite_score"), map.get("rating")) {
        println!("{} {}", format_scalar(score), format_scalar(rating));
        return;
    }

    let priority_keys = ["rating", "hhi", "assessment_number"];
    for key in &priority_keys {
        if let Some(val) = map.get(*key) {
            if !val.is_null() {
                println!("{}", format_scalar(val));
                return;
            }
        }
    }

    if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, format_scalar(val));
    }
}
