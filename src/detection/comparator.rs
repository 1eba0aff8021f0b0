// ==========================================
// Reference-vs-operator comparator
// ==========================================
// Pure function of (reference row data, operator input); no persistence,
// no state. An empty issue list means the drawer checks out.
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum tolerated difference between reference and entered weight (kg).
pub const WEIGHT_TOLERANCE_KG: f64 = 0.5;

/// What the operator typed in at the packing station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorInput {
    pub barcode: String,
    pub rfid: String,
    pub layout: String,
    pub weight: String,
}

/// Compare operator input against a reference row's `Barcode`, `RFID`,
/// `Layout` and `Weight` columns.
///
/// Identifier and layout fields are compared by string equality. Weights
/// are compared by the leading numeric token of a `"<number> kg"` string;
/// when either side fails to parse, a missing/invalid-weight issue is
/// reported instead of the deviation check.
pub fn compare(reference: &Map<String, Value>, input: &OperatorInput) -> Vec<String> {
    let mut issues = Vec::new();

    check_field(&mut issues, reference, "Barcode", &input.barcode, "Barcode");
    check_field(&mut issues, reference, "RFID", &input.rfid, "RFID");
    check_field(&mut issues, reference, "Layout", &input.layout, "Layout");

    let reference_weight = leading_number(&field_string(reference, "Weight"));
    let entered_weight = leading_number(&input.weight);
    match (reference_weight, entered_weight) {
        (Some(expected), Some(actual)) => {
            if (expected - actual).abs() > WEIGHT_TOLERANCE_KG {
                issues.push(format!(
                    "Weight deviation too large (expected: {})",
                    field_display(reference, "Weight")
                ));
            }
        }
        (expected, actual) => {
            if expected.is_none() {
                issues.push("Reference weight missing/invalid".to_string());
            }
            if actual.is_none() {
                issues.push("Entered weight missing/invalid".to_string());
            }
        }
    }

    issues
}

fn check_field(
    issues: &mut Vec<String>,
    reference: &Map<String, Value>,
    key: &str,
    entered: &str,
    label: &str,
) {
    if field_string(reference, key) != entered {
        issues.push(format!(
            "{} mismatch (expected: {})",
            label,
            field_display(reference, key)
        ));
    }
}

/// Reference field as a plain string; missing/null reads as "".
fn field_string(reference: &Map<String, Value>, key: &str) -> String {
    match reference.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Reference field for display in an issue message; "" shows as "n/a".
fn field_display(reference: &Map<String, Value>, key: &str) -> String {
    let s = field_string(reference, key);
    if s.is_empty() {
        "n/a".to_string()
    } else {
        s
    }
}

/// First run of digits/dots in the string, parsed as a float.
/// `"4.71 kg"` -> 4.71; `"n/a"` -> None.
pub fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let token: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    token.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference() -> Map<String, Value> {
        json!({
            "Layout": "Layout_3",
            "Barcode": "BC12345678",
            "RFID": "RF4X9K2P",
            "Weight": "4.71 kg"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn matching_input() -> OperatorInput {
        OperatorInput {
            barcode: "BC12345678".to_string(),
            rfid: "RF4X9K2P".to_string(),
            layout: "Layout_3".to_string(),
            weight: "4.6 kg".to_string(),
        }
    }

    #[test]
    fn test_all_matching_yields_no_issues() {
        assert!(compare(&reference(), &matching_input()).is_empty());
    }

    #[test]
    fn test_barcode_mismatch_names_expected() {
        let mut input = matching_input();
        input.barcode = "BC00000000".to_string();
        let issues = compare(&reference(), &input);
        assert_eq!(issues, vec!["Barcode mismatch (expected: BC12345678)"]);
    }

    #[test]
    fn test_weight_within_tolerance_passes() {
        let mut input = matching_input();
        input.weight = "4.4 kg".to_string(); // |4.71 - 4.4| = 0.31
        assert!(compare(&reference(), &input).is_empty());
    }

    #[test]
    fn test_weight_deviation_flagged() {
        let mut input = matching_input();
        input.weight = "5.5 kg".to_string();
        let issues = compare(&reference(), &input);
        assert_eq!(issues, vec!["Weight deviation too large (expected: 4.71 kg)"]);
    }

    #[test]
    fn test_invalid_entered_weight() {
        let mut input = matching_input();
        input.weight = "heavy".to_string();
        let issues = compare(&reference(), &input);
        assert_eq!(issues, vec!["Entered weight missing/invalid"]);
    }

    #[test]
    fn test_missing_reference_weight() {
        let mut reference = reference();
        reference.remove("Weight");
        let issues = compare(&reference, &matching_input());
        assert_eq!(issues, vec!["Reference weight missing/invalid"]);
    }

    #[test]
    fn test_leading_number_extraction() {
        assert_eq!(leading_number("4.71 kg"), Some(4.71));
        assert_eq!(leading_number("approx 3 kg"), Some(3.0));
        assert_eq!(leading_number("kg"), None);
        assert_eq!(leading_number("."), None);
    }
}
