// ==========================================
// Dataset rule condition parsing and matching
// ==========================================
// Column values in imported rows are ad hoc condition expressions.
// Fill-level columns carry numeric conditions; every other column is
// an option list matched against the bottle attribute's string form.
// ==========================================

use serde_json::Value;

// ==========================================
// Numeric conditions (fill level)
// ==========================================
/// Parsed shape of a fill-level condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericCondition {
    /// "A-B": inclusive range
    Range { min: f64, max: f64 },
    Lt(f64),
    Le(f64),
    Gt(f64),
    Ge(f64),
}

impl NumericCondition {
    pub fn matches(&self, actual: f64) -> bool {
        match *self {
            NumericCondition::Range { min, max } => actual >= min && actual <= max,
            NumericCondition::Lt(v) => actual < v,
            NumericCondition::Le(v) => actual <= v,
            NumericCondition::Gt(v) => actual > v,
            NumericCondition::Ge(v) => actual >= v,
        }
    }
}

/// Parse one of the five condition shapes: `"A-B"`, `"<N"`, `"<=N"`,
/// `">N"`, `">=N"`, or a bare number.
///
/// A bare number `N` means `< N`. That convention is surprising but
/// intentional: imported datasets express "refill below N" as just the
/// threshold, and existing rule sheets rely on it.
///
/// Returns `None` when the value parses to none of these shapes; the
/// caller treats that as a failed match, never an error.
pub fn parse_numeric_condition(raw: &str) -> Option<NumericCondition> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(range) = parse_range(s) {
        return Some(range);
    }
    if let Some(rest) = s.strip_prefix("<=") {
        return parse_number(rest).map(NumericCondition::Le);
    }
    if let Some(rest) = s.strip_prefix('<') {
        return parse_number(rest).map(NumericCondition::Lt);
    }
    if let Some(rest) = s.strip_prefix(">=") {
        return parse_number(rest).map(NumericCondition::Ge);
    }
    if let Some(rest) = s.strip_prefix('>') {
        return parse_number(rest).map(NumericCondition::Gt);
    }
    // bare number: "< N" by convention
    parse_number(s).map(NumericCondition::Lt)
}

/// "30-70" (integer bounds only, as the datasets write them).
fn parse_range(s: &str) -> Option<NumericCondition> {
    let (left, right) = s.split_once('-')?;
    let min = left.trim();
    let max = right.trim();
    if min.is_empty() || !min.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if max.is_empty() || !max.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(NumericCondition::Range {
        min: min.parse().ok()?,
        max: max.parse().ok()?,
    })
}

/// Numeric token with an optional percent sign ("70", "70%", "70 %").
fn parse_number(s: &str) -> Option<f64> {
    s.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}

// ==========================================
// Option-list matching (everything else)
// ==========================================
/// Split the rule value on `,` `|` `/` `\` and match if the bottle
/// attribute equals or contains any option (case-insensitive).
pub fn matches_option_list(rule_value: &str, actual: &str) -> bool {
    let actual = actual.to_lowercase();
    for option in rule_value.split([',', '|', '/', '\\']) {
        let option = option.trim().to_lowercase();
        if option.is_empty() {
            continue;
        }
        if actual == option || actual.contains(&option) {
            return true;
        }
    }
    // no option matched (or the value yielded none, e.g. only separators)
    false
}

// ==========================================
// Wildcards
// ==========================================
/// Null, empty/whitespace, or the literal "any" (case-insensitive) match
/// every bottle.
pub fn is_wildcard(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let t = s.trim();
            t.is_empty() || t.eq_ignore_ascii_case("any")
        }
        _ => false,
    }
}

/// String form of a scalar column value for condition parsing.
pub fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_range() {
        let cond = parse_numeric_condition("30-70").unwrap();
        assert!(cond.matches(30.0));
        assert!(cond.matches(50.0));
        assert!(cond.matches(70.0));
        assert!(!cond.matches(29.9));
        assert!(!cond.matches(70.1));
    }

    #[test]
    fn test_parse_comparisons() {
        assert_eq!(parse_numeric_condition("<90"), Some(NumericCondition::Lt(90.0)));
        assert_eq!(parse_numeric_condition("<= 70"), Some(NumericCondition::Le(70.0)));
        assert_eq!(parse_numeric_condition("> 50"), Some(NumericCondition::Gt(50.0)));
        assert_eq!(parse_numeric_condition(">=80"), Some(NumericCondition::Ge(80.0)));
    }

    #[test]
    fn test_bare_number_means_less_than() {
        // documented convention, not a typo
        assert_eq!(parse_numeric_condition("70"), Some(NumericCondition::Lt(70.0)));
        assert_eq!(parse_numeric_condition("70%"), Some(NumericCondition::Lt(70.0)));
    }

    #[test]
    fn test_negative_number_is_not_a_range() {
        assert_eq!(parse_numeric_condition("-5"), Some(NumericCondition::Lt(-5.0)));
    }

    #[test]
    fn test_unparseable_condition() {
        assert_eq!(parse_numeric_condition("full-ish"), None);
        assert_eq!(parse_numeric_condition(""), None);
    }

    #[test]
    fn test_option_list_matching() {
        assert!(matches_option_list("Sealed", "Sealed"));
        assert!(matches_option_list("sealed|resealed", "Resealed"));
        assert!(matches_option_list("Opened, Resealed", "opened"));
        // substring match: "Damaged" matches "Heavily_Damaged"
        assert!(matches_option_list("Damaged", "Heavily_Damaged"));
        assert!(!matches_option_list("Sealed", "Opened"));
        assert!(!matches_option_list("|/", "anything"));
    }

    #[test]
    fn test_wildcards() {
        assert!(is_wildcard(&Value::Null));
        assert!(is_wildcard(&json!("")));
        assert!(is_wildcard(&json!("  ")));
        assert!(is_wildcard(&json!("any")));
        assert!(is_wildcard(&json!("ANY")));
        assert!(!is_wildcard(&json!("Sealed")));
        assert!(!is_wildcard(&json!(0)));
    }
}
