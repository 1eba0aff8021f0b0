// ==========================================
// Dataset catalog - column metadata and header-role inference
// ==========================================
// Read-only views over imported excel rows: which columns exist, what
// their values look like, and a best guess at which columns carry
// customer/product roles.
// ==========================================

use crate::importer::file_parser::RawRow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Distinct sample values retained per column.
const MAX_SAMPLE_VALUES: usize = 10;

// ==========================================
// Column metadata
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub name: String,
    pub sample_values: Vec<String>,
    /// "number" when every sample parses numerically, else "string"
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Infer column metadata from imported rows.
///
/// The header set comes from the first row (all rows of one dataset share
/// a header set); samples are the first distinct non-null values seen.
pub fn infer_fields(rows: &[&RawRow]) -> Vec<FieldMeta> {
    let first = match rows.first() {
        Some(row) => row,
        None => return Vec::new(),
    };

    first
        .keys()
        .map(|header| {
            let mut samples: Vec<String> = Vec::new();
            for row in rows {
                if let Some(value) = row.get(header) {
                    if value.is_null() {
                        continue;
                    }
                    let s = value_string(value);
                    if !samples.contains(&s) {
                        samples.push(s);
                        if samples.len() >= MAX_SAMPLE_VALUES {
                            break;
                        }
                    }
                }
            }

            let field_type = if !samples.is_empty() && samples.iter().all(|s| is_numeric(s)) {
                "number"
            } else {
                "string"
            };

            FieldMeta {
                name: header.clone(),
                sample_values: samples,
                field_type: field_type.to_string(),
            }
        })
        .collect()
}

/// Numeric after stripping one percent sign and one thousands separator.
fn is_numeric(s: &str) -> bool {
    s.replacen('%', "", 1)
        .replacen(',', "", 1)
        .trim()
        .parse::<f64>()
        .is_ok()
}

fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

// ==========================================
// Header role mapping
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMappings {
    pub customer_name_key: Option<String>,
    pub customer_code_key: Option<String>,
    pub product_key: Option<String>,
    pub brand_key: Option<String>,
    /// customer display name -> 2-letter airline code
    pub customer_name_to_code: BTreeMap<String, String>,
    /// product name -> brand
    pub product_to_brand: BTreeMap<String, String>,
}

/// Best-guess header roles plus derived lookup tables.
pub fn infer_mappings(rows: &[&RawRow]) -> HeaderMappings {
    let first = match rows.first() {
        Some(row) => row,
        None => return HeaderMappings::default(),
    };
    let headers: Vec<&String> = first.keys().collect();

    let find_key = |pred: &dyn Fn(&str) -> bool| -> Option<String> {
        headers
            .iter()
            .find(|h| pred(&h.to_lowercase()))
            .map(|h| (*h).clone())
    };

    let customer_name_key = find_key(&|h| h.contains("customer") && h.contains("name"))
        .or_else(|| find_key(&|h| h == "customer" || h.contains("customer_name")));
    let customer_code_key = find_key(&|h| h.contains("customer") && h.contains("code"))
        .or_else(|| find_key(&|h| h.contains("airline") && h.contains("code")))
        .or_else(|| find_key(&|h| h == "customercode"));
    let product_key =
        find_key(&|h| h.contains("product")).or_else(|| find_key(&|h| h.contains("product_name")));
    let brand_key =
        find_key(&|h| h.contains("brand")).or_else(|| find_key(&|h| h.contains("marca")));

    let mut customer_name_to_code = BTreeMap::new();
    let mut product_to_brand = BTreeMap::new();

    for row in rows {
        if let (Some(name_key), Some(code_key)) = (&customer_name_key, &customer_code_key) {
            if let (Some(name), Some(code)) = (present(row, name_key), present(row, code_key)) {
                customer_name_to_code.insert(name, code);
            }
        }
        if let (Some(product_key), Some(brand_key)) = (&product_key, &brand_key) {
            if let (Some(product), Some(brand)) =
                (present(row, product_key), present(row, brand_key))
            {
                product_to_brand.insert(product, brand);
            }
        }
    }

    HeaderMappings {
        customer_name_key,
        customer_code_key,
        product_key,
        brand_key,
        customer_name_to_code,
        product_to_brand,
    }
}

/// Trimmed, non-empty value of a cell.
fn present(row: &RawRow, key: &str) -> Option<String> {
    let value = row.get(key)?;
    if value.is_null() {
        return None;
    }
    let s = value_string(value).trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_field_metadata_samples_and_types() {
        let rows = [
            row(json!({"Customer_Name": "Emirates", "Fill_Level": "85%", "Bottles": 12})),
            row(json!({"Customer_Name": "Swiss", "Fill_Level": "60%", "Bottles": 7})),
            row(json!({"Customer_Name": "Emirates", "Fill_Level": null, "Bottles": 12})),
        ];
        let refs: Vec<&RawRow> = rows.iter().collect();
        let fields = infer_fields(&refs);

        assert_eq!(fields.len(), 3);
        let name = &fields[0];
        assert_eq!(name.name, "Customer_Name");
        assert_eq!(name.sample_values, vec!["Emirates", "Swiss"]);
        assert_eq!(name.field_type, "string");

        let fill = &fields[1];
        assert_eq!(fill.sample_values, vec!["85%", "60%"]);
        assert_eq!(fill.field_type, "number");

        let bottles = &fields[2];
        assert_eq!(bottles.sample_values, vec!["12", "7"]);
        assert_eq!(bottles.field_type, "number");
    }

    #[test]
    fn test_no_rows_no_fields() {
        assert!(infer_fields(&[]).is_empty());
    }

    #[test]
    fn test_mapping_inference() {
        let rows = [
            row(json!({
                "Customer_Name": "Emirates",
                "Customer_Code": "EK",
                "Product": "Single Malt 12y",
                "Brand": "Glen Co"
            })),
            row(json!({
                "Customer_Name": "British Airways",
                "Customer_Code": "BA",
                "Product": "London Dry Gin",
                "Brand": "Gin & Sons"
            })),
        ];
        let refs: Vec<&RawRow> = rows.iter().collect();
        let mappings = infer_mappings(&refs);

        assert_eq!(mappings.customer_name_key.as_deref(), Some("Customer_Name"));
        assert_eq!(mappings.customer_code_key.as_deref(), Some("Customer_Code"));
        assert_eq!(
            mappings.customer_name_to_code.get("Emirates").map(String::as_str),
            Some("EK")
        );
        assert_eq!(
            mappings.product_to_brand.get("London Dry Gin").map(String::as_str),
            Some("Gin & Sons")
        );
    }

    #[test]
    fn test_mapping_without_role_columns() {
        let rows = [row(json!({"Fill_Level": "30-70", "Action": "Refill"}))];
        let refs: Vec<&RawRow> = rows.iter().collect();
        let mappings = infer_mappings(&refs);
        assert!(mappings.customer_name_key.is_none());
        assert!(mappings.customer_name_to_code.is_empty());
    }
}
