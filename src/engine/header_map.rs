// ==========================================
// Header -> bottle attribute mapping
// ==========================================
// Imported datasets name their columns freely ("Fill_Level", "fill %",
// "Customer Airline Code", ...). One pure function maps a header to the
// bottle attribute it constrains, by substring heuristics.
// ==========================================

use crate::domain::bottle::Bottle;

/// Bottle attribute a dataset column maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottleField {
    FillLevel,
    SealStatus,
    LabelStatus,
    Cleanliness,
    CustomerCode,
    /// Header matched no attribute. Unmatchable against a bottle: the
    /// column can only pass as a wildcard.
    Unknown,
}

/// Map a column header to a bottle attribute.
///
/// Checks run in fixed precedence; the first matching substring wins.
pub fn map_header(header: &str) -> BottleField {
    let h = header.to_lowercase();
    if h.contains("fill") {
        BottleField::FillLevel
    } else if h.contains("seal") {
        BottleField::SealStatus
    } else if h.contains("label") {
        BottleField::LabelStatus
    } else if h.contains("clean") {
        BottleField::Cleanliness
    } else if h.contains("customer") || h.contains("airline") {
        BottleField::CustomerCode
    } else {
        BottleField::Unknown
    }
}

/// The bottle attribute's string form for option-list matching.
///
/// `FillLevel` is matched numerically, not through this path; `Unknown`
/// has no value.
pub fn attribute_string(bottle: &Bottle, field: BottleField) -> Option<String> {
    match field {
        BottleField::SealStatus => Some(bottle.seal_status.to_string()),
        BottleField::LabelStatus => Some(bottle.label_status.to_string()),
        BottleField::Cleanliness => Some(bottle.cleanliness.to_string()),
        BottleField::CustomerCode => Some(bottle.customer_code.clone()),
        BottleField::FillLevel => Some(bottle.fill_level.to_string()),
        BottleField::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_headers() {
        assert_eq!(map_header("Fill_Level"), BottleField::FillLevel);
        assert_eq!(map_header("fill %"), BottleField::FillLevel);
        assert_eq!(map_header("Seal_Status"), BottleField::SealStatus);
        assert_eq!(map_header("Label Condition"), BottleField::LabelStatus);
        assert_eq!(map_header("Cleanliness"), BottleField::Cleanliness);
        assert_eq!(map_header("Customer_Name"), BottleField::CustomerCode);
        assert_eq!(map_header("Airline Code"), BottleField::CustomerCode);
    }

    #[test]
    fn test_precedence_first_substring_wins() {
        // "fill" is checked before "seal"
        assert_eq!(map_header("seal_fill"), BottleField::FillLevel);
    }

    #[test]
    fn test_unknown_header() {
        assert_eq!(map_header("Brand"), BottleField::Unknown);
        assert_eq!(map_header("Product"), BottleField::Unknown);
    }
}
