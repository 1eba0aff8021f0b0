// ==========================================
// Catering Execution Hub - bottle entity
// ==========================================
// A bottle is transient: built from each evaluation request,
// never persisted. Enum wire strings match the cabin-crew
// inspection form exactly.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Seal status
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SealStatus {
    Sealed,
    Resealed,
    Opened,
}

impl fmt::Display for SealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SealStatus::Sealed => write!(f, "Sealed"),
            SealStatus::Resealed => write!(f, "Resealed"),
            SealStatus::Opened => write!(f, "Opened"),
        }
    }
}

// ==========================================
// Cleanliness grade
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cleanliness {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for Cleanliness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cleanliness::Excellent => write!(f, "Excellent"),
            Cleanliness::Good => write!(f, "Good"),
            Cleanliness::Fair => write!(f, "Fair"),
            Cleanliness::Poor => write!(f, "Poor"),
        }
    }
}

// ==========================================
// Label status
// ==========================================
// Wire format uses underscores ("Slightly_Damaged"), matching the
// dataset vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStatus {
    Intact,
    #[serde(rename = "Slightly_Damaged")]
    SlightlyDamaged,
    #[serde(rename = "Heavily_Damaged")]
    HeavilyDamaged,
}

impl fmt::Display for LabelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelStatus::Intact => write!(f, "Intact"),
            LabelStatus::SlightlyDamaged => write!(f, "Slightly_Damaged"),
            LabelStatus::HeavilyDamaged => write!(f, "Heavily_Damaged"),
        }
    }
}

// ==========================================
// Bottle
// ==========================================
/// A bottle under evaluation.
///
/// `customer_code` is the 2-letter airline code (e.g. "EK", "BA", "LX").
/// `fill_level` is a percentage in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottle {
    pub customer_code: String,
    pub fill_level: f64,
    pub seal_status: SealStatus,
    pub cleanliness: Cleanliness,
    pub label_status: LabelStatus,
}
