// ==========================================
// Catering Execution Hub - mock sensor entities
// ==========================================
// The "real-time" pieces are manually triggered mocks: readings arrive via
// HTTP, not from real sensors, and live only in process memory.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

// ==========================================
// Sensor reading (as submitted)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(default)]
    pub stream_id: String,
    pub station_id: String,
    #[serde(default)]
    pub drawer_id: String,
    #[serde(default)]
    pub spec_id: String,
    /// e.g. "Camera", "Weight", "RFID"
    pub sensor_type: String,
    #[serde(default)]
    pub expected_value: String,
    #[serde(default)]
    pub detected_value: String,
    #[serde(default)]
    pub deviation_score: f64,
    #[serde(default)]
    pub operator_id: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub timestamp: String,
}

/// A reading after ingestion: stamped with an id and processing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReading {
    pub id: Uuid,
    pub processed_at: String,
    #[serde(flatten)]
    pub reading: SensorReading,
}

// ==========================================
// Alerts
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "DEVIATION")]
    Deviation,
    #[serde(rename = "LAYOUT_ERROR")]
    LayoutError,
    #[serde(rename = "WEIGHT_ERROR")]
    WeightError,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::Deviation => write!(f, "DEVIATION"),
            AlertType::LayoutError => write!(f, "LAYOUT_ERROR"),
            AlertType::WeightError => write!(f, "WEIGHT_ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub station_id: String,
    pub drawer_id: String,
    pub level: AlertLevel,
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub sensor_type: String,
    pub timestamp: String,
    pub reading: ProcessedReading,
}

// ==========================================
// Per-station rollup
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMetrics {
    pub total_readings: i64,
    pub alert_count: i64,
    pub error_rate: f64,
    pub last_alert: Option<String>,
    pub sensor_types: BTreeSet<String>,
}
