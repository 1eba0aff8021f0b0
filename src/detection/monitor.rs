// ==========================================
// ErrorMonitor - in-memory mock sensor alert monitor
// ==========================================
// Process-wide state owned by AppState (never a module-level global).
// Readings are submitted over HTTP or through the simulate operation;
// nothing here persists.
// ==========================================

use crate::domain::sensor::{
    Alert, AlertLevel, AlertType, ProcessedReading, SensorReading, StationMetrics,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Alerts younger than this count as "active" in the dashboard.
const ACTIVE_ALERT_WINDOW_MINUTES: i64 = 30;

/// Stations with an error rate above this are listed as problematic.
const PROBLEMATIC_ERROR_RATE: f64 = 0.1;

/// Deviation score above which a reading counts toward a station's
/// alert count.
const STATION_ALERT_DEVIATION: f64 = 0.3;

#[derive(Debug, Default)]
struct MonitorState {
    readings: Vec<ProcessedReading>,
    alerts: Vec<Alert>,
    stations: BTreeMap<String, StationMetrics>,
}

#[derive(Debug, Default)]
pub struct ErrorMonitor {
    state: Mutex<MonitorState>,
}

// ==========================================
// Dashboard DTOs
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicStation {
    pub station_id: String,
    pub error_rate: f64,
    pub alert_count: i64,
    pub last_alert: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionDashboard {
    pub total_readings: i64,
    pub total_alerts: i64,
    pub active_alerts: i64,
    pub overall_error_rate: f64,
    pub problematic_stations: Vec<ProblematicStation>,
    /// last 10 alerts, newest first
    pub recent_alerts: Vec<Alert>,
    pub station_metrics: BTreeMap<String, StationMetrics>,
}

impl ErrorMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one reading: stamp it, evaluate alert rules, update station
    /// metrics. Returns the generated alert, if any.
    pub fn process_reading(&self, reading: SensorReading) -> Option<Alert> {
        let processed = ProcessedReading {
            id: Uuid::new_v4(),
            processed_at: Utc::now().to_rfc3339(),
            reading,
        };

        let alert = analyze_for_alert(&processed);

        let mut state = self.lock();
        state.readings.push(processed.clone());
        if let Some(alert) = &alert {
            state.alerts.push(alert.clone());
        }
        update_station_metrics(&mut state.stations, &processed);

        alert
    }

    /// Most recent alerts, newest first.
    pub fn recent_alerts(&self, limit: usize) -> Vec<Alert> {
        let state = self.lock();
        state.alerts.iter().rev().take(limit).cloned().collect()
    }

    pub fn dashboard(&self) -> DetectionDashboard {
        let state = self.lock();
        let total_readings = state.readings.len() as i64;
        let total_alerts = state.alerts.len() as i64;

        let cutoff = Utc::now() - Duration::minutes(ACTIVE_ALERT_WINDOW_MINUTES);
        let active_alerts = state
            .alerts
            .iter()
            .filter(|alert| {
                chrono::DateTime::parse_from_rfc3339(&alert.timestamp)
                    .map(|ts| ts.with_timezone(&Utc) > cutoff)
                    .unwrap_or(false)
            })
            .count() as i64;

        let problematic_stations = state
            .stations
            .iter()
            .filter(|(_, m)| m.error_rate > PROBLEMATIC_ERROR_RATE)
            .map(|(station_id, m)| ProblematicStation {
                station_id: station_id.clone(),
                error_rate: m.error_rate,
                alert_count: m.alert_count,
                last_alert: m.last_alert.clone(),
            })
            .collect();

        DetectionDashboard {
            total_readings,
            total_alerts,
            active_alerts,
            overall_error_rate: if total_readings > 0 {
                total_alerts as f64 / total_readings as f64
            } else {
                0.0
            },
            problematic_stations,
            recent_alerts: state.alerts.iter().rev().take(10).cloned().collect(),
            station_metrics: state.stations.clone(),
        }
    }

    /// Ingest every mock reading; returns the number of alerts generated.
    pub fn simulate(&self) -> usize {
        mock_readings()
            .into_iter()
            .filter_map(|reading| self.process_reading(reading))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MonitorState> {
        // monitor state is advisory; a poisoned lock still yields usable data
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Alert rules, first match wins.
fn analyze_for_alert(processed: &ProcessedReading) -> Option<Alert> {
    let r = &processed.reading;

    let (level, alert_type, message) = if r.deviation_score > 0.7 {
        (
            AlertLevel::High,
            AlertType::Deviation,
            format!("High deviation detected: {}", r.deviation_score),
        )
    } else if r.deviation_score > 0.3 {
        (
            AlertLevel::Medium,
            AlertType::Deviation,
            format!("Medium deviation: {}", r.deviation_score),
        )
    } else if r.sensor_type == "Camera" && r.detected_value == "Extra_Item" {
        (
            AlertLevel::Medium,
            AlertType::LayoutError,
            "Extra item detected in layout".to_string(),
        )
    } else if r.sensor_type == "Weight" && weight_discrepancy(r) {
        (
            AlertLevel::High,
            AlertType::WeightError,
            "Significant weight discrepancy".to_string(),
        )
    } else {
        return None;
    };

    Some(Alert {
        id: Uuid::new_v4(),
        station_id: r.station_id.clone(),
        drawer_id: r.drawer_id.clone(),
        level,
        message,
        alert_type,
        sensor_type: r.sensor_type.clone(),
        timestamp: Utc::now().to_rfc3339(),
        reading: processed.clone(),
    })
}

fn weight_discrepancy(reading: &SensorReading) -> bool {
    let expected = crate::detection::comparator::leading_number(&reading.expected_value);
    let detected = crate::detection::comparator::leading_number(&reading.detected_value);
    match (expected, detected) {
        (Some(e), Some(d)) => (e - d).abs() > 0.5,
        _ => false,
    }
}

fn update_station_metrics(
    stations: &mut BTreeMap<String, StationMetrics>,
    processed: &ProcessedReading,
) {
    let reading = &processed.reading;
    let metrics = stations.entry(reading.station_id.clone()).or_default();
    metrics.total_readings += 1;
    metrics.sensor_types.insert(reading.sensor_type.clone());

    if reading.deviation_score > STATION_ALERT_DEVIATION {
        metrics.alert_count += 1;
        metrics.last_alert = Some(Utc::now().to_rfc3339());
    }

    metrics.error_rate = metrics.alert_count as f64 / metrics.total_readings as f64;
}

/// Fixed demo readings (one clean, one with a weight deviation).
pub fn mock_readings() -> Vec<SensorReading> {
    vec![
        SensorReading {
            stream_id: "PK01_STREAM".to_string(),
            station_id: "PK01".to_string(),
            drawer_id: "DRW_013".to_string(),
            spec_id: "SPEC_20251013_14".to_string(),
            sensor_type: "Camera".to_string(),
            expected_value: "Layout_OK".to_string(),
            detected_value: "Layout_OK".to_string(),
            deviation_score: 0.0,
            operator_id: "EMP044".to_string(),
            flight_number: "QR117".to_string(),
            customer_name: "Qatar Airways".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        },
        SensorReading {
            stream_id: "PK01_STREAM".to_string(),
            station_id: "PK01".to_string(),
            drawer_id: "DRW_033".to_string(),
            spec_id: "SPEC_20251013_01".to_string(),
            sensor_type: "Weight".to_string(),
            expected_value: "4.71 kg".to_string(),
            detected_value: "4.4 kg".to_string(),
            deviation_score: 0.66,
            operator_id: "EMP058".to_string(),
            flight_number: "LX321".to_string(),
            customer_name: "Swiss International Air Lines".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        },
    ]
}
