// ==========================================
// Catering Execution Hub - core library
// ==========================================
// Airline catering operations demo: bottle decision rules, packing
// efficiency metrics, mock real-time error detection.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Data access layer
pub mod repository;

// Engine layer - bottle decision rules
pub mod engine;

// Metrics layer - packing efficiency aggregation
pub mod metrics;

// Detection layer - comparator + mock sensor monitor
pub mod detection;

// Import layer - external data
pub mod importer;

// Database infrastructure (connection init / PRAGMA / schema)
pub mod db;

// Runtime configuration
pub mod config;

// Logging
pub mod logging;

// API layer - business interface
pub mod api;

// Application layer - state wiring + HTTP adapter
pub mod app;

// ==========================================
// Re-export core types
// ==========================================

// Domain entities
pub use domain::{
    Bottle, Decision, EfficiencyRecord, EmployeeMetrics, ImportedRecord, RecordSource,
    SensorReading, TrainingRecommendation,
};

// Engines
pub use engine::{BottleDecisionEngine, DatasetRuleEvaluator};

// Detection
pub use detection::{ErrorMonitor, OperatorInput};

// API
pub use api::{AlcoholApi, BottleApi, DetectionApi, EfficiencyApi};

// Application
pub use app::AppState;
pub use config::AppConfig;

// ==========================================
// Constants
// ==========================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Catering Execution Hub";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
