// ==========================================
// Catering Execution Hub - domain layer
// ==========================================
// Entities and types shared across the three modules
// (bottle decisions, packing efficiency, error detection).
// No data access logic, no engine logic.
// ==========================================

pub mod bottle;
pub mod decision;
pub mod efficiency;
pub mod record;
pub mod sensor;

// Re-export core types
pub use bottle::{Bottle, Cleanliness, LabelStatus, SealStatus};
pub use decision::{ActionColor, BottleAction, Decision};
pub use efficiency::{
    AccuracyScore, BreakdownRow, DatasetStats, EfficiencyRecord, EmployeeMetrics,
    TrainingPriority, TrainingRecommendation,
};
pub use record::{ImportedRecord, RecordSource};
pub use sensor::{
    Alert, AlertLevel, AlertType, ProcessedReading, SensorReading, StationMetrics,
};
