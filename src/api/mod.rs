// ==========================================
// Catering Execution Hub - API layer
// ==========================================
// Business API facade consumed by the HTTP adapter. Each method maps to
// one route: parse input, call services/repositories, return a DTO.
// ==========================================

pub mod alcohol_api;
pub mod bottle_api;
pub mod detection_api;
pub mod efficiency_api;
pub mod error;

// Re-export core types
pub use alcohol_api::{AlcoholApi, ImportRequest};
pub use bottle_api::{BottleApi, DecisionHistoryView};
pub use detection_api::{CompareOutcome, CompareRequest, DetectionApi, ReadingOutcome};
pub use efficiency_api::{DashboardMetrics, EfficiencyApi, EmployeeView, NewPackingRecord};
pub use error::{ApiError, ApiResult};
