// ==========================================
// Catering Execution Hub - mock error detection
// ==========================================
// Two pieces: a pure reference-vs-operator comparator, and an in-memory
// sensor alert monitor. "Real-time" is a manually triggered mock; there
// is no sensor ingestion.
// ==========================================

pub mod comparator;
pub mod monitor;

pub use comparator::{compare, OperatorInput};
pub use monitor::{DetectionDashboard, ErrorMonitor, ProblematicStation};
