// ==========================================
// Catering Execution Hub - efficiency metrics
// ==========================================
// Pure aggregation over efficiency records. All presentations (per
// employee, ranking, dashboard) run through compute_metrics so no two
// code paths can drift apart.
// ==========================================

pub mod aggregator;
pub mod training;

pub use aggregator::{
    compute_all_metrics, compute_metrics, group_by_employee, rank_employees, EmployeeRanking,
};
pub use training::training_recommendations;
