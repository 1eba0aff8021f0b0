// ==========================================
// Efficiency metrics aggregator
// ==========================================
// compute_metrics is the single shared code path for per-employee
// aggregates; adding a record triggers full recomputation, never an
// incremental update.
// ==========================================

use crate::domain::efficiency::{AccuracyScore, EfficiencyRecord, EmployeeMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate one employee's full record set.
///
/// Division-by-zero policy: averages and rates are 0.0 when their
/// denominator is 0 (empty record set, or no items packed).
pub fn compute_metrics(records: &[EfficiencyRecord]) -> EmployeeMetrics {
    let total_tasks = records.len() as i64;
    let total_duration: i64 = records.iter().map(|r| r.duration_seconds).sum();
    let total_items: i64 = records.iter().map(|r| r.items_packed).sum();

    let completed_tasks = count_score(records, AccuracyScore::Pass);
    let rework_tasks = count_score(records, AccuracyScore::ReworkRequired);
    let minor_errors = count_score(records, AccuracyScore::MinorError);

    let average_time = ratio(total_duration as f64, total_tasks as f64);
    let average_time_per_item = ratio(total_duration as f64, total_items as f64);
    let accuracy_rate = ratio(completed_tasks as f64, total_tasks as f64);
    let rework_rate = ratio(rework_tasks as f64, total_tasks as f64);

    let efficiency_score = efficiency_score(average_time, rework_rate, minor_errors, accuracy_rate);

    EmployeeMetrics {
        total_tasks,
        total_duration,
        total_items,
        completed_tasks,
        rework_tasks,
        minor_errors,
        average_time,
        average_time_per_item,
        accuracy_rate,
        rework_rate,
        efficiency_score,
    }
}

fn count_score(records: &[EfficiencyRecord], score: AccuracyScore) -> i64 {
    records.iter().filter(|r| r.accuracy_score == score).count() as i64
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Heuristic 0-100 score: start at 100, apply penalties and the accuracy
/// bonus, clamp.
fn efficiency_score(
    average_time: f64,
    rework_rate: f64,
    minor_errors: i64,
    accuracy_rate: f64,
) -> i64 {
    let mut score: i64 = 100;

    // slow packing
    if average_time > 60.0 {
        score -= 20;
    } else if average_time > 40.0 {
        score -= 10;
    }

    // rework rate
    if rework_rate > 0.2 {
        score -= 30;
    } else if rework_rate > 0.1 {
        score -= 15;
    }

    // minor errors
    if minor_errors > 3 {
        score -= 10;
    }

    // high accuracy bonus
    if accuracy_rate > 0.9 {
        score += 10;
    }

    score.clamp(0, 100)
}

/// Group records by employee, preserving each employee's record order.
pub fn group_by_employee(
    records: &[EfficiencyRecord],
) -> BTreeMap<String, Vec<EfficiencyRecord>> {
    let mut grouped: BTreeMap<String, Vec<EfficiencyRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.employee_id.clone())
            .or_default()
            .push(record.clone());
    }
    grouped
}

/// Metrics for every employee in the record set.
pub fn compute_all_metrics(records: &[EfficiencyRecord]) -> BTreeMap<String, EmployeeMetrics> {
    group_by_employee(records)
        .into_iter()
        .map(|(employee_id, employee_records)| {
            (employee_id, compute_metrics(&employee_records))
        })
        .collect()
}

// ==========================================
// Ranking
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRanking {
    pub employee_id: String,
    pub efficiency_score: i64,
    pub average_time: f64,
    pub accuracy_rate: f64,
    pub total_tasks: i64,
    pub rework_rate: f64,
}

/// All employees sorted by efficiency score, best first.
/// Employee id is the deterministic tie-break.
pub fn rank_employees(metrics: &BTreeMap<String, EmployeeMetrics>) -> Vec<EmployeeRanking> {
    let mut ranking: Vec<EmployeeRanking> = metrics
        .iter()
        .map(|(employee_id, m)| EmployeeRanking {
            employee_id: employee_id.clone(),
            efficiency_score: m.efficiency_score,
            average_time: m.average_time,
            accuracy_rate: m.accuracy_rate,
            total_tasks: m.total_tasks,
            rework_rate: m.rework_rate,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.efficiency_score
            .cmp(&a.efficiency_score)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(employee: &str, duration: i64, score: AccuracyScore) -> EfficiencyRecord {
        EfficiencyRecord {
            record_id: String::new(),
            employee_id: employee.to_string(),
            flight_number: "LX721".to_string(),
            spec_id: "SPEC_A01".to_string(),
            start_time: "2025-10-13 07:00:00".to_string(),
            end_time: "2025-10-13 07:01:00".to_string(),
            duration_seconds: duration,
            accuracy_score: score,
            items_packed: 10,
            rework_flag: score == AccuracyScore::ReworkRequired,
            supervisor_notes: String::new(),
        }
    }

    #[test]
    fn test_all_pass_metrics() {
        let records = vec![
            record("EMP001", 40, AccuracyScore::Pass),
            record("EMP001", 60, AccuracyScore::Pass),
            record("EMP001", 80, AccuracyScore::Pass),
        ];
        let m = compute_metrics(&records);
        assert_eq!(m.total_tasks, 3);
        assert_eq!(m.average_time, 60.0);
        assert_eq!(m.accuracy_rate, 1.0);
        assert_eq!(m.rework_rate, 0.0);
        // -10 for averageTime > 40, +10 accuracy bonus: net 100
        assert_eq!(m.efficiency_score, 100);
    }

    #[test]
    fn test_empty_records_zero_not_nan() {
        let m = compute_metrics(&[]);
        assert_eq!(m.total_tasks, 0);
        assert_eq!(m.average_time, 0.0);
        assert_eq!(m.average_time_per_item, 0.0);
        assert_eq!(m.accuracy_rate, 0.0);
        assert_eq!(m.rework_rate, 0.0);
    }

    #[test]
    fn test_rework_penalty_tiers() {
        // 1 rework of 4 tasks: rate 0.25 -> -30; avg time 30 -> no penalty;
        // accuracy 0.75 -> no bonus
        let records = vec![
            record("EMP002", 30, AccuracyScore::Pass),
            record("EMP002", 30, AccuracyScore::Pass),
            record("EMP002", 30, AccuracyScore::Pass),
            record("EMP002", 30, AccuracyScore::ReworkRequired),
        ];
        assert_eq!(compute_metrics(&records).efficiency_score, 70);
    }

    #[test]
    fn test_minor_error_penalty() {
        // 4 minor errors -> -10; accuracy 0.2 -> no bonus; avg 30 -> none
        let mut records = vec![record("EMP003", 30, AccuracyScore::Pass)];
        for _ in 0..4 {
            records.push(record("EMP003", 30, AccuracyScore::MinorError));
        }
        assert_eq!(compute_metrics(&records).efficiency_score, 90);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        // avg 90 (-20), rework rate 1.0 (-30), accuracy 0 (no bonus) -> 50;
        // stack more penalties via minor errors impossible here, so check
        // the clamp with an artificial extreme instead
        let records: Vec<EfficiencyRecord> = (0..10)
            .map(|_| record("EMP004", 90, AccuracyScore::ReworkRequired))
            .collect();
        let m = compute_metrics(&records);
        assert_eq!(m.efficiency_score, 50);
        assert!(m.efficiency_score >= 0);
    }

    #[test]
    fn test_ranking_order_and_tie_break() {
        let records = vec![
            record("EMP_B", 30, AccuracyScore::Pass),
            record("EMP_A", 30, AccuracyScore::Pass),
            record("EMP_C", 90, AccuracyScore::ReworkRequired),
        ];
        let ranking = rank_employees(&compute_all_metrics(&records));
        assert_eq!(ranking.len(), 3);
        // A and B tie on score; id breaks the tie
        assert_eq!(ranking[0].employee_id, "EMP_A");
        assert_eq!(ranking[1].employee_id, "EMP_B");
        assert_eq!(ranking[2].employee_id, "EMP_C");
    }
}
