// ==========================================
// Training recommendations
// ==========================================
// One recommendation per employee per triggered rule; an employee may
// receive several. Sorted by priority, then by efficiency score
// descending.
// ==========================================

use crate::domain::efficiency::{
    EfficiencyRecord, EmployeeMetrics, TrainingPriority, TrainingRecommendation,
};
use std::collections::BTreeMap;

const LAYOUT_NOTE_MARKERS: [&str; 2] = ["Layout confusion", "Layout unclear"];

/// Derive training recommendations from every employee's metrics and
/// supervisor note history.
pub fn training_recommendations(
    grouped_records: &BTreeMap<String, Vec<EfficiencyRecord>>,
    metrics: &BTreeMap<String, EmployeeMetrics>,
) -> Vec<TrainingRecommendation> {
    let mut recommendations = Vec::new();

    for (employee_id, m) in metrics {
        if m.rework_rate > 0.2 {
            recommendations.push(recommendation(
                employee_id,
                TrainingPriority::High,
                "High rework rate",
                "Intensive layout training required",
                m,
            ));
        }

        if m.average_time > 60.0 {
            recommendations.push(recommendation(
                employee_id,
                TrainingPriority::Medium,
                "Slow packing speed",
                "Efficiency and time management training",
                m,
            ));
        }

        if m.accuracy_rate < 0.7 {
            recommendations.push(recommendation(
                employee_id,
                TrainingPriority::High,
                "Low accuracy rate",
                "Quality control and attention to detail training",
                m,
            ));
        }

        let has_layout_issue = grouped_records
            .get(employee_id)
            .map(|records| {
                records.iter().any(|r| {
                    LAYOUT_NOTE_MARKERS
                        .iter()
                        .any(|marker| r.supervisor_notes.contains(marker))
                })
            })
            .unwrap_or(false);
        if has_layout_issue {
            recommendations.push(recommendation(
                employee_id,
                TrainingPriority::Medium,
                "Layout understanding issues",
                "Visual layout training and reference materials",
                m,
            ));
        }
    }

    recommendations.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.score.cmp(&a.score))
    });
    recommendations
}

fn recommendation(
    employee_id: &str,
    priority: TrainingPriority,
    issue: &str,
    recommendation: &str,
    metrics: &EmployeeMetrics,
) -> TrainingRecommendation {
    TrainingRecommendation {
        employee_id: employee_id.to_string(),
        priority,
        issue: issue.to_string(),
        recommendation: recommendation.to_string(),
        score: metrics.efficiency_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::efficiency::AccuracyScore;
    use crate::metrics::aggregator::{compute_all_metrics, group_by_employee};

    fn record(
        employee: &str,
        duration: i64,
        score: AccuracyScore,
        notes: &str,
    ) -> EfficiencyRecord {
        EfficiencyRecord {
            record_id: String::new(),
            employee_id: employee.to_string(),
            flight_number: "LX726".to_string(),
            spec_id: "SPEC_D01".to_string(),
            start_time: "2025-10-13 06:00:00".to_string(),
            end_time: "2025-10-13 06:01:00".to_string(),
            duration_seconds: duration,
            accuracy_score: score,
            items_packed: 12,
            rework_flag: score == AccuracyScore::ReworkRequired,
            supervisor_notes: notes.to_string(),
        }
    }

    #[test]
    fn test_multiple_rules_fire_per_employee() {
        // high rework AND layout note: two recommendations
        let records = vec![
            record("EMP018", 30, AccuracyScore::ReworkRequired, "Layout confusion"),
            record("EMP018", 30, AccuracyScore::Pass, ""),
        ];
        let grouped = group_by_employee(&records);
        let metrics = compute_all_metrics(&records);
        let recs = training_recommendations(&grouped, &metrics);

        let issues: Vec<&str> = recs.iter().map(|r| r.issue.as_str()).collect();
        assert!(issues.contains(&"High rework rate"));
        assert!(issues.contains(&"Low accuracy rate"));
        assert!(issues.contains(&"Layout understanding issues"));
    }

    #[test]
    fn test_priority_sort_high_before_medium() {
        let records = vec![
            // EMP_SLOW: only slow (MEDIUM)
            record("EMP_SLOW", 90, AccuracyScore::Pass, ""),
            // EMP_REWORK: high rework (HIGH)
            record("EMP_REWORK", 30, AccuracyScore::ReworkRequired, ""),
            record("EMP_REWORK", 30, AccuracyScore::Pass, ""),
        ];
        let grouped = group_by_employee(&records);
        let metrics = compute_all_metrics(&records);
        let recs = training_recommendations(&grouped, &metrics);

        assert_eq!(recs.first().unwrap().priority, TrainingPriority::High);
        assert_eq!(recs.last().unwrap().priority, TrainingPriority::Medium);
    }

    #[test]
    fn test_clean_employee_gets_no_recommendation() {
        let records = vec![record("EMP_OK", 30, AccuracyScore::Pass, "Improved speed")];
        let grouped = group_by_employee(&records);
        let metrics = compute_all_metrics(&records);
        assert!(training_recommendations(&grouped, &metrics).is_empty());
    }
}
