// ==========================================
// Packing efficiency API - integration tests
// ==========================================
// Seeded demo data, dashboard rollup, record insertion with metric
// recomputation, breakdowns vs. the shared aggregator.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use catering_hub::api::efficiency_api::NewPackingRecord;
use catering_hub::api::error::ApiError;
use catering_hub::domain::efficiency::{AccuracyScore, TrainingPriority};
use catering_hub::repository::efficiency_repo::BreakdownDimension;
use test_helpers::create_test_state;

#[test]
fn test_seeded_dashboard_rollup() {
    let (_db, state) = create_test_state().unwrap();
    let dashboard = state.efficiency_api.dashboard().unwrap();

    // five seeded records, five distinct employees, one rework
    assert_eq!(dashboard.total_tasks, 5);
    assert_eq!(dashboard.total_employees, 5);
    assert_eq!(dashboard.total_rework, 1);
    assert_eq!(dashboard.rework_rate, 0.2);

    // EMP018 (the rework) scores 70, everyone else 100
    assert_eq!(dashboard.employee_metrics["EMP018"].efficiency_score, 70);
    assert_eq!(dashboard.employee_metrics["EMP004"].efficiency_score, 100);
    assert_eq!(dashboard.average_efficiency, 94.0);

    assert_eq!(dashboard.top_performers.len(), 3);
    assert_eq!(dashboard.top_performers[0].efficiency_score, 100);
}

#[test]
fn test_seeded_employee_metrics_values() {
    let (_db, state) = create_test_state().unwrap();

    // EMP004: one task, 43s, Pass, 11 items
    let view = state.efficiency_api.employee("EMP004").unwrap();
    assert_eq!(view.metrics.total_tasks, 1);
    assert_eq!(view.metrics.total_duration, 43);
    assert_eq!(view.metrics.average_time, 43.0);
    assert_eq!(view.metrics.accuracy_rate, 1.0);
    assert_eq!(view.metrics.rework_rate, 0.0);
    // -10 for avg > 40, +10 accuracy bonus
    assert_eq!(view.metrics.efficiency_score, 100);
    assert_eq!(view.recent_records.len(), 1);
    assert_eq!(view.recent_records[0].record_id, "PKG001");
}

#[test]
fn test_unknown_employee_is_not_found() {
    let (_db, state) = create_test_state().unwrap();
    match state.efficiency_api.employee("EMP999") {
        Err(ApiError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other.map(|v| v.employee_id)),
    }
}

#[test]
fn test_ranking_sorted_by_score() {
    let (_db, state) = create_test_state().unwrap();
    let ranking = state.efficiency_api.ranking().unwrap();

    assert_eq!(ranking.len(), 5);
    for pair in ranking.windows(2) {
        assert!(pair[0].efficiency_score >= pair[1].efficiency_score);
    }
    // the rework employee ranks last
    assert_eq!(ranking.last().unwrap().employee_id, "EMP018");
}

#[test]
fn test_training_recommendations_for_seeded_data() {
    let (_db, state) = create_test_state().unwrap();
    let recommendations = state.efficiency_api.training().unwrap();

    // EMP018 triggers rework (HIGH), accuracy (HIGH) and layout (MEDIUM)
    let emp018: Vec<_> = recommendations
        .iter()
        .filter(|r| r.employee_id == "EMP018")
        .collect();
    assert_eq!(emp018.len(), 3);
    assert!(emp018.iter().any(|r| r.issue == "High rework rate"));
    assert!(emp018.iter().any(|r| r.issue == "Layout understanding issues"));

    // priorities are non-increasing
    for pair in recommendations.windows(2) {
        assert!(pair[0].priority.weight() >= pair[1].priority.weight());
    }
    assert_eq!(recommendations[0].priority, TrainingPriority::High);
}

#[test]
fn test_add_record_assigns_id_and_recomputes_metrics() {
    let (_db, state) = create_test_state().unwrap();

    let before = state.efficiency_api.employee("EMP004").unwrap();
    assert_eq!(before.metrics.total_tasks, 1);

    let record = state
        .efficiency_api
        .add_record(NewPackingRecord {
            employee_id: "EMP004".to_string(),
            flight_number: "LX735".to_string(),
            spec_id: "SPEC_B01".to_string(),
            start_time: "2025-10-14 08:00:00".to_string(),
            end_time: "2025-10-14 08:01:10".to_string(),
            duration_seconds: 70,
            accuracy_score: AccuracyScore::Pass,
            items_packed: 9,
            rework_flag: false,
            supervisor_notes: String::new(),
        })
        .unwrap();

    // sixth record overall
    assert_eq!(record.record_id, "PKG006");

    let after = state.efficiency_api.employee("EMP004").unwrap();
    assert_eq!(after.metrics.total_tasks, 2);
    assert_eq!(after.metrics.total_duration, 113);
    assert_eq!(after.metrics.average_time, 56.5);
    // still above the 40s tier, still all-pass
    assert_eq!(after.metrics.efficiency_score, 100);
}

#[test]
fn test_add_record_requires_employee_id() {
    let (_db, state) = create_test_state().unwrap();
    let result = state.efficiency_api.add_record(NewPackingRecord {
        employee_id: "  ".to_string(),
        flight_number: String::new(),
        spec_id: String::new(),
        start_time: String::new(),
        end_time: String::new(),
        duration_seconds: 10,
        accuracy_score: AccuracyScore::Pass,
        items_packed: 1,
        rework_flag: false,
        supervisor_notes: String::new(),
    });
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_simulate_record_round_robin() {
    let (_db, state) = create_test_state().unwrap();

    let first = state.efficiency_api.simulate_record().unwrap();
    let second = state.efficiency_api.simulate_record().unwrap();
    let third = state.efficiency_api.simulate_record().unwrap();
    let fourth = state.efficiency_api.simulate_record().unwrap();

    assert_eq!(first.employee_id, "EMP012");
    assert_eq!(second.employee_id, "EMP018");
    assert_eq!(third.employee_id, "EMP004");
    // wraps around
    assert_eq!(fourth.employee_id, "EMP012");
    assert_eq!(fourth.record_id, "PKG009");
}

#[test]
fn test_stats_summary_over_seeded_data() {
    let (_db, state) = create_test_state().unwrap();
    let stats = state.efficiency_api.stats().unwrap();

    assert_eq!(stats.total_records, 5);
    assert_eq!(stats.total_employees, 5);
    assert_eq!(stats.total_flights, 5);
    assert_eq!(stats.total_specs, 5);
    assert_eq!(stats.rework_count, 1);
    // (43+18+40+20+48)/5
    assert!((stats.avg_duration - 33.8).abs() < 1e-9);
    // (11+14+15+17+16)/5
    assert!((stats.avg_items - 14.6).abs() < 1e-9);
}

#[test]
fn test_breakdowns_agree_with_aggregator() {
    let (_db, state) = create_test_state().unwrap();

    // every seeded record has a distinct flight; counts must sum to the total
    let by_flight = state.efficiency_api.breakdown(BreakdownDimension::Flight).unwrap();
    assert_eq!(by_flight.len(), 5);
    let total: i64 = by_flight.iter().map(|row| row.task_count).sum();
    assert_eq!(total, 5);

    let lx726 = by_flight.iter().find(|row| row.key == "LX726").unwrap();
    assert_eq!(lx726.task_count, 1);
    assert_eq!(lx726.avg_duration, 18.0);
    assert_eq!(lx726.rework_count, 1);

    // by hour: seeded start times fall in hours 06 (x2), 07, 08, 09
    let by_hour = state.efficiency_api.breakdown(BreakdownDimension::Hour).unwrap();
    let hour06 = by_hour.iter().find(|row| row.key == "06").unwrap();
    assert_eq!(hour06.task_count, 2);

    // by day: all seeded records share one day
    let by_day = state.efficiency_api.breakdown(BreakdownDimension::Day).unwrap();
    assert_eq!(by_day.len(), 1);
    assert_eq!(by_day[0].key, "2025-10-13");
    assert_eq!(by_day[0].task_count, 5);
}
