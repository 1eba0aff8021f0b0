// ==========================================
// Dynamic dataset rules - integration tests
// ==========================================
// Imported rows acting as rules: matching, priority by import order,
// fallback to static rules, resilience to bad rows.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use catering_hub::domain::bottle::{Cleanliness, LabelStatus, SealStatus};
use catering_hub::domain::record::RecordSource;
use catering_hub::engine::dataset_rules::DatasetRuleEvaluator;
use catering_hub::repository::record_repo::ImportedRecordRepository;
use serde_json::json;
use std::sync::Arc;
use test_helpers::{create_test_db, make_bottle, open_shared_conn};

fn setup() -> (
    tempfile::NamedTempFile,
    Arc<ImportedRecordRepository>,
    DatasetRuleEvaluator,
) {
    let (db, db_path) = create_test_db().unwrap();
    let conn = open_shared_conn(&db_path).unwrap();
    let records = Arc::new(ImportedRecordRepository::alcohol(conn));
    let evaluator = DatasetRuleEvaluator::new(records.clone());
    (db, records, evaluator)
}

#[test]
fn test_range_rule_matches_regardless_of_seal() {
    let (_db, records, evaluator) = setup();
    records
        .insert(
            RecordSource::Excel,
            &json!({ "Fill_Level": "30-70", "Seal_Status": "any", "Action": "Refill" }),
            None,
        )
        .unwrap();

    for seal in [SealStatus::Sealed, SealStatus::Resealed, SealStatus::Opened] {
        let bottle = make_bottle("EK", 50.0, seal, Cleanliness::Good, LabelStatus::Intact);
        let result = evaluator.evaluate(&bottle).unwrap().unwrap();
        assert_eq!(result.action, "Refill");
        assert_eq!(result.reason, "Matched rule from dataset");
    }

    // outside the range: no match
    let bottle = make_bottle(
        "EK",
        75.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    assert!(evaluator.evaluate(&bottle).unwrap().is_none());
}

#[test]
fn test_first_imported_rule_wins() {
    let (_db, records, evaluator) = setup();
    records
        .insert(
            RecordSource::Excel,
            &json!({ "Fill_Level": "<60", "Action": "Refill", "Reason": "first rule" }),
            None,
        )
        .unwrap();
    records
        .insert(
            RecordSource::Excel,
            &json!({ "Fill_Level": "<60", "Action": "Discard", "Reason": "second rule" }),
            None,
        )
        .unwrap();

    let bottle = make_bottle(
        "EK",
        40.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let result = evaluator.evaluate(&bottle).unwrap().unwrap();
    assert_eq!(result.action, "Refill");
    assert_eq!(result.reason, "first rule");
}

#[test]
fn test_bare_number_means_strictly_less_than() {
    let (_db, records, evaluator) = setup();
    records
        .insert(
            RecordSource::Excel,
            &json!({ "Fill_Level": "70", "Action": "Refill" }),
            None,
        )
        .unwrap();

    let below = make_bottle("EK", 69.0, SealStatus::Sealed, Cleanliness::Good, LabelStatus::Intact);
    assert!(evaluator.evaluate(&below).unwrap().is_some());

    // 70 is not < 70
    let at = make_bottle("EK", 70.0, SealStatus::Sealed, Cleanliness::Good, LabelStatus::Intact);
    assert!(evaluator.evaluate(&at).unwrap().is_none());
}

#[test]
fn test_option_list_and_customer_column() {
    let (_db, records, evaluator) = setup();
    records
        .insert(
            RecordSource::Excel,
            &json!({
                "Customer_Code": "EK|BA",
                "Seal_Status": "Opened/Resealed",
                "Action": "Discard",
                "Comment": "opened stock is never reused"
            }),
            None,
        )
        .unwrap();

    let matching = make_bottle(
        "BA",
        90.0,
        SealStatus::Resealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let result = evaluator.evaluate(&matching).unwrap().unwrap();
    assert_eq!(result.action, "Discard");
    assert_eq!(result.reason, "opened stock is never reused");

    let wrong_airline = make_bottle(
        "LX",
        90.0,
        SealStatus::Resealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    assert!(evaluator.evaluate(&wrong_airline).unwrap().is_none());
}

#[test]
fn test_unparseable_row_is_skipped() {
    let (db, records, evaluator) = setup();

    // write a corrupt data blob directly
    let conn = open_shared_conn(db.path().to_str().unwrap()).unwrap();
    conn.lock()
        .unwrap()
        .execute(
            "INSERT INTO alcohol_items (source, data) VALUES ('excel', 'not json at all')",
            [],
        )
        .unwrap();

    records
        .insert(
            RecordSource::Excel,
            &json!({ "Fill_Level": "<60", "Action": "Refill" }),
            None,
        )
        .unwrap();

    // the corrupt row is skipped, the valid rule still applies
    let bottle = make_bottle(
        "EK",
        40.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let result = evaluator.evaluate(&bottle).unwrap().unwrap();
    assert_eq!(result.action, "Refill");
}

#[test]
fn test_non_excel_sources_are_not_rules() {
    let (_db, records, evaluator) = setup();
    records
        .insert(
            RecordSource::Manual,
            &json!({ "Fill_Level": "<60", "Action": "Discard" }),
            None,
        )
        .unwrap();
    records
        .insert(
            RecordSource::Pdf,
            &json!({ "text": "alcohol note" }),
            Some("alcohol note"),
        )
        .unwrap();

    let bottle = make_bottle(
        "EK",
        40.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    assert!(evaluator.evaluate(&bottle).unwrap().is_none());
}

#[test]
fn test_engine_prefers_dynamic_match_over_static_rules() {
    let (_db, state) = test_helpers::create_test_state().unwrap();

    // without a dataset rule, an opened EK bottle is discarded
    let bottle = make_bottle(
        "EK",
        95.0,
        SealStatus::Opened,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();
    assert_eq!(decision.action, "Discard");

    // a dataset rule overrides: resealable opened bottles get refilled
    let conn = open_shared_conn(&state.db_path).unwrap();
    let records = ImportedRecordRepository::alcohol(conn);
    records
        .insert(
            RecordSource::Excel,
            &json!({
                "Seal_Status": "Opened",
                "Action": "Refill",
                "Reason": "dataset override"
            }),
            None,
        )
        .unwrap();

    let decision = state.bottle_api.evaluate(&bottle).unwrap();
    assert_eq!(decision.action, "Refill");
    assert_eq!(decision.reason, "dataset override");
}
