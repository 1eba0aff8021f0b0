// ==========================================
// Bottle decision engine - integration tests
// ==========================================
// Static airline rules, fallback behavior, decision history.
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use catering_hub::domain::bottle::{Cleanliness, LabelStatus, SealStatus};
use catering_hub::domain::decision::{ActionColor, Decision};
use test_helpers::{create_test_state, make_bottle};

#[test]
fn test_emirates_discards_opened_bottle() {
    let (_db, state) = create_test_state().unwrap();

    let bottle = make_bottle(
        "EK",
        100.0,
        SealStatus::Opened,
        Cleanliness::Excellent,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();

    assert_eq!(decision.action, "Discard");
    assert_eq!(decision.reason, "Emirates policy: Discard all opened bottles");
    assert_eq!(decision.color, ActionColor::Dark);
}

#[test]
fn test_swiss_keeps_sealed_bottle_at_80() {
    let (_db, state) = create_test_state().unwrap();

    let bottle = make_bottle(
        "LX",
        80.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();

    assert_eq!(decision.action, "Keep");
    assert_eq!(decision.color, ActionColor::Success);
}

#[test]
fn test_british_airways_replaces_below_80() {
    let (_db, state) = create_test_state().unwrap();

    let bottle = make_bottle(
        "BA",
        60.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();

    assert_eq!(decision.action, "Replace");
    assert_eq!(decision.color, ActionColor::Danger);
}

#[test]
fn test_unknown_airline_codes_behave_like_emirates() {
    let (_db, state) = create_test_state().unwrap();

    let seals = [SealStatus::Sealed, SealStatus::Resealed, SealStatus::Opened];
    let cleans = [Cleanliness::Excellent, Cleanliness::Poor];
    let labels = [LabelStatus::Intact, LabelStatus::HeavilyDamaged];
    let fills = [30.0, 85.0, 95.0, 100.0];

    for seal in seals {
        for clean in cleans {
            for label in labels {
                for fill in fills {
                    for code in ["QR", "AF", "ZZ", ""] {
                        let other = state
                            .bottle_api
                            .evaluate(&make_bottle(code, fill, seal, clean, label))
                            .unwrap();
                        let emirates = state
                            .bottle_api
                            .evaluate(&make_bottle("EK", fill, seal, clean, label))
                            .unwrap();
                        assert_eq!(other.action, emirates.action, "code={}", code);
                        assert_eq!(other.reason, emirates.reason, "code={}", code);
                    }
                }
            }
        }
    }
}

#[test]
fn test_default_decision_when_no_rule_matches() {
    let (_db, state) = create_test_state().unwrap();

    // EK, sealed, full, clean, label intact: no static rule fires
    let bottle = make_bottle(
        "EK",
        95.0,
        SealStatus::Sealed,
        Cleanliness::Excellent,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();

    assert_eq!(decision.action, "Keep");
    assert_eq!(decision.reason, "No issues detected - meets standards");
}

#[test]
fn test_history_is_a_fifo_ring_of_ten() {
    let (_db, state) = create_test_state().unwrap();

    // 15 evaluations with distinguishable fill levels
    for i in 0..15 {
        let bottle = make_bottle(
            "BA",
            float_fill(i),
            SealStatus::Sealed,
            Cleanliness::Good,
            LabelStatus::Intact,
        );
        state.bottle_api.evaluate(&bottle).unwrap();
    }

    let view = state.bottle_api.history().unwrap();
    assert_eq!(view.history.len(), 10);

    // chronological order: the first retained decision is evaluation #5
    // (fill 60 -> Replace), the last is #14 (fill 96 -> Keep)
    assert_eq!(view.history[0].action, "Replace");
    assert_eq!(view.history[9].action, "Keep");

    // timestamps never decrease
    for pair in view.history.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

/// Evaluation i gets fill level 40 + 4*i so early and late decisions
/// differ (BA: <80 Replace, >=80 Keep).
fn float_fill(i: usize) -> f64 {
    40.0 + 4.0 * i as f64
}

#[test]
fn test_decision_serialization_round_trip() {
    let (_db, state) = create_test_state().unwrap();

    let bottle = make_bottle(
        "EK",
        50.0,
        SealStatus::Sealed,
        Cleanliness::Good,
        LabelStatus::Intact,
    );
    let decision = state.bottle_api.evaluate(&bottle).unwrap();

    let json = serde_json::to_string(&decision).unwrap();
    let parsed: Decision = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.action, decision.action);
    assert_eq!(parsed.reason, decision.reason);
    assert_eq!(parsed.timestamp, decision.timestamp);
    assert_eq!(parsed.color, decision.color);
}
