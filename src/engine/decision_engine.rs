// ==========================================
// BottleDecisionEngine - evaluation orchestrator
// ==========================================
// Evaluation order: dynamic dataset rules -> static airline rules ->
// hardcoded default. Every decision from any path lands in the bounded
// history.
// ==========================================

use crate::domain::bottle::Bottle;
use crate::domain::decision::{BottleAction, Decision};
use crate::engine::airline_rules::rules_for;
use crate::engine::dataset_rules::DatasetRuleEvaluator;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Decisions retained in the history ring.
pub const HISTORY_CAPACITY: usize = 10;

pub const DEFAULT_DECISION_REASON: &str = "No issues detected - meets standards";

// ==========================================
// Bounded decision history
// ==========================================
/// FIFO ring of the most recent decisions; the oldest entry is evicted
/// when a push exceeds capacity. Advisory, display-only state.
#[derive(Debug, Default)]
pub struct DecisionHistory {
    entries: VecDeque<Decision>,
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    pub fn push(&mut self, decision: Decision) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(decision);
    }

    /// Retained decisions in chronological order (oldest first).
    pub fn snapshot(&self) -> Vec<Decision> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==========================================
// Decision engine
// ==========================================
pub struct BottleDecisionEngine {
    dataset_rules: DatasetRuleEvaluator,
    history: Mutex<DecisionHistory>,
}

impl BottleDecisionEngine {
    pub fn new(dataset_rules: DatasetRuleEvaluator) -> Self {
        Self {
            dataset_rules,
            history: Mutex::new(DecisionHistory::new()),
        }
    }

    /// Evaluate one bottle.
    ///
    /// A failure inside the dynamic-rule path is logged and evaluation
    /// proceeds to the static rules; the request never fails because the
    /// dataset store is unreadable.
    pub fn evaluate(&self, bottle: &Bottle) -> Decision {
        let decision = match self.dataset_rules.evaluate(bottle) {
            Ok(Some(rule_match)) => Decision::new(rule_match.action, rule_match.reason),
            Ok(None) => evaluate_static(bottle),
            Err(e) => {
                tracing::warn!(
                    "dataset rule evaluation failed, falling back to static rules: {}",
                    e
                );
                evaluate_static(bottle)
            }
        };

        self.record(decision.clone());
        decision
    }

    /// Retained decision history, oldest first.
    pub fn history(&self) -> Vec<Decision> {
        match self.history.lock() {
            Ok(history) => history.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }

    fn record(&self, decision: Decision) {
        // history is advisory; a poisoned lock still yields a usable ring
        let mut history = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        history.push(decision);
    }
}

/// Static airline rules, then the hardcoded default.
fn evaluate_static(bottle: &Bottle) -> Decision {
    for rule in rules_for(&bottle.customer_code) {
        if (rule.condition)(bottle) {
            return Decision::new(rule.action.as_str(), rule.reason);
        }
    }
    Decision::new(BottleAction::Keep.as_str(), DEFAULT_DECISION_REASON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bottle::{Cleanliness, LabelStatus, SealStatus};
    use crate::domain::decision::ActionColor;

    fn bottle(code: &str, fill: f64, seal: SealStatus) -> Bottle {
        Bottle {
            customer_code: code.to_string(),
            fill_level: fill,
            seal_status: seal,
            cleanliness: Cleanliness::Excellent,
            label_status: LabelStatus::Intact,
        }
    }

    #[test]
    fn test_static_emirates_discards_opened() {
        let decision = evaluate_static(&bottle("EK", 100.0, SealStatus::Opened));
        assert_eq!(decision.action, "Discard");
        assert_eq!(decision.color, ActionColor::Dark);
    }

    #[test]
    fn test_static_swiss_keeps_sealed_above_70() {
        let decision = evaluate_static(&bottle("LX", 80.0, SealStatus::Sealed));
        assert_eq!(decision.action, "Keep");
        assert_eq!(decision.reason, "Swiss Air: Reuse if above 70% fill and sealed");
    }

    #[test]
    fn test_static_unknown_code_uses_emirates_rules() {
        let unknown = evaluate_static(&bottle("QR", 85.0, SealStatus::Sealed));
        let emirates = evaluate_static(&bottle("EK", 85.0, SealStatus::Sealed));
        assert_eq!(unknown.action, emirates.action);
        assert_eq!(unknown.reason, emirates.reason);
    }

    #[test]
    fn test_static_default_decision() {
        // LX, sealed, fill 40: no LX rule matches
        let decision = evaluate_static(&bottle("LX", 40.0, SealStatus::Sealed));
        assert_eq!(decision.action, "Keep");
        assert_eq!(decision.reason, DEFAULT_DECISION_REASON);
    }

    #[test]
    fn test_history_ring_evicts_oldest() {
        let mut history = DecisionHistory::new();
        for i in 0..15 {
            history.push(Decision::new("Keep", format!("decision {}", i)));
        }
        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), HISTORY_CAPACITY);
        // chronological: oldest retained entry is decision 5
        assert_eq!(snapshot[0].reason, "decision 5");
        assert_eq!(snapshot[9].reason, "decision 14");
    }
}
